//! Text presentation of canvases for terminals.

use std::{fmt::Write as _, io::Write};

use anyhow::{Context, Result as AnyResult};
use robot_escape_core::{Block, Position};

use crate::{ansi_code, glyph, Canvas, Presenter};

const RESET: &str = "\x1b[0m";

/// Presenter that writes glyph rows to a byte sink, optionally coloured.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
    color: bool,
}

impl<W> TerminalPresenter<W>
where
    W: Write,
{
    /// Creates a presenter writing to `out`; `color` enables ANSI escapes.
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Consumes the presenter, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, canvas: &Canvas) -> std::io::Result<()> {
        let mut frame = String::new();
        if self.color {
            frame.push_str(RESET);
        }

        let mut last: Option<Block> = None;
        for (y, row) in (0..).zip(canvas.rows()) {
            for (x, block) in (0..).zip(row.iter().copied()) {
                if self.color && last != Some(block) {
                    write!(frame, "\x1b[{}m", ansi_code(block))
                        .map_err(|_| std::io::Error::other("failed to format colour code"))?;
                }
                frame.push_str(cell_glyph(canvas, Position::new(x, y), block));
                last = Some(block);
            }
            frame.push('\n');
        }

        if self.color {
            frame.push_str(RESET);
        }
        frame.push('\n');

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W> Presenter for TerminalPresenter<W>
where
    W: Write,
{
    fn present(&mut self, canvas: &Canvas) -> AnyResult<()> {
        self.write_frame(canvas)
            .context("failed to write frame to the terminal")
    }
}

fn cell_glyph(canvas: &Canvas, cell: Position, block: Block) -> &'static str {
    let mask = if block == Block::Wall {
        canvas.match_neighbours(cell, Block::Wall)
    } else {
        0
    };
    glyph(block, mask)
}

/// Canvas rows as plain glyph strings, without colour.
#[must_use]
pub fn plain_rows(canvas: &Canvas) -> Vec<String> {
    (0..)
        .zip(canvas.rows())
        .map(|(y, row)| {
            (0..)
                .zip(row.iter().copied())
                .map(|(x, block)| cell_glyph(canvas, Position::new(x, y), block))
                .collect()
        })
        .collect()
}
