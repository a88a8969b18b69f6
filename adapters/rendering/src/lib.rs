#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Robot Escape adapters.
//!
//! Rendering happens in two stages. [`render_world`] stamps the world onto a
//! [`Canvas`] of semantic blocks, rebuilt from scratch every frame. A
//! [`Presenter`] then turns those blocks into glyphs for a concrete output.

use anyhow::Result as AnyResult;
use robot_escape_core::{Block, Size};
use robot_escape_world::{query, Field, Tracked, World};
use std::{error::Error, fmt};

mod canvas;
mod terminal;

pub use canvas::Canvas;
pub use terminal::{plain_rows, TerminalPresenter};

/// Smallest canvas ever presented, in cells.
pub const MINIMUM_CANVAS_SIZE: Size = Size::new(32, 16);

/// Wall glyphs indexed by the mask of neighbouring wall cells.
pub const WALL_GLYPHS: [&str; 16] = [
    "■", "╺", "╻", "┏", "╸", "━", "┓", "┳", "╹", "┗", "┃", "┣", "┛", "┻", "┫", "╋",
];

/// Glyph drawn for a block; `wall_mask` only matters for [`Block::Wall`].
#[must_use]
pub fn glyph(block: Block, wall_mask: usize) -> &'static str {
    match block {
        Block::Empty => "░",
        Block::Wall => WALL_GLYPHS[wall_mask & 0b1111],
        Block::Room => " ",
        Block::Exit => "⚑",
        Block::Player => "☻",
        Block::Robot => "♟",
        Block::PlayerTrail | Block::RobotTrail => "∙",
    }
}

/// ANSI select-graphic-rendition code used for a block.
#[must_use]
pub const fn ansi_code(block: Block) -> u8 {
    match block {
        Block::Empty => 90,
        Block::Wall => 32,
        Block::Room => 0,
        Block::Exit => 92,
        Block::Player | Block::PlayerTrail => 93,
        Block::Robot | Block::RobotTrail => 91,
    }
}

/// Canvas size that fits the field with a margin.
///
/// An empty field yields the minimum size.
#[must_use]
pub fn canvas_size_for(field: &Field) -> Size {
    field
        .bounds()
        .map_or(MINIMUM_CANVAS_SIZE, |bounds| {
            bounds.padded(2, 1).size.component_max(MINIMUM_CANVAS_SIZE)
        })
}

/// Builds a canvas sized for the world and stamps the world onto it.
pub fn render_frame(world: &World) -> Result<Canvas, RenderingError> {
    let mut canvas = Canvas::new(canvas_size_for(query::field(world)))?;
    render_world(world, &mut canvas);
    Ok(canvas)
}

/// Clears `canvas` and stamps the world onto it, centred.
///
/// Walls are drawn as a one cell halo around every room before any room
/// interior, so interiors always win over a neighbouring room's halo.
/// Exits, the player and the robots follow, later stamps overwriting earlier
/// ones.
pub fn render_world(world: &World, canvas: &mut Canvas) {
    canvas.clear();
    let field = query::field(world);
    match field.bounds() {
        Some(bounds) => canvas.center_on(bounds),
        None => canvas.set_origin_offset(canvas.size().center()),
    }

    for room in field.rooms() {
        canvas.fill_rect(room.rectangle().padded(1, 1), Block::Wall);
    }
    for room in field.rooms() {
        canvas.fill_rect(room.rectangle(), Block::Room);
    }

    for exit in query::exits(world) {
        stamp(canvas, exit);
    }
    stamp(canvas, query::player(world));
    for robot in query::robots(world) {
        stamp(canvas, robot);
    }
}

fn stamp(canvas: &mut Canvas, entity: &Tracked) {
    let appearance = entity.appearance();
    canvas.set_block(entity.position(), appearance.body());
    for cell in entity.trail().iter() {
        if matches!(canvas.block_at(cell), Block::Room | Block::RobotTrail) {
            canvas.set_block(cell, appearance.trail());
        }
    }
}

/// Output capable of presenting rendered canvases.
pub trait Presenter {
    /// Presents a single frame.
    fn present(&mut self, canvas: &Canvas) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Canvases need at least one cell in each dimension.
    InvalidCanvasSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCanvasSize { width, height } => {
                write!(
                    f,
                    "canvas size must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
