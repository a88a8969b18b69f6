//! Tile buffer of semantic blocks with a world-to-canvas offset.

use robot_escape_core::{Block, Direction, Position, Rectangle, Size};

use crate::RenderingError;

/// Fixed-size grid of [`Block`] values addressed in world coordinates.
///
/// World cells are translated by the origin offset before they are stored;
/// writes that land outside the grid are dropped and reads outside the grid
/// report [`Block::Empty`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    blocks: Vec<Block>,
    origin_offset: Position,
}

impl Canvas {
    /// Creates an empty canvas of the provided size.
    pub fn new(size: Size) -> Result<Self, RenderingError> {
        if size.width <= 0 || size.height <= 0 {
            return Err(RenderingError::InvalidCanvasSize {
                width: size.width,
                height: size.height,
            });
        }
        let area = usize::try_from(size.area()).map_err(|_| RenderingError::InvalidCanvasSize {
            width: size.width,
            height: size.height,
        })?;

        Ok(Self {
            size,
            blocks: vec![Block::Empty; area],
            origin_offset: Position::default(),
        })
    }

    /// Dimensions of the canvas in cells.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Offset added to world cells to obtain canvas cells.
    #[must_use]
    pub const fn origin_offset(&self) -> Position {
        self.origin_offset
    }

    /// Replaces the world-to-canvas offset.
    pub fn set_origin_offset(&mut self, offset: Position) {
        self.origin_offset = offset;
    }

    /// Chooses the offset that puts the center of `area` on the canvas center.
    pub fn center_on(&mut self, area: Rectangle) {
        self.origin_offset = self.size.center() - area.center();
    }

    /// Resets every cell to [`Block::Empty`].
    pub fn clear(&mut self) {
        self.blocks.fill(Block::Empty);
    }

    /// Stores `block` at a world cell.
    pub fn set_block(&mut self, cell: Position, block: Block) {
        if let Some(index) = self.size.index(cell + self.origin_offset) {
            self.blocks[index] = block;
        }
    }

    /// Stores `block` at every world cell of `rectangle`.
    pub fn fill_rect(&mut self, rectangle: Rectangle, block: Block) {
        for cell in rectangle.cells() {
            self.set_block(cell, block);
        }
    }

    /// Block stored at a world cell.
    #[must_use]
    pub fn block_at(&self, cell: Position) -> Block {
        self.block_from_origin(cell + self.origin_offset)
    }

    /// Block stored at a canvas cell, counted from the top-left corner.
    #[must_use]
    pub fn block_from_origin(&self, cell: Position) -> Block {
        self.size
            .index(cell)
            .map_or(Block::Empty, |index| self.blocks[index])
    }

    /// Bit mask of the four neighbours of a canvas cell that hold `block`.
    ///
    /// Bit `i` corresponds to `Direction::ALL[i]`: east, south, west, north.
    #[must_use]
    pub fn match_neighbours(&self, cell: Position, block: Block) -> usize {
        Direction::ALL
            .into_iter()
            .enumerate()
            .filter(|(_, direction)| self.block_from_origin(cell.step(*direction)) == block)
            .fold(0, |mask, (bit, _)| mask | (1 << bit))
    }

    /// Rows of blocks from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        let width = usize::try_from(self.size.width).unwrap_or(1).max(1);
        self.blocks.chunks(width)
    }
}
