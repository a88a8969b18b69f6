//! Integer grid geometry shared by the world, the systems and the adapters.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as signed column and row coordinates.
///
/// Rooms may be placed anywhere on the plane, including negative coordinates,
/// so positions are signed rather than unsigned cell indices.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Column coordinate, growing towards the east.
    pub x: i32,
    /// Row coordinate, growing towards the south.
    pub y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub const fn distance_to(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Component-wise minimum of two positions.
    #[must_use]
    pub fn component_min(self, other: Position) -> Position {
        Position::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum of two positions.
    #[must_use]
    pub fn component_max(self, other: Position) -> Position {
        Position::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Returns the neighbouring position one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Position {
        self + direction.delta()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal movement directions available to the player and the robots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing column coordinates.
    East,
    /// Movement toward increasing row coordinates.
    South,
    /// Movement toward decreasing column coordinates.
    West,
    /// Movement toward decreasing row coordinates.
    North,
}

impl Direction {
    /// All four directions in neighbour-scan order.
    ///
    /// The order doubles as the bit order of wall adjacency masks: east is
    /// bit 0, south bit 1, west bit 2 and north bit 3.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// Unit offset applied to a position when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> Position {
        match self {
            Self::East => Position::new(1, 0),
            Self::South => Position::new(0, 1),
            Self::West => Position::new(-1, 0),
            Self::North => Position::new(0, -1),
        }
    }

    /// Resolves the direction connecting two orthogonally adjacent positions.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let delta = to - from;
        Self::ALL
            .into_iter()
            .find(|direction| direction.delta() == delta)
    }
}

/// Width and height of an axis-aligned area measured in whole cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size spanned between two corner positions (exclusive far corner).
    #[must_use]
    pub const fn between(from: Position, to: Position) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    /// Number of cells covered by the size.
    #[must_use]
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Center cell of an origin-anchored area of this size.
    #[must_use]
    pub const fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Reports whether both dimensions are less than or equal to `other`'s.
    #[must_use]
    pub const fn fits_into(&self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    /// Component-wise maximum of two sizes.
    #[must_use]
    pub fn component_max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Reports whether `position` lies inside an origin-anchored area of this size.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    /// Row-major index of `position` inside an origin-anchored area of this size.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.y).ok()?;
        let column = usize::try_from(position.x).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }
}

/// Axis-aligned rectangle anchored at a position.
///
/// Containment is half-open: the near edges are inside, the far edges are not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    /// Upper-left cell of the rectangle.
    pub position: Position,
    /// Extent of the rectangle.
    pub size: Size,
}

impl Rectangle {
    /// Creates a rectangle from its corner coordinates and dimensions.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates a rectangle from an origin position and a size.
    #[must_use]
    pub const fn from_position_and_size(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Column just past the right edge.
    #[must_use]
    pub const fn x2(&self) -> i32 {
        self.position.x + self.size.width
    }

    /// Row just past the bottom edge.
    #[must_use]
    pub const fn y2(&self) -> i32 {
        self.position.y + self.size.height
    }

    /// Exclusive bottom-right corner.
    #[must_use]
    pub const fn bottom_right(&self) -> Position {
        Position::new(self.x2(), self.y2())
    }

    /// Center cell of the rectangle.
    #[must_use]
    pub const fn center(&self) -> Position {
        Position::new(
            self.size.width / 2 + self.position.x,
            self.size.height / 2 + self.position.y,
        )
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let top_left = self.position.component_min(other.position);
        let bottom_right = self.bottom_right().component_max(other.bottom_right());
        Rectangle::from_position_and_size(top_left, Size::between(top_left, bottom_right))
    }

    /// Rectangle grown symmetrically by the given padding on each side.
    #[must_use]
    pub const fn padded(&self, padding_x: i32, padding_y: i32) -> Rectangle {
        Rectangle::new(
            self.position.x - padding_x,
            self.position.y - padding_y,
            self.size.width + padding_x * 2,
            self.size.height + padding_y * 2,
        )
    }

    /// Reports whether `position` lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.position.x
            && position.y >= self.position.y
            && position.x < self.x2()
            && position.y < self.y2()
    }

    /// Iterator over every cell of the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let origin = self.position;
        let width = self.size.width.max(0);
        let height = self.size.height.max(0);
        (0..height).flat_map(move |y| (0..width).map(move |x| origin + Position::new(x, y)))
    }
}
