//! Walkable area composed of one or more possibly overlapping rooms.

use robot_escape_core::{Position, Rectangle};

/// Single rectangular walkable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    rectangle: Rectangle,
}

impl Room {
    /// Creates a room covering the provided rectangle.
    #[must_use]
    pub const fn new(rectangle: Rectangle) -> Self {
        Self { rectangle }
    }

    /// Rectangle covered by the room.
    #[must_use]
    pub const fn rectangle(&self) -> Rectangle {
        self.rectangle
    }
}

/// Union of rooms defining where entities may stand.
///
/// The bounding rectangle is kept equal to the union of all rooms added so
/// far and is absent until the first room arrives. Overlapping rooms carry no
/// special meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    rooms: Vec<Room>,
    bounds: Option<Rectangle>,
}

impl Field {
    /// Creates a field without any rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field from the provided room rectangles, in order.
    #[must_use]
    pub fn from_rectangles<I>(rectangles: I) -> Self
    where
        I: IntoIterator<Item = Rectangle>,
    {
        let mut field = Self::new();
        for rectangle in rectangles {
            field.add_room(rectangle);
        }
        field
    }

    /// Appends a room and grows the bounding rectangle to cover it.
    pub fn add_room(&mut self, rectangle: Rectangle) {
        self.rooms.push(Room::new(rectangle));
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&rectangle),
            None => rectangle,
        });
    }

    /// Rooms in insertion order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Bounding rectangle of all rooms, absent for an empty field.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rectangle> {
        self.bounds
    }

    /// Reports whether `position` lies inside at least one room.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.rooms
            .iter()
            .any(|room| room.rectangle.contains(position))
    }

    /// Walkable cells satisfying `predicate`, in row-major scan order of the bounds.
    pub fn filter_positions<P>(&self, mut predicate: P) -> Vec<Position>
    where
        P: FnMut(Position) -> bool,
    {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };

        bounds
            .cells()
            .filter(|cell| self.contains(*cell) && predicate(*cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_has_no_bounds_or_cells() {
        let field = Field::new();
        assert!(field.bounds().is_none());
        assert!(field.filter_positions(|_| true).is_empty());
        assert!(!field.contains(Position::new(0, 0)));
    }

    #[test]
    fn bounds_track_union_of_rooms() {
        let mut field = Field::new();
        field.add_room(Rectangle::new(2, 2, 4, 4));
        assert_eq!(field.bounds(), Some(Rectangle::new(2, 2, 4, 4)));

        field.add_room(Rectangle::new(-3, 5, 2, 6));
        assert_eq!(field.bounds(), Some(Rectangle::new(-3, 2, 9, 9)));
        assert_eq!(field.rooms().len(), 2);
    }

    #[test]
    fn cells_between_disjoint_rooms_are_not_walkable() {
        let field = Field::from_rectangles([Rectangle::new(0, 0, 5, 5), Rectangle::new(20, 0, 5, 5)]);
        for x in 5..20 {
            for y in 0..5 {
                assert!(
                    !field.contains(Position::new(x, y)),
                    "({x},{y}) lies between the rooms"
                );
            }
        }
        assert!(field.contains(Position::new(4, 4)));
        assert!(field.contains(Position::new(20, 0)));
    }

    #[test]
    fn filter_positions_skips_gaps_inside_bounds() {
        let field = Field::from_rectangles([Rectangle::new(0, 0, 2, 1), Rectangle::new(3, 1, 1, 1)]);
        assert_eq!(
            field.filter_positions(|_| true),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(3, 1)]
        );
    }

    #[test]
    fn overlapping_rooms_do_not_duplicate_cells() {
        let field = Field::from_rectangles([Rectangle::new(0, 0, 3, 3), Rectangle::new(1, 1, 3, 3)]);
        let cells = field.filter_positions(|_| true);
        assert_eq!(cells.len(), 14);
    }

    #[test]
    fn filter_positions_applies_predicate() {
        let field = Field::from_rectangles([Rectangle::new(0, 0, 4, 4)]);
        let cells = field.filter_positions(|cell| cell.x == cell.y);
        assert_eq!(cells.len(), 4);
    }
}
