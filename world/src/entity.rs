//! Positioned entities that remember where they have been.

use std::collections::VecDeque;

use robot_escape_core::{Appearance, Position, TRAIL_LENGTH};

/// Bounded FIFO of the most recent cells an entity left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trail {
    cells: VecDeque<Position>,
}

impl Trail {
    fn push(&mut self, cell: Position) {
        self.cells.push_back(cell);
        while self.cells.len() > TRAIL_LENGTH {
            let _ = self.cells.pop_front();
        }
    }

    /// Number of remembered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether nothing is remembered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Remembered cells from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

/// Player, robot or exit: a position, its trail, and how it is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tracked {
    position: Position,
    trail: Trail,
    name: Option<String>,
    appearance: Appearance,
}

impl Tracked {
    pub(crate) fn new(appearance: Appearance, position: Position) -> Self {
        Self {
            position,
            trail: Trail::default(),
            name: None,
            appearance,
        }
    }

    pub(crate) fn named(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Moves to `destination`, remembering the cell that was left.
    pub(crate) fn move_to(&mut self, destination: Position) {
        self.trail.push(self.position);
        self.position = destination;
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Recently left cells.
    #[must_use]
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Display name; only robots carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Blocks used to draw the entity and its trail.
    #[must_use]
    pub const fn appearance(&self) -> Appearance {
        self.appearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_keeps_only_most_recent_cells() {
        let mut robot = Tracked::new(Appearance::ROBOT, Position::new(0, 0));
        for x in 1..=5 {
            robot.move_to(Position::new(x, 0));
            assert!(robot.trail().len() <= TRAIL_LENGTH);
        }

        let trail: Vec<_> = robot.trail().iter().collect();
        assert_eq!(
            trail,
            vec![Position::new(2, 0), Position::new(3, 0), Position::new(4, 0)]
        );
        assert_eq!(robot.position(), Position::new(5, 0));
    }

    #[test]
    fn fresh_entity_has_empty_trail() {
        let player = Tracked::new(Appearance::PLAYER, Position::new(3, 3));
        assert!(player.trail().is_empty());
        assert!(player.name().is_none());
    }
}
