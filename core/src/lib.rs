#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Robot Escape engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the turn systems. Systems submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then reports [`Event`] values describing what
//! actually happened. Adapters read immutable world snapshots to present them.

use std::fmt;

use serde::{Deserialize, Serialize};

mod geometry;

pub use geometry::{Direction, Position, Rectangle, Size};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Robot Escape!";

/// Number of previous positions remembered by every moving entity.
pub const TRAIL_LENGTH: usize = 3;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Adds an exit at the provided cell.
    AddExit {
        /// Cell the exit occupies.
        cell: Position,
    },
    /// Moves the player to its starting cell without leaving a trail.
    PlacePlayer {
        /// Cell the player starts on.
        cell: Position,
    },
    /// Adds a robot at the provided cell.
    AddRobot {
        /// Cell the robot starts on.
        cell: Position,
    },
    /// Requests that the player advance a single step.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that a robot advance a single step.
    StepRobot {
        /// Identifier of the robot attempting to move.
        robot: RobotId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that an exit was added.
    ExitAdded {
        /// Cell the exit occupies.
        cell: Position,
    },
    /// Confirms that the player was put on its starting cell.
    PlayerPlaced {
        /// Cell the player starts on.
        cell: Position,
    },
    /// Confirms that a robot was added.
    RobotAdded {
        /// Identifier assigned to the robot.
        robot: RobotId,
        /// Cell the robot starts on.
        cell: Position,
    },
    /// Reports that a setup placement targeted a cell outside the field.
    PlacementRejected {
        /// Kind of entity that could not be placed.
        entity: EntityKind,
        /// Requested cell.
        cell: Position,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: Position,
        /// Cell the player occupies after moving.
        to: Position,
    },
    /// Reports that the player's step left the field and the turn was lost.
    PlayerMoveForfeited {
        /// Direction the player tried to move in.
        direction: Direction,
        /// Cell the player tried to enter.
        target: Position,
    },
    /// Confirms that a robot moved between two cells.
    RobotMoved {
        /// Identifier of the robot that moved.
        robot: RobotId,
        /// Cell the robot occupied before moving.
        from: Position,
        /// Cell the robot occupies after moving.
        to: Position,
    },
    /// Reports that a robot step was refused by the world.
    RobotStepRejected {
        /// Identifier of the robot that attempted to move.
        robot: RobotId,
        /// Direction of the refused step.
        direction: Direction,
    },
}

/// Unique identifier assigned to a robot, in creation order starting at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RobotId(u32);

impl RobotId {
    /// Creates a new robot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Human readable name, `Robot 1` for the first robot created.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Robot {}", self.0 + 1)
    }
}

/// Kinds of entities living in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The single player-controlled entity.
    Player,
    /// A pursuit agent.
    Robot,
    /// A goal cell that ends the game when the player reaches it.
    Exit,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Robot => write!(f, "robot"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Semantic tile kinds used when presenting the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    /// Nothing; outside every room and wall.
    #[default]
    Empty,
    /// Wall surrounding a room.
    Wall,
    /// Walkable floor.
    Room,
    /// An exit.
    Exit,
    /// The player.
    Player,
    /// A cell the player recently left.
    PlayerTrail,
    /// A robot.
    Robot,
    /// A cell a robot recently left.
    RobotTrail,
}

/// Pair of blocks an entity is drawn with: its live cell and its trail cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Appearance {
    body: Block,
    trail: Block,
}

impl Appearance {
    /// Appearance of the player.
    pub const PLAYER: Appearance = Appearance::new(Block::Player, Block::PlayerTrail);
    /// Appearance of a robot.
    pub const ROBOT: Appearance = Appearance::new(Block::Robot, Block::RobotTrail);
    /// Appearance of an exit; exits never move, so the trail block is unused.
    pub const EXIT: Appearance = Appearance::new(Block::Exit, Block::Exit);

    /// Creates a new appearance from a body and a trail block.
    #[must_use]
    pub const fn new(body: Block, trail: Block) -> Self {
        Self { body, trail }
    }

    /// Block stamped on the entity's current cell.
    #[must_use]
    pub const fn body(&self) -> Block {
        self.body
    }

    /// Block stamped on the entity's trail cells.
    #[must_use]
    pub const fn trail(&self) -> Block {
        self.trail
    }
}

/// Overall state of a game, evaluated after every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Nobody has won yet.
    Running,
    /// The player stands on an exit.
    PlayerWon,
    /// A robot caught the player.
    RobotsWon,
}

impl GameState {
    /// Reports whether the state ends the game.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Single command read from the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerInput {
    /// Step one cell in the given direction.
    Move(Direction),
    /// Leave the game.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::{Command, Direction, EntityKind, Event, GameState, Position, RobotId};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn step_command_round_trips_through_bincode() {
        assert_round_trip(&Command::StepRobot {
            robot: RobotId::new(2),
            direction: Direction::West,
        });
    }

    #[test]
    fn forfeit_event_round_trips_through_bincode() {
        assert_round_trip(&Event::PlayerMoveForfeited {
            direction: Direction::North,
            target: Position::new(4, -1),
        });
    }

    #[test]
    fn robot_names_are_one_based() {
        assert_eq!(RobotId::new(0).display_name(), "Robot 1");
        assert_eq!(RobotId::new(2).display_name(), "Robot 3");
    }

    #[test]
    fn only_running_is_not_terminal() {
        assert!(!GameState::Running.is_terminal());
        assert!(GameState::PlayerWon.is_terminal());
        assert!(GameState::RobotsWon.is_terminal());
    }

    #[test]
    fn entity_kinds_display_lowercase() {
        assert_eq!(EntityKind::Robot.to_string(), "robot");
        assert_eq!(EntityKind::Exit.to_string(), "exit");
    }
}
