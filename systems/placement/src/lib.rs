#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Setup system that seeds exits, the player and the robots onto the field.
//!
//! Placement happens once, in a fixed order: exits first, then the player,
//! then each robot. Every step samples uniformly among the walkable cells that
//! keep their distance from everything placed before, so later placements are
//! constrained by earlier ones and never the reverse.

use rand::Rng;
use robot_escape_core::{Command, EntityKind, Event, Position};
use robot_escape_world::{self as world, query, World, WorldError};
use thiserror::Error;
use tracing::debug;

/// Minimum Manhattan distance, exclusive, between the player and every exit.
pub const PLAYER_EXIT_CLEARANCE: u32 = 3;
/// Minimum Manhattan distance, exclusive, between a robot and the player.
pub const ROBOT_PLAYER_CLEARANCE: u32 = 4;
/// Minimum Manhattan distance, exclusive, between a robot and every exit.
pub const ROBOT_EXIT_CLEARANCE: u32 = 4;
/// Minimum Manhattan distance, exclusive, between two robots.
pub const ROBOT_SPACING: u32 = 1;

const DEFAULT_EXIT_COUNT: usize = 1;
const DEFAULT_ROBOT_COUNT: usize = 3;

/// Configuration parameters required to construct the placement system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    exit_count: usize,
    robot_count: usize,
}

impl Config {
    /// Creates a new configuration with explicit entity counts.
    #[must_use]
    pub const fn new(exit_count: usize, robot_count: usize) -> Self {
        Self {
            exit_count,
            robot_count,
        }
    }

    /// Number of exits to place.
    #[must_use]
    pub const fn exit_count(&self) -> usize {
        self.exit_count
    }

    /// Number of robots to place.
    #[must_use]
    pub const fn robot_count(&self) -> usize {
        self.robot_count
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_COUNT, DEFAULT_ROBOT_COUNT)
    }
}

/// Errors that abort world setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// No walkable cell satisfied the constraints for the entity.
    #[error("could not find a valid position for the {entity}")]
    NoValidPosition {
        /// Entity that could not be placed.
        entity: EntityKind,
        /// Underlying sampling failure.
        #[source]
        source: WorldError,
    },
    /// The world refused a sampled cell.
    #[error("the world rejected the {entity} at ({}, {})", .cell.x, .cell.y)]
    Rejected {
        /// Entity that could not be placed.
        entity: EntityKind,
        /// Sampled cell.
        cell: Position,
    },
}

/// Setup system that populates a freshly built world.
#[derive(Clone, Copy, Debug, Default)]
pub struct Placement {
    config: Config,
}

impl Placement {
    /// Creates a new placement system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Places exits, then the player, then the robots.
    ///
    /// Fails on the first entity that has no valid cell left; the world is
    /// then partially populated and should be discarded.
    pub fn populate<R>(
        &self,
        world: &mut World,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Result<(), PlacementError>
    where
        R: Rng + ?Sized,
    {
        for _ in 0..self.config.exit_count {
            let cell = sample(world, rng, EntityKind::Exit, |_| true)?;
            place(world, Command::AddExit { cell }, EntityKind::Exit, out_events)?;
        }

        let cell = sample(world, rng, EntityKind::Player, |cell| {
            !query::too_near(cell, PLAYER_EXIT_CLEARANCE, query::exits(world))
        })?;
        place(world, Command::PlacePlayer { cell }, EntityKind::Player, out_events)?;

        for _ in 0..self.config.robot_count {
            let player = query::player(world).position();
            let cell = sample(world, rng, EntityKind::Robot, |cell| {
                player.distance_to(cell) > ROBOT_PLAYER_CLEARANCE
                    && !query::too_near(cell, ROBOT_EXIT_CLEARANCE, query::exits(world))
                    && !query::too_near(cell, ROBOT_SPACING, query::robots(world))
            })?;
            place(world, Command::AddRobot { cell }, EntityKind::Robot, out_events)?;
        }

        Ok(())
    }
}

fn sample<R, P>(
    world: &World,
    rng: &mut R,
    entity: EntityKind,
    predicate: P,
) -> Result<Position, PlacementError>
where
    R: Rng + ?Sized,
    P: FnMut(Position) -> bool,
{
    query::random_valid_position(world, rng, predicate)
        .map_err(|source| PlacementError::NoValidPosition { entity, source })
}

fn place(
    world: &mut World,
    command: Command,
    entity: EntityKind,
    out_events: &mut Vec<Event>,
) -> Result<(), PlacementError> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    let outcome = events.iter().find_map(|event| match event {
        Event::PlacementRejected { cell, .. } => Some(Err(*cell)),
        Event::ExitAdded { cell } | Event::PlayerPlaced { cell } | Event::RobotAdded { cell, .. } => {
            Some(Ok(*cell))
        }
        _ => None,
    });
    out_events.append(&mut events);

    match outcome {
        Some(Err(cell)) => Err(PlacementError::Rejected { entity, cell }),
        Some(Ok(cell)) => {
            debug!(%entity, x = cell.x, y = cell.y, "entity placed");
            Ok(())
        }
        None => Ok(()),
    }
}
