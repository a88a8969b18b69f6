#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Robot Escape.

use robot_escape_core::{
    Appearance, Command, Direction, EntityKind, Event, Position, RobotId, WELCOME_BANNER,
};
use thiserror::Error;

mod entity;
mod field;

pub use entity::{Tracked, Trail};
pub use field::{Field, Room};

/// Errors reported by world queries.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// No walkable cell satisfied the sampling constraints.
    #[error("could not find a valid position")]
    NoValidPosition,
}

/// Represents the authoritative Robot Escape world state.
///
/// The field never changes once the world is built; entities are added during
/// setup and then mutated in place through [`apply`].
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    field: Field,
    player: Tracked,
    robots: Vec<Tracked>,
    exits: Vec<Tracked>,
}

impl World {
    /// Creates a world over the provided field with no exits or robots.
    ///
    /// The player starts at the origin of the field's bounds until a
    /// [`Command::PlacePlayer`] puts it on a walkable cell.
    #[must_use]
    pub fn new(field: Field) -> Self {
        let origin = field
            .bounds()
            .map(|bounds| bounds.position)
            .unwrap_or_default();
        Self {
            banner: WELCOME_BANNER,
            field,
            player: Tracked::new(Appearance::PLAYER, origin),
            robots: Vec::new(),
            exits: Vec::new(),
        }
    }

    fn robot_at(&self, cell: Position) -> bool {
        self.robots.iter().any(|robot| robot.position() == cell)
    }

    fn robot_mut(&mut self, robot: RobotId) -> Option<&mut Tracked> {
        let index = usize::try_from(robot.get()).ok()?;
        self.robots.get_mut(index)
    }
}

/// Applies the provided command to the world, reporting the outcome as events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AddExit { cell } => {
            if !world.field.contains(cell) {
                out_events.push(Event::PlacementRejected {
                    entity: EntityKind::Exit,
                    cell,
                });
                return;
            }
            world.exits.push(Tracked::new(Appearance::EXIT, cell));
            out_events.push(Event::ExitAdded { cell });
        }
        Command::PlacePlayer { cell } => {
            if !world.field.contains(cell) {
                out_events.push(Event::PlacementRejected {
                    entity: EntityKind::Player,
                    cell,
                });
                return;
            }
            world.player = Tracked::new(Appearance::PLAYER, cell);
            out_events.push(Event::PlayerPlaced { cell });
        }
        Command::AddRobot { cell } => {
            if !query::is_valid_robot_movement(world, cell) {
                out_events.push(Event::PlacementRejected {
                    entity: EntityKind::Robot,
                    cell,
                });
                return;
            }
            let Ok(value) = u32::try_from(world.robots.len()) else {
                return;
            };
            let robot = RobotId::new(value);
            world
                .robots
                .push(Tracked::new(Appearance::ROBOT, cell).named(robot.display_name()));
            out_events.push(Event::RobotAdded { robot, cell });
        }
        Command::MovePlayer { direction } => {
            let from = world.player.position();
            let target = from.step(direction);
            if query::is_valid_player_movement(world, target) {
                world.player.move_to(target);
                out_events.push(Event::PlayerMoved { from, to: target });
            } else {
                out_events.push(Event::PlayerMoveForfeited { direction, target });
            }
        }
        Command::StepRobot { robot, direction } => {
            step_robot(world, robot, direction, out_events);
        }
    }
}

fn step_robot(
    world: &mut World,
    robot: RobotId,
    direction: Direction,
    out_events: &mut Vec<Event>,
) {
    let Some(from) = query::robot_position(world, robot) else {
        return;
    };
    let target = from.step(direction);
    if !world.field.contains(target) || world.robot_at(target) {
        out_events.push(Event::RobotStepRejected { robot, direction });
        return;
    }

    if let Some(tracked) = world.robot_mut(robot) {
        tracked.move_to(target);
        out_events.push(Event::RobotMoved {
            robot,
            from,
            to: target,
        });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use rand::{seq::SliceRandom, Rng};
    use robot_escape_core::{GameState, Position, RobotId};

    use super::{Field, Tracked, World, WorldError};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the field.
    #[must_use]
    pub fn field(world: &World) -> &Field {
        &world.field
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Tracked {
        &world.player
    }

    /// Robots in creation order; a robot's index is its [`RobotId`].
    #[must_use]
    pub fn robots(world: &World) -> &[Tracked] {
        &world.robots
    }

    /// Exits in creation order.
    #[must_use]
    pub fn exits(world: &World) -> &[Tracked] {
        &world.exits
    }

    /// Current cell of a robot, if it exists.
    #[must_use]
    pub fn robot_position(world: &World, robot: RobotId) -> Option<Position> {
        let index = usize::try_from(robot.get()).ok()?;
        world.robots.get(index).map(Tracked::position)
    }

    /// Captures a read-only view of the robots' current cells.
    #[must_use]
    pub fn robot_view(world: &World) -> RobotView {
        let snapshots = world
            .robots
            .iter()
            .zip(0u32..)
            .map(|(robot, index)| RobotSnapshot {
                id: RobotId::new(index),
                cell: robot.position(),
            })
            .collect();
        RobotView { snapshots }
    }

    /// Reports whether any of `entities` lies within `distance` of `cell`.
    #[must_use]
    pub fn too_near<'a, I>(cell: Position, distance: u32, entities: I) -> bool
    where
        I: IntoIterator<Item = &'a Tracked>,
    {
        entities
            .into_iter()
            .any(|entity| entity.position().distance_to(cell) <= distance)
    }

    /// Reports whether the player may step onto `cell`.
    #[must_use]
    pub fn is_valid_player_movement(world: &World, cell: Position) -> bool {
        world.field.contains(cell)
    }

    /// Reports whether a robot may step onto `cell`.
    #[must_use]
    pub fn is_valid_robot_movement(world: &World, cell: Position) -> bool {
        world.field.contains(cell) && !too_near(cell, 0, &world.robots)
    }

    /// Reports whether the player stands on an exit.
    #[must_use]
    pub fn is_player_on_exit(world: &World) -> bool {
        let player = world.player.position();
        world.exits.iter().any(|exit| exit.position() == player)
    }

    /// Reports whether a robot stands on the player.
    #[must_use]
    pub fn is_robot_on_player(world: &World) -> bool {
        let player = world.player.position();
        world.robots.iter().any(|robot| robot.position() == player)
    }

    /// Evaluates the game state; reaching an exit wins over being caught.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        if is_player_on_exit(world) {
            GameState::PlayerWon
        } else if is_robot_on_player(world) {
            GameState::RobotsWon
        } else {
            GameState::Running
        }
    }

    /// Picks a walkable cell satisfying `predicate` uniformly at random.
    pub fn random_valid_position<R, P>(
        world: &World,
        rng: &mut R,
        predicate: P,
    ) -> Result<Position, WorldError>
    where
        R: Rng + ?Sized,
        P: FnMut(Position) -> bool,
    {
        world
            .field
            .filter_positions(predicate)
            .choose(rng)
            .copied()
            .ok_or(WorldError::NoValidPosition)
    }

    /// Read-only snapshot describing all robots.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct RobotView {
        snapshots: Vec<RobotSnapshot>,
    }

    impl RobotView {
        /// Iterator over the captured robots in creation order.
        pub fn iter(&self) -> impl Iterator<Item = &RobotSnapshot> {
            self.snapshots.iter()
        }

        /// Reports whether a robot occupies `cell`.
        #[must_use]
        pub fn is_occupied(&self, cell: Position) -> bool {
            self.snapshots.iter().any(|snapshot| snapshot.cell == cell)
        }
    }

    /// Immutable representation of a single robot's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RobotSnapshot {
        /// Identifier assigned to the robot.
        pub id: RobotId,
        /// Cell currently occupied by the robot.
        pub cell: Position,
    }
}
