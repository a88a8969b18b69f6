#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn engine that owns the world and advances it one tick at a time.
//!
//! A tick applies the player's single move and then lets the pursuit system
//! step every robot in creation order. The game state is evaluated once the
//! tick has settled.

use rand::Rng;
use robot_escape_core::{Command, Direction, Event, GameState};
use robot_escape_system_placement::{Placement, PlacementError};
use robot_escape_system_pursuit::Pursuit;
use robot_escape_world::{self as world, query, Field, World};
use tracing::{debug, trace};

/// Drives a populated world through player and robot moves.
#[derive(Debug)]
pub struct Logic<R> {
    world: World,
    pursuit: Pursuit,
    rng: R,
    state: GameState,
    ticks: u64,
}

impl<R> Logic<R>
where
    R: Rng,
{
    /// Wraps an already populated world.
    pub fn new(world: World, rng: R) -> Self {
        let state = query::game_state(&world);
        Self {
            world,
            pursuit: Pursuit::default(),
            rng,
            state,
            ticks: 0,
        }
    }

    /// Builds a world over `field`, seeds it with `placement` and wraps it.
    pub fn generate(
        field: Field,
        placement: &Placement,
        mut rng: R,
    ) -> Result<Self, PlacementError> {
        let mut world = World::new(field);
        let mut events = Vec::new();
        placement.populate(&mut world, &mut rng, &mut events)?;
        debug!(placed = events.len(), "world generated");
        Ok(Self::new(world, rng))
    }

    /// Advances a single tick with the player stepping in `direction`.
    ///
    /// Returns every event the tick produced, in the order the world reported
    /// them. Once the game has ended the world no longer changes and no events
    /// are produced.
    pub fn advance(&mut self, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state.is_terminal() {
            return events;
        }

        world::apply(
            &mut self.world,
            Command::MovePlayer { direction },
            &mut events,
        );
        for event in &events {
            if let Event::PlayerMoveForfeited { direction, target } = event {
                trace!(?direction, x = target.x, y = target.y, "player move forfeited");
            }
        }

        let player = query::player(&self.world).position();
        let robot_view = query::robot_view(&self.world);
        let field = query::field(&self.world);
        let mut commands = Vec::new();
        self.pursuit.handle(
            &robot_view,
            player,
            |cell| field.contains(cell),
            &mut self.rng,
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.ticks += 1;
        self.state = query::game_state(&self.world);
        debug!(
            tick = self.ticks,
            ?direction,
            events = events.len(),
            state = ?self.state,
            "tick advanced"
        );
        events
    }

    /// State of the game after the most recent tick.
    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// Number of ticks advanced so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Read-only access to the world for presentation.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }
}

/// Reports whether the player's move was forfeited during a tick.
#[must_use]
pub fn player_forfeited(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::PlayerMoveForfeited { .. }))
}
