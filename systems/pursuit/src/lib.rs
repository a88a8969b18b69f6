#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy pursuit system that proposes one step per robot toward the player.

use rand::{seq::SliceRandom, Rng};
use robot_escape_core::{Command, Direction, Position};
use robot_escape_world::query::{RobotSnapshot, RobotView};

/// Pure system that turns a robot snapshot into step commands.
///
/// Every robot is planned against the cells the robots held when the view was
/// captured. A destination already claimed by an earlier robot in the same
/// pass is skipped as well, so two robots never end up sharing a cell.
#[derive(Debug, Default)]
pub struct Pursuit {
    claimed: Vec<Position>,
    candidates: Vec<Direction>,
}

impl Pursuit {
    /// Emits a [`Command::StepRobot`] for every robot that has somewhere to go.
    pub fn handle<F, R>(
        &mut self,
        robot_view: &RobotView,
        player: Position,
        is_walkable: F,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        F: Fn(Position) -> bool,
        R: Rng + ?Sized,
    {
        self.claimed.clear();

        for robot in robot_view.iter() {
            if robot.cell == player {
                continue;
            }

            self.collect_candidates(robot, robot_view, player, &is_walkable);
            let Some(&direction) = self.candidates.choose(rng) else {
                continue;
            };

            self.claimed.push(robot.cell.step(direction));
            out.push(Command::StepRobot {
                robot: robot.id,
                direction,
            });
        }
    }

    fn collect_candidates<F>(
        &mut self,
        robot: &RobotSnapshot,
        robot_view: &RobotView,
        player: Position,
        is_walkable: &F,
    ) where
        F: Fn(Position) -> bool,
    {
        self.candidates.clear();
        let mut best = u32::MAX;

        for direction in Direction::ALL {
            let target = robot.cell.step(direction);
            if !is_walkable(target)
                || robot_view.is_occupied(target)
                || self.claimed.contains(&target)
            {
                continue;
            }

            let distance = target.distance_to(player);
            if distance < best {
                best = distance;
                self.candidates.clear();
            }
            if distance == best {
                self.candidates.push(direction);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use robot_escape_core::Rectangle;
    use robot_escape_world::{self as world, query, Field, World};

    fn world_with_robots(room: Rectangle, robots: &[Position]) -> World {
        let mut world = World::new(Field::from_rectangles([room]));
        let mut events = Vec::new();
        for &cell in robots {
            world::apply(&mut world, Command::AddRobot { cell }, &mut events);
        }
        world
    }

    fn plan(world: &World, player: Position, seed: u64) -> Vec<Command> {
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut out = Vec::new();
        let field = query::field(world);
        pursuit.handle(
            &query::robot_view(world),
            player,
            |cell| field.contains(cell),
            &mut rng,
            &mut out,
        );
        out
    }

    #[test]
    fn candidates_keep_every_minimal_direction() {
        let world = world_with_robots(Rectangle::new(0, 0, 5, 5), &[Position::new(0, 0)]);
        let view = query::robot_view(&world);
        let robot = view.iter().next().copied().expect("one robot");
        let field = query::field(&world);

        let mut pursuit = Pursuit::default();
        let is_walkable = |cell: Position| field.contains(cell);
        pursuit.collect_candidates(&robot, &view, Position::new(3, 3), &is_walkable);

        assert_eq!(pursuit.candidates, vec![Direction::East, Direction::South]);
    }

    #[test]
    fn robot_moves_away_when_only_farther_cells_are_free() {
        let world = world_with_robots(
            Rectangle::new(0, 0, 3, 1),
            &[Position::new(1, 0), Position::new(2, 0)],
        );
        let commands = plan(&world, Position::new(2, 0), 0);

        assert_eq!(
            commands,
            vec![Command::StepRobot {
                robot: robot_escape_core::RobotId::new(0),
                direction: Direction::West,
            }]
        );
    }
}
