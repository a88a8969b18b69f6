//! Line-based console loop: prompts, reads moves and reports the outcome.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use robot_escape_core::{Direction, GameState, PlayerInput};
use robot_escape_rendering::{render_frame, Presenter};
use robot_escape_system_turn::{player_forfeited, Logic};
use robot_escape_world::query;

const TITLE: &str =
    "----------------------------==[ ROBOT ESCAPE ]==-----------------------------";
const LEGEND: &str =
    "You (☻) must run to the exit (⚑) before any robot (♟) catches you.";
const PROMPT: &str = "Enter your move (n/e/s/w/q=quit): ";
const INVALID_INPUT: &str = "Invalid input. Please try again.";
const FORFEITED: &str = "Could not move in this direction. You lost one move.";

/// How a game session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The player reached an exit.
    Won,
    /// A robot caught the player.
    Lost,
    /// The player quit or input ended.
    Quit,
}

impl Outcome {
    fn message(self) -> &'static str {
        match self {
            Self::Won => "You won!",
            Self::Lost => "You lost!",
            Self::Quit => "Goodbye!",
        }
    }
}

/// Maps a line of console input onto a player command.
pub(crate) fn parse_input(line: &str) -> Option<PlayerInput> {
    match line.trim().to_ascii_lowercase().as_str() {
        "n" => Some(PlayerInput::Move(Direction::North)),
        "e" => Some(PlayerInput::Move(Direction::East)),
        "s" => Some(PlayerInput::Move(Direction::South)),
        "w" => Some(PlayerInput::Move(Direction::West)),
        "q" => Some(PlayerInput::Quit),
        _ => None,
    }
}

/// Console session wiring input, text output and a frame presenter together.
pub(crate) struct Console<I, O, P> {
    input: I,
    output: O,
    presenter: P,
}

impl<I, O, P> Console<I, O, P>
where
    I: BufRead,
    O: Write,
    P: Presenter,
{
    pub(crate) fn new(input: I, output: O, presenter: P) -> Self {
        Self {
            input,
            output,
            presenter,
        }
    }

    /// Plays until the game ends or the player quits.
    pub(crate) fn play<R>(&mut self, logic: &mut Logic<R>) -> Result<Outcome>
    where
        R: Rng,
    {
        writeln!(self.output, "{TITLE}")?;
        writeln!(self.output, "{}", query::welcome_banner(logic.world()))?;
        writeln!(self.output, "{LEGEND}\n")?;
        self.output.flush()?;
        self.present(logic)?;

        let outcome = loop {
            match logic.game_state() {
                GameState::PlayerWon => break Outcome::Won,
                GameState::RobotsWon => break Outcome::Lost,
                GameState::Running => {}
            }

            let direction = match self.read_input()? {
                PlayerInput::Move(direction) => direction,
                PlayerInput::Quit => break Outcome::Quit,
            };
            let events = logic.advance(direction);
            if player_forfeited(&events) {
                writeln!(self.output, "{FORFEITED}")?;
                self.output.flush()?;
            }
            self.present(logic)?;
        };

        writeln!(self.output, "{}", outcome.message())?;
        self.output.flush()?;
        Ok(outcome)
    }

    fn present<R>(&mut self, logic: &Logic<R>) -> Result<()>
    where
        R: Rng,
    {
        let canvas = render_frame(logic.world()).context("failed to build the frame")?;
        self.presenter.present(&canvas)
    }

    fn read_input(&mut self) -> Result<PlayerInput> {
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read player input")?;
            if read == 0 {
                return Ok(PlayerInput::Quit);
            }
            if let Some(input) = parse_input(&line) {
                return Ok(input);
            }
            writeln!(self.output, "{INVALID_INPUT}")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use robot_escape_core::{Command, Position, Rectangle};
    use robot_escape_rendering::TerminalPresenter;
    use robot_escape_world::{self as world, Field, World};

    fn corridor() -> Logic<ChaCha8Rng> {
        let mut world = World::new(Field::from_rectangles([Rectangle::new(0, 0, 10, 1)]));
        let mut events = Vec::new();
        for command in [
            Command::AddExit {
                cell: Position::new(3, 0),
            },
            Command::PlacePlayer {
                cell: Position::new(0, 0),
            },
        ] {
            world::apply(&mut world, command, &mut events);
        }
        Logic::new(world, ChaCha8Rng::seed_from_u64(0))
    }

    fn session(input: &str) -> (Outcome, String) {
        let mut logic = corridor();
        let mut output = Vec::new();
        let outcome = Console::new(
            input.as_bytes(),
            &mut output,
            TerminalPresenter::new(std::io::sink(), false),
        )
        .play(&mut logic)
        .expect("in-memory session");
        (outcome, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn parses_move_letters_case_insensitively() {
        assert_eq!(parse_input("n\n"), Some(PlayerInput::Move(Direction::North)));
        assert_eq!(parse_input(" E "), Some(PlayerInput::Move(Direction::East)));
        assert_eq!(parse_input("q"), Some(PlayerInput::Quit));
        assert_eq!(parse_input("north"), None);
        assert_eq!(parse_input(""), None);
    }

    #[test]
    fn walking_to_the_exit_wins() {
        let (outcome, output) = session("e\ne\ne\n");
        assert_eq!(outcome, Outcome::Won);
        assert!(output.starts_with(TITLE));
        assert!(output.ends_with("You won!\n"));
    }

    #[test]
    fn unknown_input_reprompts_without_a_tick() {
        let (outcome, output) = session("x\nq\n");
        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(output.matches(INVALID_INPUT).count(), 1);
        assert_eq!(output.matches(PROMPT).count(), 2);
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn blocked_moves_are_reported() {
        let (_, output) = session("n\nq\n");
        assert!(output.contains(FORFEITED));
    }

    #[test]
    fn end_of_input_quits() {
        let (outcome, _) = session("e\n");
        assert_eq!(outcome, Outcome::Quit);
    }
}
