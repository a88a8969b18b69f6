#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Robot Escape game in the terminal.

mod config;
mod console;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robot_escape_rendering::TerminalPresenter;
use robot_escape_system_placement::Placement;
use robot_escape_system_turn::Logic;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{config::GameConfig, console::Console};

/// Run to the exit before the robots catch you.
#[derive(Debug, Parser)]
#[command(name = "robot-escape", version)]
struct CliArgs {
    /// Path to the TOML file describing the field.
    config: PathBuf,
    /// Overrides the number of robots from the configuration.
    #[arg(long)]
    robots: Option<usize>,
    /// Seed for a reproducible game; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Prints plain glyphs without ANSI colour escapes.
    #[arg(long)]
    no_color: bool,
}

/// Entry point for the Robot Escape command-line interface.
fn main() -> ExitCode {
    init_tracing();
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("robot escape failed: {err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = GameConfig::load(&args.config)?;
    if let Some(robots) = args.robots {
        config.set_robots(robots);
    }
    info!(
        path = %args.config.display(),
        rooms = config.rooms().len(),
        robots = config.robots(),
        "configuration loaded"
    );

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let placement = Placement::new(config.placement());
    let mut logic = Logic::generate(config.field(), &placement, rng)
        .context("could not set up the game world")?;

    let presenter = TerminalPresenter::new(io::stdout(), !args.no_color);
    let outcome = Console::new(io::stdin().lock(), io::stdout(), presenter).play(&mut logic)?;
    info!(?outcome, ticks = logic.ticks(), "game finished");
    Ok(())
}
