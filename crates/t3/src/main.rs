//! t3 - unified CLI
//!
//! Interactive N-in-a-row in the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use t3::{Cli, CliCommand, PlayArgs, Session, Settings};
use t3_engine::{MAX_BOARD_SIZE, MIN_SIZE, match_size_options};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        CliCommand::Play(args) => run_play(args),
        CliCommand::Options { board_size } => run_options(board_size),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument]
fn run_play(args: PlayArgs) -> Result<()> {
    let settings = if args.settings.exists() {
        Settings::from_file(&args.settings)?
    } else {
        Settings::default()
    };
    let settings = settings.with_overrides(
        args.board_size,
        args.match_size,
        args.mode,
        args.ai_plays_as,
        args.difficulty,
    );

    let mut session = Session::new(settings).context("Invalid board settings")?;
    if args.save_settings {
        session.settings().to_file(&args.settings)?;
        info!(path = %args.settings.display(), "Settings saved");
    }
    if let Some(path) = &args.load {
        session
            .load_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }

    info!(config = %session.engine().config(), "Starting game");
    let stdin = std::io::stdin();
    t3::run(&mut session, stdin.lock(), std::io::stdout())
}

/// Print which match sizes are selectable for a board size
fn run_options(board_size: usize) -> Result<()> {
    let largest = board_size.clamp(MIN_SIZE, MAX_BOARD_SIZE);
    for option in match_size_options(board_size, MIN_SIZE..=largest) {
        if option.available {
            println!("{}", option.match_size);
        } else {
            println!("{} (not available)", option.match_size);
        }
    }
    Ok(())
}
