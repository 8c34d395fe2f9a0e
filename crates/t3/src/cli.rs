//! Command-line interface for t3.

use crate::settings::{AiDifficulty, GameMode};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use t3_engine::Player;

/// t3 - N-in-a-row in the terminal
#[derive(Parser, Debug)]
#[command(name = "t3")]
#[command(about = "Tic-tac-toe on any board size", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game
    Play(PlayArgs),

    /// List which match sizes can be chosen for a board size
    Options {
        /// Board size to check
        #[arg(short, long, default_value = "3")]
        board_size: usize,
    },
}

/// Options for `t3 play`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PlayArgs {
    /// Board size (rows and columns)
    #[arg(short, long)]
    pub board_size: Option<usize>,

    /// Symbols in a row needed to win
    #[arg(short, long)]
    pub match_size: Option<usize>,

    /// Single player against the computer, or two players
    #[arg(long, value_enum)]
    pub mode: Option<GameMode>,

    /// Side the computer plays in single player mode (x or o)
    #[arg(long)]
    pub ai_plays_as: Option<Player>,

    /// Computer strength
    #[arg(long, value_enum)]
    pub difficulty: Option<AiDifficulty>,

    /// Settings file (TOML); missing files are ignored
    #[arg(long, default_value = "t3.toml")]
    pub settings: PathBuf,

    /// Snapshot file to resume from
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    pub save_settings: bool,
}
