//! Terminal front end for the t3 N-in-a-row engine.
//!
//! # Architecture
//!
//! - **Settings**: TOML file plus command-line overrides
//! - **Command**: parsing of the lines a player types
//! - **Session**: owns one engine and the computer player, turns commands into replies
//! - **Repl**: reads lines, asks for confirmation, prints the board

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod command;
mod repl;
mod session;
mod settings;

pub use cli::{Cli, Command as CliCommand, PlayArgs};
pub use command::{Command, CommandError, HELP};
pub use repl::run;
pub use session::{Confirmation, Reply, Session};
pub use settings::{AiDifficulty, GameMode, Settings, SettingsError};
