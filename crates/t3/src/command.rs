//! Line commands typed during an interactive session.

use derive_more::{Display, Error};
use std::path::PathBuf;
use std::str::FromStr;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a symbol at a 0-based cell index (typed 1-based).
    Play(usize),
    /// Retract the last move.
    Undo,
    /// Replay the last retracted move.
    Redo,
    /// Start a new board.
    NewBoard,
    /// Set every score back to zero.
    ClearScores,
    /// Change board size and optionally match size.
    Resize {
        /// New board size.
        board_size: usize,
        /// New match size; derived from the board size if absent.
        match_size: Option<usize>,
    },
    /// Write a snapshot to a file.
    Save(PathBuf),
    /// Replace the session with a snapshot from a file.
    Load(PathBuf),
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct CommandError {
    /// What was wrong with the input.
    pub message: String,
}

impl CommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn parse_size(word: Option<&str>, what: &str) -> Result<Option<usize>, CommandError> {
    word.map(|w| {
        w.parse::<usize>()
            .map_err(|_| CommandError::new(format!("{what} must be a number, got '{w}'")))
    })
    .transpose()
}

fn path_arg(rest: &[&str], verb: &str) -> Result<PathBuf, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::new(format!("usage: {verb} FILE")));
    }
    Ok(PathBuf::from(rest.join(" ")))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, rest)) = words.split_first() else {
            return Err(CommandError::new("empty command"));
        };

        if let Ok(cell) = verb.parse::<usize>() {
            if cell == 0 {
                return Err(CommandError::new("cells are numbered from 1"));
            }
            return Ok(Command::Play(cell - 1));
        }

        match verb.to_lowercase().as_str() {
            "u" | "undo" => Ok(Command::Undo),
            "r" | "redo" => Ok(Command::Redo),
            "n" | "new" => Ok(Command::NewBoard),
            "c" | "clear" => Ok(Command::ClearScores),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "size" => {
                let board_size = parse_size(rest.first().copied(), "board size")?
                    .ok_or_else(|| CommandError::new("usage: size BOARD [MATCH]"))?;
                let match_size = parse_size(rest.get(1).copied(), "match size")?;
                Ok(Command::Resize {
                    board_size,
                    match_size,
                })
            }
            "save" => Ok(Command::Save(path_arg(rest, "save")?)),
            "load" => Ok(Command::Load(path_arg(rest, "load")?)),
            other => Err(CommandError::new(format!(
                "unknown command '{other}' (type h for help)"
            ))),
        }
    }
}

/// Command list shown by `help`.
pub const HELP: &str = "\
Commands:
  <number>          place your symbol on that cell
  u, undo           take back the last move
  r, redo           replay a move you took back
  n, new            start a new board
  c, clear          reset the scores
  size N [M]        N x N board, M in a row
  save FILE         write the game to FILE
  load FILE         read the game from FILE
  h, help           show this list
  q, quit           leave";
