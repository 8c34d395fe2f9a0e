//! Board and match size configuration.
//!
//! Configuration has value semantics: an update builds a fresh
//! [`GameConfig`], validates it, and only then does the engine commit it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board size used when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Smallest legal board size and match size.
pub const MIN_SIZE: usize = 3;

/// Largest legal board size.
pub const MAX_BOARD_SIZE: usize = 32;

/// Boards at least this large must not be won with three in a row.
pub const LARGE_BOARD_SIZE: usize = 4;

/// Smallest match size allowed on a large board.
pub const LARGE_BOARD_MIN_MATCH: usize = 4;

/// Match size used when only a board size is given.
pub fn default_match_size(board_size: usize) -> usize {
    if board_size >= LARGE_BOARD_SIZE {
        LARGE_BOARD_MIN_MATCH
    } else {
        MIN_SIZE
    }
}

/// Result of checking a board/match size pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// True if the pair is playable.
    pub ok: bool,
    /// Why the pair was rejected; empty when `ok`.
    pub message: &'static str,
}

impl Validation {
    fn accept() -> Self {
        Self { ok: true, message: "" }
    }

    fn reject(message: &'static str) -> Self {
        Self { ok: false, message }
    }
}

/// Checks a board/match size pair without failing.
pub fn validate_config(board_size: usize, match_size: usize) -> Validation {
    if board_size < MIN_SIZE || match_size < MIN_SIZE {
        return Validation::reject("Board size and match size must be at least 3.");
    }
    if board_size > MAX_BOARD_SIZE {
        return Validation::reject("Board size cannot be greater than 32.");
    }
    if match_size > board_size {
        return Validation::reject("Match size cannot be greater than board size.");
    }
    if board_size >= LARGE_BOARD_SIZE && match_size < LARGE_BOARD_MIN_MATCH {
        return Validation::reject(
            "For a board size of 4 or more, the match size must be at least 4.",
        );
    }
    Validation::accept()
}

/// A validated board/match size pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    board_size: usize,
    match_size: usize,
}

impl GameConfig {
    /// Creates a configuration, rejecting invalid combinations.
    #[track_caller]
    #[instrument]
    pub fn new(board_size: usize, match_size: usize) -> Result<Self, ConfigError> {
        let validation = validate_config(board_size, match_size);
        if !validation.ok {
            debug!(board_size, match_size, reason = validation.message, "Config rejected");
            return Err(ConfigError::new(validation.message));
        }
        Ok(Self {
            board_size,
            match_size,
        })
    }

    /// Builds a configuration from a partial one, filling defaults.
    #[track_caller]
    #[instrument]
    pub fn from_update(update: ConfigUpdate) -> Result<Self, ConfigError> {
        let board_size = update.board_size.unwrap_or(DEFAULT_BOARD_SIZE);
        let match_size = update
            .match_size
            .unwrap_or_else(|| default_match_size(board_size));
        Self::new(board_size, match_size)
    }

    /// Returns a new configuration with `update` merged in.
    ///
    /// A new board size without a match size re-derives the match size
    /// from the default rule. `self` is never modified.
    #[track_caller]
    #[instrument(skip(self), fields(board_size = self.board_size, match_size = self.match_size))]
    pub fn merged(&self, update: ConfigUpdate) -> Result<Self, ConfigError> {
        let board_size = update.board_size.unwrap_or(self.board_size);
        let match_size = match (update.board_size, update.match_size) {
            (_, Some(match_size)) => match_size,
            (Some(board_size), None) => default_match_size(board_size),
            (None, None) => self.match_size,
        };
        Self::new(board_size, match_size)
    }

    /// Rows (and columns) on the board.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Symbols in a row needed to win.
    pub fn match_size(&self) -> usize {
        self.match_size
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            match_size: MIN_SIZE,
        }
    }
}

impl std::fmt::Display for GameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{0}x{0} board, {1} in a row",
            self.board_size, self.match_size
        )
    }
}

/// Partial configuration; omitted fields keep or derive their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    /// New board size.
    pub board_size: Option<usize>,
    /// New match size.
    pub match_size: Option<usize>,
}

impl ConfigUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = Some(board_size);
        self
    }

    /// Sets the match size.
    pub fn with_match_size(mut self, match_size: usize) -> Self {
        self.match_size = Some(match_size);
        self
    }
}

/// One selectable match size for a board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSizeOption {
    /// Candidate match size.
    pub match_size: usize,
    /// Whether the pair passes [`validate_config`].
    pub available: bool,
}

/// Marks each candidate match size as available or not for `board_size`.
pub fn match_size_options(
    board_size: usize,
    candidates: impl IntoIterator<Item = usize>,
) -> Vec<MatchSizeOption> {
    candidates
        .into_iter()
        .map(|match_size| MatchSizeOption {
            match_size,
            available: validate_config(board_size, match_size).ok,
        })
        .collect()
}

/// Keeps `current` if it is still available for `board_size`,
/// otherwise falls back to the first available candidate.
pub fn preferred_match_size(
    board_size: usize,
    current: usize,
    candidates: impl IntoIterator<Item = usize>,
) -> Option<usize> {
    let options = match_size_options(board_size, candidates);
    if options
        .iter()
        .any(|option| option.available && option.match_size == current)
    {
        return Some(current);
    }
    options
        .iter()
        .find(|option| option.available)
        .map(|option| option.match_size)
}
