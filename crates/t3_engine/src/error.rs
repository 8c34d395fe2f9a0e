//! Error types for the engine.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// Invalid board size / match size combination.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Cell index outside `[0, board_size²)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Cell index {} is out of range (board has {} cells)", index, cell_count)]
pub struct IndexError {
    /// The rejected index.
    pub index: usize,
    /// Number of cells on the board.
    pub cell_count: usize,
}

impl IndexError {
    /// Creates a new index error.
    pub fn new(index: usize, cell_count: usize) -> Self {
        Self { index, cell_count }
    }
}

/// Snapshot could not be decoded or does not describe a reachable state.
#[derive(Debug, Display, Error)]
pub enum SnapshotError {
    /// The JSON text is malformed or has the wrong shape.
    #[display("Snapshot JSON error: {}", _0)]
    Json(serde_json::Error),
    /// The stored configuration breaks the size rules.
    #[display("Snapshot config rejected: {}", _0)]
    Config(ConfigError),
    /// Board, history or status disagree with each other.
    #[display("Inconsistent snapshot: {}", _0)]
    Inconsistent(#[error(not(source))] String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Error from constructing, reconfiguring or playing on an engine.
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// Configuration rejected.
    #[display("{}", _0)]
    Config(ConfigError),
    /// Cell index out of range.
    #[display("{}", _0)]
    Index(IndexError),
}
