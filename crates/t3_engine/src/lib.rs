//! Pure N-in-a-row game logic.
//!
//! A generalized tic-tac-toe engine: square boards of any size, a
//! configurable number of symbols in a row to win, undo/redo history and
//! score tallying across games. The engine performs no I/O; a front end
//! drives it and reads its state back.
//!
//! # Example
//!
//! ```
//! use t3_engine::{ConfigUpdate, GameEngine, GameStatus, Player};
//!
//! let mut engine = GameEngine::new(ConfigUpdate::new()).unwrap();
//! for index in [0, 4, 1, 3, 2] {
//!     engine.make_move(index).unwrap();
//! }
//! assert_eq!(engine.status(), GameStatus::Completed);
//! assert_eq!(engine.winner(), Some(Player::X));
//! assert_eq!(engine.winning_pattern(), Some(&[0, 1, 2][..]));
//! assert_eq!(engine.scores().x, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
pub mod invariants;
mod patterns;
pub mod rules;
mod snapshot;
mod state;
mod strategy;
mod types;

pub use config::{
    ConfigUpdate, DEFAULT_BOARD_SIZE, GameConfig, LARGE_BOARD_MIN_MATCH, LARGE_BOARD_SIZE,
    MAX_BOARD_SIZE, MIN_SIZE, MatchSizeOption, Validation, default_match_size, match_size_options,
    preferred_match_size, validate_config,
};
pub use engine::GameEngine;
pub use error::{ConfigError, EngineError, IndexError, SnapshotError};
pub use patterns::{Pattern, generate_patterns, pattern_count, winning_patterns};
pub use rules::{evaluate_winner, is_full};
pub use snapshot::Snapshot;
pub use state::GameState;
pub use strategy::{FirstAvailable, MoveSelector};
pub use types::{Board, GameStatus, Move, Outcome, Player, Scores, Square};
