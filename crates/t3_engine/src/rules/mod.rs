//! Game rules for N-in-a-row.
//!
//! Pure functions for evaluating a board. Rules are separated from board
//! storage so the engine, invariants and tests can share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::evaluate_winner;
