//! Hook for computer-controlled players.
//!
//! The engine enumerates legal moves and accepts a chosen one; choosing
//! well is up to the selector. Only the trivial selector ships here.

use crate::engine::GameEngine;
use crate::error::IndexError;
use crate::types::Move;
use tracing::{debug, instrument};

/// Picks a cell for the player to move.
pub trait MoveSelector {
    /// Returns the chosen cell, or `None` if there is nothing to play.
    fn select(&mut self, engine: &GameEngine) -> Option<usize>;

    /// Returns the selector's display name.
    fn name(&self) -> &str;
}

/// Selector that picks the first available square.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl MoveSelector for FirstAvailable {
    fn select(&mut self, engine: &GameEngine) -> Option<usize> {
        engine.legal_moves().first().copied()
    }

    fn name(&self) -> &str {
        "first available"
    }
}

impl GameEngine {
    /// Asks `selector` for a cell and plays it.
    ///
    /// Returns `Ok(None)` if the selector has no move or picks an
    /// unavailable cell.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the selector picks a cell outside the board.
    #[instrument(skip(self, selector), fields(selector = selector.name()))]
    pub fn make_selected_move<S: MoveSelector + ?Sized>(
        &mut self,
        selector: &mut S,
    ) -> Result<Option<Move>, IndexError> {
        let Some(index) = selector.select(self) else {
            debug!("Selector had no move");
            return Ok(None);
        };
        debug!(index, "Selector chose cell");
        self.make_move(index)
    }
}
