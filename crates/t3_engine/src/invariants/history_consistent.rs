//! History consistency invariant: the undo stack explains the board exactly.

use super::Invariant;
use crate::state::GameState;
use crate::types::Square;

/// Invariant: every applied move is on the board and nothing else is.
///
/// The undo stack holds one entry per occupied cell, each entry's cell
/// holds that entry's player, and no cell appears twice.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        if state.undo_stack().len() != board.occupied_count() {
            return false;
        }
        state
            .undo_stack()
            .iter()
            .all(|mv| board.get(mv.index) == Some(Square::Occupied(mv.player)))
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}
