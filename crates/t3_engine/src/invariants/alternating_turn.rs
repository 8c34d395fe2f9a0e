//! Alternating turn invariant: X moves first and players take turns.

use super::Invariant;
use crate::state::GameState;
use crate::types::Player;

/// Invariant: X has the same number of symbols as O, or one more.
///
/// While the game is open the player to move is the one with fewer
/// symbols (X on a tie). Once completed, the current player is the one
/// who made the last move.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);
        let next = match x.checked_sub(o) {
            Some(0) => Player::X,
            Some(1) => Player::O,
            _ => return false,
        };
        if state.is_game_over() {
            state.current_player() == next.opponent()
        } else {
            state.current_player() == next
        }
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
