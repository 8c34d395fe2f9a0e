//! Status consistency invariant: status agrees with board and outcome.

use super::Invariant;
use crate::rules::is_full;
use crate::state::GameState;
use crate::types::GameStatus;

/// Invariant: the stored status is the one the board implies.
///
/// - `NotStarted` exactly when the board is empty.
/// - `Completed` exactly when there is a winner or the board is full.
/// - A winner always comes with its pattern.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let empty = state.board().occupied_count() == 0;
        let terminal = state.winner().is_some() || is_full(state.board());
        let outcome_paired = state.winner().is_some() == state.winning_pattern().is_some();

        let status_ok = match state.status() {
            GameStatus::NotStarted => empty && !terminal,
            GameStatus::InProgress => !empty && !terminal,
            GameStatus::Completed => terminal,
        };
        status_ok && outcome_paired
    }

    fn description() -> &'static str {
        "Status matches board occupancy and outcome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Player, Square};

    #[test]
    fn test_fresh_state_holds() {
        assert!(StatusConsistentInvariant::holds(&GameState::new(3)));
    }

    #[test]
    fn test_not_started_with_symbols_violates() {
        let mut state = GameState::new(3);
        state.board.set(0, Square::Occupied(Player::X)).unwrap();
        assert!(!StatusConsistentInvariant::holds(&state));

        state.status = GameStatus::InProgress;
        assert!(StatusConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_winner_without_pattern_violates() {
        let mut state = GameState::new(3);
        state.board.set(0, Square::Occupied(Player::X)).unwrap();
        state.status = GameStatus::Completed;
        state.winner = Some(Player::X);
        assert!(!StatusConsistentInvariant::holds(&state));

        state.winning_pattern = Some(vec![0, 1, 2]);
        assert!(StatusConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_completed_without_outcome_violates() {
        let mut state = GameState::new(3);
        state.board.set(0, Square::Occupied(Player::X)).unwrap();
        state.status = GameStatus::Completed;
        assert!(!StatusConsistentInvariant::holds(&state));
    }
}
