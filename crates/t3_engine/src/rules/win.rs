//! Win detection over an arbitrary board and match size.

use crate::patterns::winning_patterns;
use crate::types::{Board, Outcome, Square};
use tracing::{instrument, trace};

/// Checks every winning pattern in generation order.
///
/// Returns the first pattern whose cells all hold the same symbol,
/// together with that symbol, or `None` if nobody has won.
#[instrument(skip(board))]
pub fn evaluate_winner(board: &Board, board_size: usize, match_size: usize) -> Option<Outcome> {
    let patterns = winning_patterns(board_size, match_size);
    for pattern in patterns.iter() {
        let Some(&first) = pattern.first() else {
            continue;
        };
        let Some(Square::Occupied(player)) = board.get(first) else {
            continue;
        };
        if pattern
            .iter()
            .all(|&index| board.get(index) == Some(Square::Occupied(player)))
        {
            trace!(%player, ?pattern, "Winning pattern found");
            return Some(Outcome::win(player, pattern.clone()));
        }
    }
    None
}
