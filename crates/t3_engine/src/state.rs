//! Per-board game state.

use crate::patterns::Pattern;
use crate::types::{Board, GameStatus, Move, Player};
use serde::{Deserialize, Serialize};

/// Everything that is reset when a new board starts.
///
/// Scores and configuration live on the engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) winner: Option<Player>,
    pub(crate) winning_pattern: Option<Pattern>,
    pub(crate) status: GameStatus,
    pub(crate) undo_stack: Vec<Move>,
    pub(crate) redo_stack: Vec<Move>,
}

impl GameState {
    /// Creates a fresh state for a board of `board_size`.
    pub fn new(board_size: usize) -> Self {
        Self {
            board: Board::new(board_size),
            current_player: Player::X,
            winner: None,
            winning_pattern: None,
            status: GameStatus::NotStarted,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move (or the last mover once completed).
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the completed line, if any.
    pub fn winning_pattern(&self) -> Option<&[usize]> {
        self.winning_pattern.as_deref()
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Moves applied, most recent last.
    pub fn undo_stack(&self) -> &[Move] {
        &self.undo_stack
    }

    /// Moves retracted, most recent last.
    pub fn redo_stack(&self) -> &[Move] {
        &self.redo_stack
    }

    /// Returns true once the board is won or drawn.
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub(crate) fn clear_outcome(&mut self) {
        self.winner = None;
        self.winning_pattern = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BOARD_SIZE)
    }
}
