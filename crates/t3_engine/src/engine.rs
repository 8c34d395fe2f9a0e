//! The N-in-a-row game engine.
//!
//! Owns configuration, board state, undo/redo history and scores. All
//! operations are synchronous in-memory mutations. A rejected move or an
//! empty history is a no-op that returns `None`; only a cell index outside
//! the board is an error.

use crate::config::{ConfigUpdate, GameConfig};
use crate::error::{ConfigError, IndexError};
use crate::invariants::{GameInvariants, InvariantSet, describe};
use crate::rules::{evaluate_winner, is_full};
use crate::state::GameState;
use crate::types::{Board, GameStatus, Move, Outcome, Player, Scores, Square};
use tracing::{debug, info, instrument, warn};

/// N-in-a-row game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    pub(crate) config: GameConfig,
    pub(crate) state: GameState,
    pub(crate) scores: Scores,
}

impl GameEngine {
    /// Creates an engine from a partial configuration.
    ///
    /// Omitted fields are filled with defaults: board size 3, match size 4
    /// on boards of 4 or more and 3 otherwise. Unplayable sizes are a
    /// [`ConfigError`].
    #[track_caller]
    #[instrument]
    pub fn new(update: ConfigUpdate) -> Result<Self, ConfigError> {
        let config = GameConfig::from_update(update)?;
        Ok(Self::with_config(config))
    }

    /// Creates an engine from an already validated configuration.
    #[instrument]
    pub fn with_config(config: GameConfig) -> Self {
        info!(%config, "Creating game engine");
        Self {
            config,
            state: GameState::new(config.board_size()),
            scores: Scores::default(),
        }
    }

    /// Merges `update` into the configuration and starts a new board.
    ///
    /// Scores are kept. On error the previous configuration stays in place
    /// and the board is not touched.
    #[track_caller]
    #[instrument(skip(self), fields(current = %self.config))]
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<(), ConfigError> {
        let config = self.config.merged(update)?;
        info!(%config, "Configuration updated");
        self.config = config;
        self.reset_board();
        Ok(())
    }

    /// Returns the configuration.
    pub fn config(&self) -> GameConfig {
        self.config
    }

    fn check_index(&self, index: usize) -> Result<(), IndexError> {
        let cell_count = self.config.cell_count();
        if index < cell_count {
            Ok(())
        } else {
            Err(IndexError::new(index, cell_count))
        }
    }

    /// True if the cell is empty and the game is not over.
    pub fn is_move_available(&self, index: usize) -> Result<bool, IndexError> {
        self.check_index(index)?;
        Ok(!self.state.is_game_over() && self.state.board.is_empty(index))
    }

    /// Places the current player's symbol at `index`.
    ///
    /// Returns `Ok(None)` without side effects if the cell is occupied or
    /// the game is over, and [`IndexError`] if `index` is off the board.
    #[instrument(skip(self), fields(player = %self.state.current_player))]
    pub fn make_move(&mut self, index: usize) -> Result<Option<Move>, IndexError> {
        if !self.is_move_available(index)? {
            debug!(status = %self.state.status, "Move rejected");
            return Ok(None);
        }

        let mv = Move::new(index, self.state.current_player);
        self.state.board.set(index, Square::Occupied(mv.player))?;
        self.state.undo_stack.push(mv);
        self.state.redo_stack.clear();
        self.state.status = GameStatus::InProgress;
        debug!(%mv, "Move applied");

        self.handle_move_outcome();
        self.debug_check_invariants();
        Ok(Some(mv))
    }

    /// Retracts the most recent move.
    ///
    /// The player who made it becomes the player to move. If the move had
    /// ended the game, the matching score bucket loses a point (never below
    /// zero) and the game reopens.
    #[instrument(skip(self), fields(history = self.state.undo_stack.len()))]
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = *self.state.undo_stack.last()?;
        if let Err(e) = self.state.board.set(mv.index, Square::Empty) {
            warn!(error = %e, "Undo stack entry outside board");
            return None;
        }
        self.state.undo_stack.pop();
        self.state.redo_stack.push(mv);

        if self.state.is_game_over() {
            self.scores.decrement(self.state.winner);
            debug!(winner = ?self.state.winner, "Reopened completed game");
        }
        self.state.clear_outcome();
        self.state.current_player = mv.player;
        self.state.status = if self.state.undo_stack.is_empty() {
            GameStatus::NotStarted
        } else {
            GameStatus::InProgress
        };

        debug!(%mv, "Move undone");
        self.debug_check_invariants();
        Some(mv)
    }

    /// Replays the most recently retracted move.
    ///
    /// Outcome evaluation runs exactly as after a fresh move. Nothing is
    /// replayed once the game is over.
    #[instrument(skip(self), fields(pending = self.state.redo_stack.len()))]
    pub fn redo_move(&mut self) -> Option<Move> {
        if self.state.is_game_over() {
            debug!("Redo rejected on completed game");
            return None;
        }
        let mv = *self.state.redo_stack.last()?;
        if mv.player != self.state.current_player || !self.state.board.is_empty(mv.index) {
            warn!(%mv, "Redo stack entry does not fit the board");
            return None;
        }
        if let Err(e) = self.state.board.set(mv.index, Square::Occupied(mv.player)) {
            warn!(error = %e, "Redo stack entry outside board");
            return None;
        }
        self.state.redo_stack.pop();
        self.state.undo_stack.push(mv);
        self.state.status = GameStatus::InProgress;

        debug!(%mv, "Move redone");
        self.handle_move_outcome();
        self.debug_check_invariants();
        Some(mv)
    }

    /// Decides whether the last placement ended the game.
    fn handle_move_outcome(&mut self) {
        let config = self.config;
        let outcome = evaluate_winner(
            &self.state.board,
            config.board_size(),
            config.match_size(),
        )
        .or_else(|| is_full(&self.state.board).then(Outcome::draw));

        let Some(outcome) = outcome else {
            self.state.current_player = self.state.current_player.opponent();
            return;
        };
        if outcome.is_draw() {
            info!("Game drawn");
        } else {
            info!(winner = ?outcome.winner, pattern = ?outcome.winning_pattern, "Game won");
        }
        self.scores.increment(outcome.winner);
        self.state.winner = outcome.winner;
        self.state.winning_pattern = outcome.winning_pattern;
        self.state.status = GameStatus::Completed;
    }

    /// Indices of empty cells in ascending order; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.state.is_game_over() {
            return Vec::new();
        }
        self.state.board.empty_indices()
    }

    /// Starts a new, empty board. Configuration and scores are kept.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) {
        debug!(board_size = self.config.board_size(), "Resetting board");
        self.state = GameState::new(self.config.board_size());
    }

    /// Overwrites the score record.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self, scores: Scores) {
        self.scores = scores;
    }

    /// Sets every score bucket back to zero.
    pub fn clear_scores(&mut self) {
        self.reset_scores(Scores::default());
    }

    /// Returns the per-board state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Returns the player to move (or the last mover once completed).
    pub fn current_player(&self) -> Player {
        self.state.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.state.winner
    }

    /// Returns the completed line, if any.
    pub fn winning_pattern(&self) -> Option<&[usize]> {
        self.state.winning_pattern()
    }

    /// Returns true once the board is won or drawn.
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Returns true while moves have been made and the game is open.
    pub fn is_in_progress(&self) -> bool {
        self.state.status == GameStatus::InProgress
    }

    /// Returns the scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Moves applied, most recent last.
    pub fn undo_stack(&self) -> &[Move] {
        &self.state.undo_stack
    }

    /// Moves retracted, most recent last.
    pub fn redo_stack(&self) -> &[Move] {
        &self.state.redo_stack
    }

    /// True if there is a move to undo.
    pub fn can_undo(&self) -> bool {
        !self.state.undo_stack.is_empty()
    }

    /// True if there is a move to redo.
    pub fn can_redo(&self) -> bool {
        !self.state.redo_stack.is_empty()
    }

    /// Short status line for display.
    pub fn status_message(&self) -> String {
        match (self.state.status, self.state.winner) {
            (GameStatus::Completed, Some(winner)) => format!("{winner} Wins!"),
            (GameStatus::Completed, None) => "It's a Draw!".to_string(),
            _ => format!("{}'s Turn", self.state.current_player),
        }
    }

    fn debug_check_invariants(&self) {
        let checked = GameInvariants::check_all(&self.state);
        if let Err(violations) = &checked {
            warn!(description = %describe(violations), "Invariant violated");
        }
        debug_assert!(checked.is_ok(), "Invariant violated: {checked:?}");
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}
