//! Serializable snapshot of the whole engine.
//!
//! The JSON shape is
//! `{ config: { boardSize, matchSize }, state: { board, currentPlayer, winner,
//! winningPattern, status, undoStack, redoStack }, scores: { x, o, draw } }`.

use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::error::SnapshotError;
use crate::invariants::{GameInvariants, InvariantSet, describe};
use crate::state::GameState;
use crate::types::{Player, Scores};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// The engine's entire observable state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board and match size.
    config: GameConfig,
    /// Board, turn, outcome and history.
    state: GameState,
    /// Cumulative scores.
    scores: Scores,
}

impl Snapshot {
    /// Encodes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the snapshot as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a snapshot from JSON without checking consistency.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that the snapshot describes a state the engine can reach.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let config = GameConfig::new(self.config.board_size(), self.config.match_size())?;
        let cell_count = config.cell_count();
        let state = &self.state;

        if state.board().len() != cell_count {
            return Err(SnapshotError::Inconsistent(format!(
                "board has {} cells, expected {}",
                state.board().len(),
                cell_count
            )));
        }

        let mut seen = HashSet::new();
        for mv in state.undo_stack().iter().chain(state.redo_stack()) {
            if mv.index >= cell_count {
                return Err(SnapshotError::Inconsistent(format!(
                    "history index {} outside board",
                    mv.index
                )));
            }
            if !seen.insert(mv.index) {
                return Err(SnapshotError::Inconsistent(format!(
                    "history visits cell {} twice",
                    mv.index
                )));
            }
        }

        GameInvariants::check_all(state)
            .map_err(|violations| SnapshotError::Inconsistent(describe(&violations)))?;

        if state.is_game_over() && !state.redo_stack().is_empty() {
            return Err(SnapshotError::Inconsistent(
                "completed game has moves to redo".to_string(),
            ));
        }

        // Redo pops from the end, so the last entry is replayed first.
        let mut next = state
            .undo_stack()
            .last()
            .map_or(Player::X, |mv| mv.player.opponent());
        for mv in state.redo_stack().iter().rev() {
            if mv.player != next {
                return Err(SnapshotError::Inconsistent(format!(
                    "redo move {mv} is out of turn"
                )));
            }
            next = next.opponent();
        }
        Ok(())
    }
}

impl GameEngine {
    /// Captures the engine's entire state.
    #[instrument(skip(self))]
    pub fn serialize(&self) -> Snapshot {
        Snapshot {
            config: self.config,
            state: self.state.clone(),
            scores: self.scores,
        }
    }

    /// Replaces the engine's state wholesale with `snapshot`.
    ///
    /// The snapshot is validated first; on error the engine is unchanged.
    #[instrument(skip(self, snapshot))]
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        if let Err(e) = snapshot.validate() {
            warn!(error = %e, "Snapshot rejected");
            return Err(e);
        }
        let Snapshot {
            config,
            state,
            scores,
        } = snapshot;
        info!(%config, status = %state.status(), "Restoring snapshot");
        self.config = config;
        self.state = state;
        self.scores = scores;
        Ok(())
    }

    /// Serializes the engine to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        self.serialize().to_json()
    }

    /// Restores the engine from JSON produced by [`GameEngine::to_json`].
    pub fn restore_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        debug!(bytes = json.len(), "Decoding snapshot");
        self.restore(Snapshot::from_json(json)?)
    }

    /// Builds a new engine from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut engine = Self::default();
        engine.restore_json(json)?;
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Move, Square};

    fn won_game() -> GameEngine {
        let mut engine = GameEngine::default();
        for index in [0, 4, 1, 3, 2] {
            engine.make_move(index).unwrap();
        }
        engine
    }

    #[test]
    fn test_json_shape() {
        let mut engine = GameEngine::default();
        engine.make_move(1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&engine.to_json().unwrap()).unwrap();

        assert_eq!(value["config"]["boardSize"], 3);
        assert_eq!(value["config"]["matchSize"], 3);
        assert_eq!(value["state"]["board"][0], serde_json::Value::Null);
        assert_eq!(value["state"]["board"][1], "x");
        assert_eq!(value["state"]["currentPlayer"], "o");
        assert_eq!(value["state"]["status"], "IN_PROGRESS");
        assert_eq!(value["state"]["winner"], serde_json::Value::Null);
        assert_eq!(value["state"]["winningPattern"], serde_json::Value::Null);
        assert_eq!(value["state"]["undoStack"][0]["index"], 1);
        assert_eq!(value["state"]["undoStack"][0]["player"], "x");
        assert_eq!(value["state"]["redoStack"], serde_json::json!([]));
        assert_eq!(value["scores"], serde_json::json!({"x": 0, "o": 0, "draw": 0}));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let json = GameEngine::default()
            .to_json()
            .unwrap()
            .replace(r#""matchSize":3"#, r#""matchSize":2"#);
        let err = GameEngine::from_json(&json).unwrap_err();
        assert!(matches!(err, SnapshotError::Config(_)));
    }

    #[test]
    fn test_rejects_wrong_board_length() {
        let mut snapshot = GameEngine::default().serialize();
        snapshot.state = GameState::new(4);
        let mut engine = GameEngine::default();
        let err = engine.restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("16 cells"));
        assert_eq!(engine, GameEngine::default());
    }

    #[test]
    fn test_rejects_history_that_disagrees_with_board() {
        let mut snapshot = GameEngine::default().serialize();
        snapshot.state.board.set(0, Square::Occupied(Player::X)).unwrap();
        let err = GameEngine::default().restore(snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameEngine::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_rejects_redo_on_completed_game() {
        let mut snapshot = won_game().serialize();
        snapshot.state.redo_stack.push(Move::new(8, Player::O));

        let mut engine = GameEngine::default();
        let err = engine.restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("completed game"));
        assert_eq!(engine, GameEngine::default());
    }

    #[test]
    fn test_rejects_redo_out_of_turn() {
        let mut engine = GameEngine::default();
        engine.make_move(0).unwrap();
        let mut snapshot = engine.serialize();
        // X just moved, so the next redo entry must be O's.
        snapshot.state.redo_stack.push(Move::new(8, Player::X));
        let err = GameEngine::default().restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("out of turn"));

        let mut snapshot = GameEngine::default().serialize();
        snapshot.state.redo_stack = vec![Move::new(5, Player::X), Move::new(4, Player::O)];
        assert!(GameEngine::default().restore(snapshot).is_err());
    }

    #[test]
    fn test_accepts_history_from_real_play() {
        let mut engine = won_game();
        engine.undo_move();
        engine.undo_move();
        engine.undo_move();

        let mut restored = GameEngine::default();
        restored.restore(engine.serialize()).unwrap();
        while restored.redo_move().is_some() {}
        assert_eq!(restored.winner(), Some(Player::X));
        assert_eq!(restored.scores().x, 1);
    }
}
