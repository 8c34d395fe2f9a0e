//! Interactive game session: one engine, its settings and the computer player.

use crate::command::{Command, HELP};
use crate::settings::Settings;
use std::path::{Path, PathBuf};
use t3_engine::{
    ConfigUpdate, EngineError, FirstAvailable, GameConfig, GameEngine, MAX_BOARD_SIZE, MIN_SIZE,
    Move, MoveSelector, preferred_match_size,
};
use tracing::{debug, info, instrument, warn};

/// An action that throws away a game in progress and needs a yes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Start a new board.
    ResetBoard,
    /// Set every score back to zero.
    ClearScores,
    /// Change the board or match size.
    Resize(ConfigUpdate),
}

impl Confirmation {
    /// Question shown to the user.
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::ClearScores => "Are you sure you want to reset the scores? [y/N] ",
            Confirmation::ResetBoard | Confirmation::Resize(_) => {
                "Are you sure you want to reset the game? [y/N] "
            }
        }
    }
}

/// What happened in response to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Moves were placed (the player's, then maybe the computer's).
    Moved(Vec<Move>),
    /// Moves were taken back, most recent first.
    Undone(Vec<Move>),
    /// Moves were replayed, oldest first.
    Redone(Vec<Move>),
    /// Command had no effect; explains why.
    Rejected(String),
    /// The command must be confirmed before it runs.
    Confirm(Confirmation),
    /// A new board was started.
    BoardReset,
    /// Scores were cleared.
    ScoresCleared,
    /// Board or match size changed.
    Resized(GameConfig),
    /// Snapshot written.
    Saved(PathBuf),
    /// Snapshot read.
    Loaded(PathBuf),
    /// Command list.
    Help,
    /// Session over.
    Quit,
}

fn list(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| format!("{} on {}", mv.player, mv.index + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Moved(moves) => write!(f, "Played {}.", list(moves)),
            Reply::Undone(moves) => write!(f, "Took back {}.", list(moves)),
            Reply::Redone(moves) => write!(f, "Replayed {}.", list(moves)),
            Reply::Rejected(reason) => write!(f, "{reason}"),
            Reply::Confirm(confirmation) => write!(f, "{}", confirmation.prompt()),
            Reply::BoardReset => write!(f, "New board."),
            Reply::ScoresCleared => write!(f, "Scores cleared."),
            Reply::Resized(config) => write!(f, "Now playing on a {config}."),
            Reply::Saved(path) => write!(f, "Saved to {}.", path.display()),
            Reply::Loaded(path) => write!(f, "Loaded {}.", path.display()),
            Reply::Help => write!(f, "{HELP}"),
            Reply::Quit => write!(f, "Bye."),
        }
    }
}

/// A running game session.
///
/// The session owns the engine; nothing else holds a reference to it.
#[derive(Debug)]
pub struct Session {
    engine: GameEngine,
    settings: Settings,
    ai: FirstAvailable,
}

impl Session {
    /// Starts a session with the given settings.
    ///
    /// If the computer plays X it makes the first move right away.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings ask for an unplayable board.
    #[instrument(skip(settings), fields(board_size = settings.board_size(), mode = %settings.mode()))]
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        let engine = GameEngine::new(settings.config_update())?;
        let mut session = Self {
            engine,
            settings,
            ai: FirstAvailable,
        };
        session.ai_turn()?;
        Ok(session)
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs one command.
    ///
    /// Commands that would discard a game in progress return
    /// [`Reply::Confirm`]; pass the confirmation to [`Session::confirm`] to
    /// carry them out.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot file cannot be read or written.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> anyhow::Result<Reply> {
        let reply = match command {
            Command::Play(index) => self.play(index)?,
            Command::Undo => self.undo(),
            Command::Redo => self.redo()?,
            Command::NewBoard => self.guard(Confirmation::ResetBoard)?,
            Command::ClearScores => Reply::Confirm(Confirmation::ClearScores),
            Command::Resize {
                board_size,
                match_size,
            } => {
                // Keep the current match size when the new board still allows it.
                let match_size = match_size.or_else(|| {
                    preferred_match_size(
                        board_size,
                        self.engine.config().match_size(),
                        MIN_SIZE..=board_size.min(MAX_BOARD_SIZE),
                    )
                });
                let update = ConfigUpdate {
                    board_size: Some(board_size),
                    match_size,
                };
                if let Err(e) = self.engine.config().merged(update) {
                    return Ok(Reply::Rejected(e.message));
                }
                self.guard(Confirmation::Resize(update))?
            }
            Command::Save(path) => self.save(path)?,
            Command::Load(path) => self.load(path)?,
            Command::Help => Reply::Help,
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// Carries out a confirmed action.
    #[instrument(skip(self))]
    pub fn confirm(&mut self, confirmation: Confirmation) -> Result<Reply, EngineError> {
        match confirmation {
            Confirmation::ResetBoard => {
                self.engine.reset_board();
                self.ai_turn()?;
                Ok(Reply::BoardReset)
            }
            Confirmation::ClearScores => {
                self.engine.clear_scores();
                Ok(Reply::ScoresCleared)
            }
            Confirmation::Resize(update) => {
                self.engine.update_config(update)?;
                self.ai_turn()?;
                Ok(Reply::Resized(self.engine.config()))
            }
        }
    }

    /// Runs `confirmation` directly unless a game is in progress.
    fn guard(&mut self, confirmation: Confirmation) -> Result<Reply, EngineError> {
        if self.engine.is_in_progress() {
            Ok(Reply::Confirm(confirmation))
        } else {
            self.confirm(confirmation)
        }
    }

    fn play(&mut self, index: usize) -> Result<Reply, EngineError> {
        if self.engine.is_game_over() {
            // A click on a finished board starts the next one.
            return self.confirm(Confirmation::ResetBoard);
        }
        if self.is_ai_turn() {
            return Ok(Reply::Rejected("Wait for the computer to move.".to_string()));
        }
        let human = match self.engine.make_move(index) {
            Ok(Some(mv)) => mv,
            Ok(None) => {
                return Ok(Reply::Rejected(format!("Cell {} is taken.", index + 1)));
            }
            Err(e) => return Ok(Reply::Rejected(e.to_string())),
        };
        let mut moves = vec![human];
        moves.extend(self.ai_turn()?);
        Ok(Reply::Moved(moves))
    }

    fn undo(&mut self) -> Reply {
        // The computer's moves are only taken back along with a human one.
        let ai_side = self.settings.ai_side();
        if !self
            .engine
            .undo_stack()
            .iter()
            .any(|mv| Some(mv.player) != ai_side)
        {
            return Reply::Rejected("Nothing to undo.".to_string());
        }
        let mut undone = Vec::new();
        while let Some(mv) = self.engine.undo_move() {
            undone.push(mv);
            if !self.is_ai_turn() {
                break;
            }
        }
        Reply::Undone(undone)
    }

    fn redo(&mut self) -> Result<Reply, EngineError> {
        let mut redone = Vec::new();
        while let Some(mv) = self.engine.redo_move() {
            redone.push(mv);
            if !self.is_ai_turn() {
                break;
            }
        }
        if redone.is_empty() {
            return Ok(Reply::Rejected("Nothing to redo.".to_string()));
        }
        redone.extend(self.ai_turn()?);
        Ok(Reply::Redone(redone))
    }

    fn is_ai_turn(&self) -> bool {
        !self.engine.is_game_over()
            && self.settings.ai_side() == Some(self.engine.current_player())
    }

    /// Lets the computer move if it is its turn.
    fn ai_turn(&mut self) -> Result<Option<Move>, EngineError> {
        if !self.is_ai_turn() {
            return Ok(None);
        }
        let mv = self.engine.make_selected_move(&mut self.ai)?;
        if let Some(mv) = mv {
            debug!(%mv, selector = self.ai.name(), difficulty = %self.settings.difficulty(), "Computer moved");
        }
        Ok(mv)
    }

    fn save(&self, path: PathBuf) -> anyhow::Result<Reply> {
        let json = self.engine.serialize().to_json_pretty()?;
        std::fs::write(&path, json)?;
        info!(path = %path.display(), "Snapshot saved");
        Ok(Reply::Saved(path))
    }

    fn load(&mut self, path: PathBuf) -> anyhow::Result<Reply> {
        self.load_file(&path)?;
        Ok(Reply::Loaded(path))
    }

    /// Replaces the engine state with a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// snapshot; the current game is kept in that case.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = std::fs::read_to_string(path.as_ref())?;
        if let Err(e) = self.engine.restore_json(&json) {
            warn!(error = %e, "Snapshot not loaded");
            return Err(e.into());
        }
        self.ai_turn()?;
        Ok(())
    }

    /// Board, status line and scores as text.
    pub fn render(&self) -> String {
        let scores = self.engine.scores();
        let mut out = self.engine.board().display();
        out.push_str("\n\n");
        out.push_str(&self.engine.status_message());
        if let Some(pattern) = self.engine.winning_pattern() {
            let cells: Vec<String> = pattern.iter().map(|i| (i + 1).to_string()).collect();
            out.push_str(&format!(" ({})", cells.join("-")));
        }
        out.push_str(&format!(
            "\nX: {}  O: {}  Draw: {}",
            scores.x, scores.o, scores.draw
        ));
        out
    }
}
