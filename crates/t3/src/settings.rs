//! Front end settings loaded from TOML and command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{EnumIter, EnumString};
use t3_engine::{ConfigUpdate, Player};
use tracing::{debug, info, instrument};

/// Who controls the two sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// One human against the computer.
    #[default]
    #[serde(rename = "single")]
    #[strum(serialize = "single")]
    #[value(name = "single")]
    SinglePlayer,
    /// Two humans sharing the terminal.
    #[serde(rename = "two")]
    #[strum(serialize = "two")]
    #[value(name = "two")]
    TwoPlayer,
}

/// Requested computer strength.
///
/// Recorded for display; every level currently plays the first free cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiDifficulty {
    /// Easy.
    Easy,
    /// Normal.
    #[default]
    Normal,
    /// Hard.
    Hard,
}

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Rows and columns on the board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Symbols in a row needed to win; derived from the board size if absent.
    #[serde(default)]
    match_size: Option<usize>,

    /// Single player or two players.
    #[serde(default)]
    mode: GameMode,

    /// Side the computer plays in single player mode.
    #[serde(default = "default_ai_plays_as")]
    ai_plays_as: Player,

    /// Requested computer strength.
    #[serde(default)]
    difficulty: AiDifficulty,
}

#[instrument]
fn default_board_size() -> usize {
    t3_engine::DEFAULT_BOARD_SIZE
}

#[instrument]
fn default_ai_plays_as() -> Player {
    Player::O
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            match_size: None,
            mode: GameMode::default(),
            ai_plays_as: default_ai_plays_as(),
            difficulty: AiDifficulty::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(board_size = settings.board_size, mode = %settings.mode, "Settings loaded");
        Ok(settings)
    }

    /// Writes settings to a TOML file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = toml::to_string(self)
            .map_err(|e| SettingsError::new(format!("Failed to encode settings: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| SettingsError::new(format!("Failed to write settings file: {}", e)))
    }

    /// Applies command-line overrides on top of these settings.
    ///
    /// A board size given without a match size drops any stored match size
    /// so the default rule picks one for the new board.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        board_size: Option<usize>,
        match_size: Option<usize>,
        mode: Option<GameMode>,
        ai_plays_as: Option<Player>,
        difficulty: Option<AiDifficulty>,
    ) -> Self {
        if let Some(board_size) = board_size {
            self.board_size = board_size;
            self.match_size = None;
        }
        if let Some(match_size) = match_size {
            self.match_size = Some(match_size);
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(ai_plays_as) = ai_plays_as {
            self.ai_plays_as = ai_plays_as;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self
    }

    /// The engine configuration these settings ask for.
    pub fn config_update(&self) -> ConfigUpdate {
        ConfigUpdate {
            board_size: Some(self.board_size),
            match_size: self.match_size,
        }
    }

    /// Side the computer controls, if any.
    pub fn ai_side(&self) -> Option<Player> {
        match self.mode {
            GameMode::SinglePlayer => Some(self.ai_plays_as),
            GameMode::TwoPlayer => None,
        }
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
