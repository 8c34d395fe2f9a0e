//! Core domain types for N-in-a-row.

use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the board.
///
/// Serializes as `null` when empty and as the player symbol otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Player>", into = "Option<Player>")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

impl From<Option<Player>> for Square {
    fn from(cell: Option<Player>) -> Self {
        cell.map_or(Square::Empty, Square::Occupied)
    }
}

impl From<Square> for Option<Player> {
    fn from(square: Square) -> Self {
        square.player()
    }
}

/// Square board of `size * size` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board with `board_size` rows and columns.
    pub fn new(board_size: usize) -> Self {
        Self {
            squares: vec![Square::Empty; board_size * board_size],
        }
    }

    /// Builds a board from raw squares (row-major).
    pub fn from_squares(squares: Vec<Square>) -> Self {
        Self { squares }
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Side length of the board.
    pub fn side(&self) -> usize {
        self.squares.len().isqrt()
    }

    /// Gets the square at the given index.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Sets the square at the given index.
    pub fn set(&mut self, index: usize, square: Square) -> Result<(), IndexError> {
        let cell_count = self.squares.len();
        let cell = self
            .squares
            .get_mut(index)
            .ok_or_else(|| IndexError::new(index, cell_count))?;
        *cell = square;
        Ok(())
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Indices of empty squares in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares
            .iter()
            .filter(|square| **square != Square::Empty)
            .count()
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|square| **square == Square::Occupied(player))
            .count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based number so a player can type it back.
    pub fn display(&self) -> String {
        let side = self.side();
        let width = self.squares.len().to_string().len();
        let separator = vec!["-".repeat(width); side].join("+");
        let mut result = String::new();
        for row in 0..side {
            let cells: Vec<String> = (0..side)
                .map(|col| {
                    let index = row * side + col;
                    let symbol = match self.squares[index] {
                        Square::Empty => (index + 1).to_string(),
                        Square::Occupied(player) => player.to_string().to_uppercase(),
                    };
                    format!("{symbol:>width$}")
                })
                .collect();
            result.push_str(&cells.join("|"));
            if row + 1 < side {
                result.push('\n');
                result.push_str(&separator);
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BOARD_SIZE)
    }
}

/// A single placement of a player's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Row-major cell index.
    pub index: usize,
    /// The player who placed the symbol.
    pub player: Player,
}

impl Move {
    /// Creates a new move.
    pub fn new(index: usize, player: Player) -> Self {
        Self { index, player }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.index)
    }
}

/// Lifecycle of a single board.
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
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// No symbol on the board yet.
    #[default]
    NotStarted,
    /// At least one move made, no terminal state reached.
    InProgress,
    /// Won or drawn.
    Completed,
}

/// Result of a terminal position.
///
/// `winner == None` denotes a draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Winning player, `None` for a draw.
    pub winner: Option<Player>,
    /// Cells of the completed line, `None` for a draw.
    pub winning_pattern: Option<Vec<usize>>,
}

impl Outcome {
    /// A win for `player` along `pattern`.
    pub fn win(player: Player, pattern: Vec<usize>) -> Self {
        Self {
            winner: Some(player),
            winning_pattern: Some(pattern),
        }
    }

    /// A draw.
    pub fn draw() -> Self {
        Self {
            winner: None,
            winning_pattern: None,
        }
    }

    /// Returns true if the outcome is a draw.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Some(player) => write!(f, "{player} Wins!"),
            None => write!(f, "It's a Draw!"),
        }
    }
}

/// Cumulative results across boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Games won by X.
    pub x: u32,
    /// Games won by O.
    pub o: u32,
    /// Drawn games.
    pub draw: u32,
}

impl Scores {
    /// Creates a score record.
    pub fn new(x: u32, o: u32, draw: u32) -> Self {
        Self { x, o, draw }
    }

    /// Score bucket for a winner, or the draw bucket for `None`.
    pub fn get(&self, winner: Option<Player>) -> u32 {
        match winner {
            Some(Player::X) => self.x,
            Some(Player::O) => self.o,
            None => self.draw,
        }
    }

    fn bucket_mut(&mut self, winner: Option<Player>) -> &mut u32 {
        match winner {
            Some(Player::X) => &mut self.x,
            Some(Player::O) => &mut self.o,
            None => &mut self.draw,
        }
    }

    /// Adds one to the bucket for `winner`.
    pub fn increment(&mut self, winner: Option<Player>) {
        let bucket = self.bucket_mut(winner);
        *bucket = bucket.saturating_add(1);
    }

    /// Removes one from the bucket for `winner`, never below zero.
    pub fn decrement(&mut self, winner: Option<Player>) {
        let bucket = self.bucket_mut(winner);
        *bucket = bucket.saturating_sub(1);
    }

    /// Total number of finished games.
    pub fn total(&self) -> u32 {
        self.x + self.o + self.draw
    }
}
