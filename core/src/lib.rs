// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jungle Core - Game Rules and Board Logic
//!
//! This crate provides the rule engine for Jungle (Dou Shou Qi):
//! - 9x7 board with land, water, den and trap terrain
//! - The eight animal pieces and their movement/capture rules
//! - A game state machine with move history and bounded undo
//! - `.jungle` save files and `.record` move logs

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod game;
pub mod game_state;
pub mod moves;
pub mod persistence;
pub mod piece;
pub mod player;
pub mod record;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::Game;
pub use game_state::GameState;
pub use moves::{Move, MoveResult};
pub use piece::{Piece, PieceId, PieceKind};
pub use player::Player;

/// Side of the board a player sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    /// Bottom side (rows 6-8), moves first
    Red,
    /// Top side (rows 0-2)
    Blue,
}

impl PlayerColor {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Red,
        }
    }

    /// Seat index of this color in a game (Red = 0, Blue = 1)
    pub fn index(&self) -> usize {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Blue => 1,
        }
    }

    /// Color seated at the given index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerColor::Red),
            1 => Some(PlayerColor::Blue),
            _ => None,
        }
    }

    /// Capitalised name, as used in record headers
    pub fn title(&self) -> &'static str {
        match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerColor::Red => f.write_str("red"),
            PlayerColor::Blue => f.write_str("blue"),
        }
    }
}

/// Terrain of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainType {
    Land,
    Water,
    Den,
    Trap,
}

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Game still in progress
    Ongoing,
    /// Red (player 1) won
    #[serde(rename = "player_one_wins")]
    Player1Wins,
    /// Blue (player 2) won
    #[serde(rename = "player_two_wins")]
    Player2Wins,
    /// Reserved; no rule currently produces a draw
    Draw,
}

impl GameStatus {
    /// Winning status for the given side
    pub fn win_for(color: PlayerColor) -> Self {
        match color {
            PlayerColor::Red => GameStatus::Player1Wins,
            PlayerColor::Blue => GameStatus::Player2Wins,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Orthogonal step directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Row change for one step
    pub fn row_delta(&self) -> i32 {
        match self {
            Direction::North => -1,
            Direction::South => 1,
            Direction::East | Direction::West => 0,
        }
    }

    /// Column change for one step
    pub fn col_delta(&self) -> i32 {
        match self {
            Direction::East => 1,
            Direction::West => -1,
            Direction::North | Direction::South => 0,
        }
    }
}

/// Board coordinate. May lie off the board; bounds are checked by [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    /// Create a new position
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    /// True when `other` is exactly one orthogonal step away
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = (self.row - other.row).abs();
        let dc = (self.col - other.col).abs();
        dr + dc == 1
    }

    /// Direction of an adjacent position, `None` if not adjacent
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        if !self.is_adjacent(other) {
            return None;
        }
        Direction::ALL
            .into_iter()
            .find(|d| self.step(*d) == other)
    }

    /// Position one step away in `direction`
    pub fn step(&self, direction: Direction) -> Position {
        self.offset(direction.row_delta(), direction.col_delta())
    }

    /// Position displaced by the given deltas
    pub fn offset(&self, d_row: i32, d_col: i32) -> Position {
        Position::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the 9x7 board
    #[error("Invalid position: {0}")]
    InvalidPosition(Position),

    /// No piece stands on the source square
    #[error("No piece at position {0}")]
    PieceNotFound(Position),

    /// The piece belongs to the player not on move
    #[error("Piece at {position} belongs to {owner}, not {current}")]
    WrongPlayer {
        position: Position,
        owner: String,
        current: String,
    },

    /// The piece cannot legally reach the target square
    #[error("{kind} at {from} cannot move to {to}")]
    InvalidMove {
        kind: PieceKind,
        from: Position,
        to: Position,
    },

    /// The piece may reach the square but not take its occupant
    #[error("{attacker} cannot capture {defender}")]
    InvalidCapture {
        attacker: PieceKind,
        defender: PieceKind,
    },

    /// The game has already finished
    #[error("Game is over")]
    GameOver,

    /// Two pieces were placed on the same square while restoring a layout
    #[error("Position already occupied: {0}")]
    OccupiedPosition(Position),

    /// A player index other than 0 or 1
    #[error("Invalid player index: {0}")]
    InvalidPlayerIndex(usize),
}
