// SPDX-License-Identifier: MIT OR Apache-2.0

//! Player identity and owned pieces

use crate::piece::PieceId;
use crate::PlayerColor;
use std::collections::BTreeSet;
use std::fmt;

/// One side of the game
///
/// The piece set holds handles that are also referenced from board cells;
/// [`crate::Game`] keeps both views consistent on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: PlayerColor,
    pieces: BTreeSet<PieceId>,
}

impl Player {
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            name: name.into(),
            color,
            pieces: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    /// Handles of the pieces still in play
    pub fn pieces(&self) -> &BTreeSet<PieceId> {
        &self.pieces
    }

    pub fn owns(&self, piece: PieceId) -> bool {
        self.pieces.contains(&piece)
    }

    pub fn has_pieces(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub(crate) fn add_piece(&mut self, piece: PieceId) {
        self.pieces.insert(piece);
    }

    pub(crate) fn remove_piece(&mut self, piece: PieceId) {
        self.pieces.remove(&piece);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}
