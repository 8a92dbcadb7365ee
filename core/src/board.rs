// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and terrain

use crate::piece::{Piece, PieceId, PieceKind};
use crate::{PlayerColor, Position, TerrainType};

/// Number of rows on the board
pub const BOARD_HEIGHT: i32 = 9;
/// Number of columns on the board
pub const BOARD_WIDTH: i32 = 7;

const CELLS: usize = (BOARD_HEIGHT * BOARD_WIDTH) as usize;

/// Terrain at a position. Off-board positions read as land.
pub fn terrain_at(pos: Position) -> TerrainType {
    let (row, col) = (pos.row(), pos.col());
    match (row, col) {
        (3..=5, 1 | 2 | 4 | 5) => TerrainType::Water,
        (0 | 8, 3) => TerrainType::Den,
        (0 | 1 | 7 | 8, 2 | 4) => TerrainType::Trap,
        _ => TerrainType::Land,
    }
}

/// The 9x7 Jungle board.
///
/// Cells hold [`PieceId`] handles into a piece arena owned by the board.
/// Pieces are never removed from the arena: a captured piece simply loses
/// its cell, so undo can put the very same piece back.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Option<PieceId>; CELLS],
    pieces: Vec<Piece>,
}

impl Board {
    /// Create an empty board with no pieces
    pub fn new() -> Self {
        Self {
            cells: [None; CELLS],
            pieces: Vec::new(),
        }
    }

    /// Check if a position lies within the 9x7 bounds
    pub fn is_valid_position(&self, pos: Position) -> bool {
        (0..BOARD_HEIGHT).contains(&pos.row()) && (0..BOARD_WIDTH).contains(&pos.col())
    }

    /// Handle of the piece at `pos`; empty for off-board positions
    pub fn get_piece(&self, pos: Position) -> Option<PieceId> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// Piece data at `pos`
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.get_piece(pos).map(|id| self.piece(id))
    }

    /// Put a handle into a cell, or clear it. Off-board positions are ignored.
    pub fn set_piece(&mut self, pos: Position, piece: Option<PieceId>) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = piece;
        }
    }

    /// Look up a piece in the arena
    ///
    /// Handles are only minted by [`Board::spawn`], so every handle a caller
    /// holds refers to a live arena slot.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Create a piece in the arena and place it on the board.
    ///
    /// Returns `None` when `pos` is off the board.
    pub fn spawn(&mut self, kind: PieceKind, owner: PlayerColor, pos: Position) -> Option<PieceId> {
        if !self.is_valid_position(pos) {
            return None;
        }
        let id = PieceId::new(self.pieces.len());
        self.pieces.push(Piece::new(kind, owner, pos));
        self.set_piece(pos, Some(id));
        Some(id)
    }

    /// Update the position a piece believes it stands on
    pub(crate) fn relocate(&mut self, id: PieceId, pos: Position) {
        if let Some(piece) = self.pieces.get_mut(id.index()) {
            piece.position = pos;
        }
    }

    /// Remove every handle from the grid. The arena is kept.
    pub(crate) fn clear_cells(&mut self) {
        self.cells = [None; CELLS];
    }

    /// Terrain at the given position
    pub fn get_terrain(&self, pos: Position) -> TerrainType {
        terrain_at(pos)
    }

    /// Check if a position is water
    pub fn is_water(&self, pos: Position) -> bool {
        self.get_terrain(pos) == TerrainType::Water
    }

    /// Check if a position is a den; with `owner`, only that side's den counts
    pub fn is_den(&self, pos: Position, owner: Option<PlayerColor>) -> bool {
        if self.get_terrain(pos) != TerrainType::Den {
            return false;
        }
        match owner {
            None => true,
            Some(PlayerColor::Red) => pos.row() == BOARD_HEIGHT - 1,
            Some(PlayerColor::Blue) => pos.row() == 0,
        }
    }

    /// Check if a position is a trap; with `owner`, only that side's traps count
    pub fn is_trap(&self, pos: Position, owner: Option<PlayerColor>) -> bool {
        if self.get_terrain(pos) != TerrainType::Trap {
            return false;
        }
        match owner {
            None => true,
            Some(PlayerColor::Red) => pos.row() >= BOARD_HEIGHT - 2,
            Some(PlayerColor::Blue) => pos.row() <= 1,
        }
    }

    /// All on-board positions, row-major
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_HEIGHT).flat_map(|row| (0..BOARD_WIDTH).map(move |col| Position::new(row, col)))
    }

    /// Occupied cells, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (Position, PieceId, &Piece)> + '_ {
        Self::positions()
            .filter_map(move |pos| self.get_piece(pos).map(|id| (pos, id, self.piece(id))))
    }

    /// Number of pieces currently on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !self.is_valid_position(pos) {
            return None;
        }
        Some((pos.row() * BOARD_WIDTH + pos.col()) as usize)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
