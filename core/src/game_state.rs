// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board snapshots for undo

use crate::board::Board;
use crate::piece::PieceId;
use crate::Position;
use std::collections::BTreeMap;

/// Snapshot of piece placement and turn, taken before a move is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board_state: BTreeMap<Position, PieceId>,
    current_player_index: usize,
    move_count: usize,
}

impl GameState {
    /// Record where every piece currently stands
    pub fn capture_from_board(board: &Board, current_player_index: usize, move_count: usize) -> Self {
        let board_state = board.occupied().map(|(pos, id, _)| (pos, id)).collect();
        Self {
            board_state,
            current_player_index,
            move_count,
        }
    }

    /// Put every piece back where it stood when the snapshot was taken
    pub fn restore_to_board(&self, board: &mut Board) {
        board.clear_cells();
        for (&pos, &id) in &self.board_state {
            board.set_piece(pos, Some(id));
            board.relocate(id, pos);
        }
    }

    pub fn board_state(&self) -> &BTreeMap<Position, PieceId> {
        &self.board_state
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }
}
