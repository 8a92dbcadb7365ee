// SPDX-License-Identifier: MIT OR Apache-2.0

//! Animal pieces and their movement/capture rules
//!
//! All rule checks answer with plain booleans; turning a `false` into a
//! user-facing error is the job of [`crate::Game`].

use crate::board::Board;
use crate::{Direction, PlayerColor, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance covered by a river jump (three water cells plus the landing cell)
const JUMP_DISTANCE: i32 = 4;

/// Stable handle of a piece inside a [`Board`]'s arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(usize);

impl PieceId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena slot of this piece
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The eight animals, strongest last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Rat,
    Cat,
    Dog,
    Wolf,
    Leopard,
    Tiger,
    Lion,
    Elephant,
}

impl PieceKind {
    /// Every kind, ordered by rank
    pub const ALL: [PieceKind; 8] = [
        PieceKind::Rat,
        PieceKind::Cat,
        PieceKind::Dog,
        PieceKind::Wolf,
        PieceKind::Leopard,
        PieceKind::Tiger,
        PieceKind::Lion,
        PieceKind::Elephant,
    ];

    /// Fixed strength of the kind, 1 (Rat) to 8 (Elephant)
    pub fn rank(&self) -> u8 {
        match self {
            PieceKind::Rat => 1,
            PieceKind::Cat => 2,
            PieceKind::Dog => 3,
            PieceKind::Wolf => 4,
            PieceKind::Leopard => 5,
            PieceKind::Tiger => 6,
            PieceKind::Lion => 7,
            PieceKind::Elephant => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Rat => "Rat",
            PieceKind::Cat => "Cat",
            PieceKind::Dog => "Dog",
            PieceKind::Wolf => "Wolf",
            PieceKind::Leopard => "Leopard",
            PieceKind::Tiger => "Tiger",
            PieceKind::Lion => "Lion",
            PieceKind::Elephant => "Elephant",
        }
    }

    /// Whether the kind may leap across the river
    pub fn can_jump_river(&self) -> bool {
        matches!(self, PieceKind::Lion | PieceKind::Tiger)
    }

    /// Whether the kind may enter water
    pub fn can_swim(&self) -> bool {
        matches!(self, PieceKind::Rat)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a piece name is not one of the eight animals
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown piece type: {0}")]
pub struct UnknownPieceKind(pub String);

impl FromStr for PieceKind {
    type Err = UnknownPieceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownPieceKind(s.to_string()))
    }
}

/// A single piece on (or captured from) the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    owner: PlayerColor,
    pub(crate) position: Position,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, owner: PlayerColor, position: Position) -> Self {
        Self {
            kind,
            owner,
            position,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rank(&self) -> u8 {
        self.kind.rank()
    }

    pub fn owner(&self) -> PlayerColor {
        self.owner
    }

    /// Last square the piece stood on
    pub fn position(&self) -> Position {
        self.position
    }

    /// Check if this piece can move to `target`
    pub fn can_move_to(&self, board: &Board, target: Position) -> bool {
        if self.can_step_to(board, target) {
            return true;
        }
        self.kind.can_jump_river() && self.can_jump_river(board, target)
    }

    /// Check if this piece can take `target`
    pub fn can_capture(&self, target: &Piece, board: &Board) -> bool {
        if target.owner == self.owner {
            return false;
        }

        // Enemy standing in one of our traps loses all protection
        if board.is_trap(target.position, Some(self.owner)) {
            return true;
        }

        match self.kind {
            PieceKind::Rat => {
                if board.is_water(self.position) != board.is_water(target.position) {
                    return false;
                }
                target.kind == PieceKind::Elephant || self.rank() >= target.rank()
            }
            PieceKind::Elephant => target.kind != PieceKind::Rat,
            _ => self.rank() >= target.rank(),
        }
    }

    /// Every square this piece can move to from where it stands
    pub fn get_valid_moves(&self, board: &Board) -> Vec<Position> {
        let steps = Direction::ALL.into_iter().map(|d| self.position.step(d));
        let jumps = self
            .kind
            .can_jump_river()
            .then(|| {
                [
                    (-JUMP_DISTANCE, 0),
                    (JUMP_DISTANCE, 0),
                    (0, -JUMP_DISTANCE),
                    (0, JUMP_DISTANCE),
                ]
                .into_iter()
                .map(|(dr, dc)| self.position.offset(dr, dc))
            })
            .into_iter()
            .flatten();

        steps
            .chain(jumps)
            .filter(|pos| board.is_valid_position(*pos) && self.can_move_to(board, *pos))
            .collect()
    }

    /// Single orthogonal step
    fn can_step_to(&self, board: &Board, target: Position) -> bool {
        if !self.position.is_adjacent(target) {
            return false;
        }
        if board.is_water(target) && !self.kind.can_swim() {
            return false;
        }
        self.can_land_on(board, target)
    }

    /// Lion/Tiger leap over exactly three water cells in a straight line
    fn can_jump_river(&self, board: &Board, target: Position) -> bool {
        let from = self.position;
        let (dr, dc) = (target.row() - from.row(), target.col() - from.col());
        let straight = (dr == 0) != (dc == 0);
        if !straight || dr.abs().max(dc.abs()) != JUMP_DISTANCE {
            return false;
        }

        let (step_r, step_c) = (dr.signum(), dc.signum());
        let river_clear = (1..JUMP_DISTANCE).all(|i| {
            let cell = from.offset(step_r * i, step_c * i);
            board.is_water(cell)
                && board
                    .piece_at(cell)
                    .map_or(true, |p| p.kind != PieceKind::Rat)
        });

        river_clear && self.can_land_on(board, target)
    }

    /// Shared destination checks: on the board, not our den, not our piece
    fn can_land_on(&self, board: &Board, target: Position) -> bool {
        if !board.is_valid_position(target) {
            return false;
        }
        if board.is_den(target, Some(self.owner)) {
            return false;
        }
        board
            .piece_at(target)
            .map_or(true, |occupant| occupant.owner != self.owner)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(rank={}, owner={}, pos={})",
            self.kind,
            self.rank(),
            self.owner,
            self.position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlayerColor::{Blue, Red};

    fn place(board: &mut Board, kind: PieceKind, owner: PlayerColor, row: i32, col: i32) -> PieceId {
        board.spawn(kind, owner, Position::new(row, col)).unwrap()
    }

    #[test]
    fn test_ranks_are_fixed() {
        let ranks: Vec<u8> = PieceKind::ALL.iter().map(|k| k.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_kind_name_parse() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.name().parse::<PieceKind>(), Ok(kind));
        }
        assert!("Dragon".parse::<PieceKind>().is_err());
        assert!("rat".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_standard_piece_moves() {
        let mut board = Board::new();
        let dog = place(&mut board, PieceKind::Dog, Red, 6, 3);
        let dog = board.piece(dog).clone();
        assert!(dog.can_move_to(&board, Position::new(5, 3)));
        assert!(dog.can_move_to(&board, Position::new(7, 3)));
        assert!(!dog.can_move_to(&board, Position::new(6, 3)));
        // diagonal
        assert!(!dog.can_move_to(&board, Position::new(5, 4)));
        assert!(!dog.can_move_to(&board, Position::new(4, 3)));
    }

    #[test]
    fn test_standard_piece_cannot_enter_water() {
        let mut board = Board::new();
        let cat = place(&mut board, PieceKind::Cat, Red, 2, 1);
        let cat = board.piece(cat).clone();
        assert!(!cat.can_move_to(&board, Position::new(3, 1)));
        assert!(cat.can_move_to(&board, Position::new(2, 2)));
    }

    #[test]
    fn test_rat_swims() {
        let mut board = Board::new();
        let rat = place(&mut board, PieceKind::Rat, Red, 2, 1);
        let rat = board.piece(rat).clone();
        assert!(rat.can_move_to(&board, Position::new(3, 1)));
    }

    #[test]
    fn test_cannot_enter_own_den() {
        let mut board = Board::new();
        let wolf = place(&mut board, PieceKind::Wolf, Red, 7, 3);
        let wolf = board.piece(wolf).clone();
        assert!(!wolf.can_move_to(&board, Position::new(8, 3)));

        let blue_wolf = place(&mut board, PieceKind::Wolf, Blue, 1, 3);
        let blue_wolf = board.piece(blue_wolf).clone();
        assert!(!blue_wolf.can_move_to(&board, Position::new(0, 3)));
    }

    #[test]
    fn test_cannot_move_onto_own_piece() {
        let mut board = Board::new();
        let a = place(&mut board, PieceKind::Tiger, Red, 6, 0);
        place(&mut board, PieceKind::Cat, Red, 7, 0);
        let tiger = board.piece(a).clone();
        assert!(!tiger.can_move_to(&board, Position::new(7, 0)));
    }

    #[test]
    fn test_rank_capture() {
        let mut board = Board::new();
        let wolf = place(&mut board, PieceKind::Wolf, Red, 4, 3);
        let cat = place(&mut board, PieceKind::Cat, Blue, 4, 0);
        let lion = place(&mut board, PieceKind::Lion, Blue, 6, 6);
        let wolf = board.piece(wolf);
        assert!(wolf.can_capture(board.piece(cat), &board));
        assert!(!wolf.can_capture(board.piece(lion), &board));
        assert!(board.piece(lion).can_capture(wolf, &board));
    }

    #[test]
    fn test_equal_rank_capture() {
        let mut board = Board::new();
        let a = place(&mut board, PieceKind::Dog, Red, 4, 3);
        let b = place(&mut board, PieceKind::Dog, Blue, 4, 0);
        assert!(board.piece(a).can_capture(board.piece(b), &board));
    }

    #[test]
    fn test_trap_override() {
        let mut board = Board::new();
        let cat = place(&mut board, PieceKind::Cat, Red, 6, 2);
        // Blue elephant sitting in Red's trap
        let elephant = place(&mut board, PieceKind::Elephant, Blue, 7, 2);
        assert!(board.piece(cat).can_capture(board.piece(elephant), &board));
    }

    #[test]
    fn test_own_side_trap_does_not_weaken_defender() {
        let mut board = Board::new();
        // Blue lion standing in Blue's own trap keeps its rank protection
        let cat = place(&mut board, PieceKind::Cat, Red, 2, 2);
        let lion = place(&mut board, PieceKind::Lion, Blue, 1, 2);
        assert!(!board.piece(cat).can_capture(board.piece(lion), &board));
    }

    #[test]
    fn test_elephant_cannot_capture_rat() {
        let mut board = Board::new();
        let elephant = place(&mut board, PieceKind::Elephant, Red, 4, 3);
        let rat = place(&mut board, PieceKind::Rat, Blue, 4, 0);
        assert!(!board.piece(elephant).can_capture(board.piece(rat), &board));
    }

    #[test]
    fn test_elephant_captures_rat_in_trap() {
        let mut board = Board::new();
        let elephant = place(&mut board, PieceKind::Elephant, Red, 6, 4);
        let rat = place(&mut board, PieceKind::Rat, Blue, 7, 4);
        assert!(board.piece(elephant).can_capture(board.piece(rat), &board));
    }

    #[test]
    fn test_rat_captures_elephant() {
        let mut board = Board::new();
        let rat = place(&mut board, PieceKind::Rat, Red, 4, 0);
        let elephant = place(&mut board, PieceKind::Elephant, Blue, 4, 3);
        assert!(board.piece(rat).can_capture(board.piece(elephant), &board));
    }

    #[test]
    fn test_rat_environment_rule() {
        let mut board = Board::new();
        let swimming = place(&mut board, PieceKind::Rat, Red, 3, 1);
        let land_rat = place(&mut board, PieceKind::Rat, Blue, 2, 1);
        let land_elephant = place(&mut board, PieceKind::Elephant, Blue, 3, 0);
        let water_rat = place(&mut board, PieceKind::Rat, Blue, 4, 1);

        let swimming = board.piece(swimming);
        assert!(!swimming.can_capture(board.piece(land_rat), &board));
        assert!(!swimming.can_capture(board.piece(land_elephant), &board));
        assert!(swimming.can_capture(board.piece(water_rat), &board));
        assert!(!board.piece(land_rat).can_capture(swimming, &board));
    }

    #[test]
    fn test_cannot_capture_own_piece() {
        let mut board = Board::new();
        let a = place(&mut board, PieceKind::Lion, Red, 4, 3);
        let b = place(&mut board, PieceKind::Cat, Red, 4, 0);
        assert!(!board.piece(a).can_capture(board.piece(b), &board));
    }

    #[test]
    fn test_lion_river_jump() {
        let mut board = Board::new();
        let lion = place(&mut board, PieceKind::Lion, Blue, 2, 1);
        assert!(board.piece(lion).can_move_to(&board, Position::new(6, 1)));
        assert!(board.piece(lion).get_valid_moves(&board).contains(&Position::new(6, 1)));

        place(&mut board, PieceKind::Rat, Red, 4, 1);
        assert!(!board.piece(lion).can_move_to(&board, Position::new(6, 1)));
    }

    #[test]
    fn test_jump_blocked_by_own_rat() {
        let mut board = Board::new();
        let tiger = place(&mut board, PieceKind::Tiger, Red, 6, 2);
        place(&mut board, PieceKind::Rat, Red, 3, 2);
        assert!(!board.piece(tiger).can_move_to(&board, Position::new(2, 2)));
    }

    #[test]
    fn test_jump_requires_water_path() {
        let mut board = Board::new();
        let tiger = place(&mut board, PieceKind::Tiger, Red, 6, 3);
        // column 3 is a land bridge
        assert!(!board.piece(tiger).can_move_to(&board, Position::new(2, 3)));
        // horizontal jumps never span three water cells on this board
        let lion = place(&mut board, PieceKind::Lion, Red, 4, 0);
        assert!(!board.piece(lion).can_move_to(&board, Position::new(4, 4)));
    }

    #[test]
    fn test_jump_distance_must_be_exact() {
        let mut board = Board::new();
        let lion = place(&mut board, PieceKind::Lion, Red, 6, 1);
        assert!(!board.piece(lion).can_move_to(&board, Position::new(3, 1)));
        assert!(!board.piece(lion).can_move_to(&board, Position::new(1, 1)));
        assert!(board.piece(lion).can_move_to(&board, Position::new(2, 1)));
    }

    #[test]
    fn test_non_jumper_cannot_jump() {
        let mut board = Board::new();
        let leopard = place(&mut board, PieceKind::Leopard, Red, 6, 1);
        assert!(!board.piece(leopard).can_move_to(&board, Position::new(2, 1)));
    }

    #[test]
    fn test_jump_onto_own_piece_rejected() {
        let mut board = Board::new();
        let lion = place(&mut board, PieceKind::Lion, Red, 6, 4);
        place(&mut board, PieceKind::Dog, Red, 2, 4);
        assert!(!board.piece(lion).can_move_to(&board, Position::new(2, 4)));
    }

    #[test]
    fn test_valid_moves_corner() {
        let mut board = Board::new();
        let rat = place(&mut board, PieceKind::Rat, Red, 8, 0);
        let moves = board.piece(rat).get_valid_moves(&board);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Position::new(7, 0)));
        assert!(moves.contains(&Position::new(8, 1)));
    }

    #[test]
    fn test_valid_moves_tiger_on_bank() {
        let mut board = Board::new();
        let tiger = place(&mut board, PieceKind::Tiger, Red, 6, 5);
        let moves = board.piece(tiger).get_valid_moves(&board);
        // 5,5 is water; 6,4 / 6,6 / 7,5 are steps; 2,5 is the jump
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&Position::new(2, 5)));
        assert!(!moves.contains(&Position::new(5, 5)));
    }
}
