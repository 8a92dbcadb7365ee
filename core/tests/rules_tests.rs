// SPDX-License-Identifier: MIT OR Apache-2.0

use jungle_core::{Board, PieceKind, PlayerColor, Position};

fn pos(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

#[test]
fn standard_piece_stays_out_of_water() {
    let mut board = Board::new();
    let dog = board.spawn(PieceKind::Dog, PlayerColor::Red, pos(2, 1)).unwrap();
    let rat = board.spawn(PieceKind::Rat, PlayerColor::Red, pos(2, 4)).unwrap();

    assert!(!board.piece(dog).can_move_to(&board, pos(3, 1)), "water is off limits");
    assert!(board.piece(dog).can_move_to(&board, pos(2, 0)));
    assert!(board.piece(rat).can_move_to(&board, pos(3, 4)), "rat swims");
}

#[test]
fn nobody_enters_own_den() {
    let mut board = Board::new();
    let red = board.spawn(PieceKind::Wolf, PlayerColor::Red, pos(8, 2)).unwrap();
    let blue = board.spawn(PieceKind::Wolf, PlayerColor::Blue, pos(0, 2)).unwrap();

    assert!(!board.piece(red).can_move_to(&board, pos(8, 3)));
    assert!(!board.piece(blue).can_move_to(&board, pos(0, 3)));

    let raider = board.spawn(PieceKind::Cat, PlayerColor::Red, pos(0, 4)).unwrap();
    assert!(board.piece(raider).can_move_to(&board, pos(0, 3)));
}

#[test]
fn higher_rank_captures_lower() {
    let mut board = Board::new();
    let lion = board.spawn(PieceKind::Lion, PlayerColor::Red, pos(4, 3)).unwrap();
    let tiger = board.spawn(PieceKind::Tiger, PlayerColor::Blue, pos(3, 3)).unwrap();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Blue, pos(5, 3)).unwrap();

    let lion_p = board.piece(lion);
    assert!(lion_p.can_capture(board.piece(tiger), &board));
    assert!(!lion_p.can_capture(board.piece(elephant), &board));
    assert!(!board.piece(tiger).can_capture(board.piece(elephant), &board), "same side");
}

#[test]
fn equal_rank_trades() {
    let mut board = Board::new();
    let a = board.spawn(PieceKind::Leopard, PlayerColor::Red, pos(4, 3)).unwrap();
    let b = board.spawn(PieceKind::Leopard, PlayerColor::Blue, pos(3, 3)).unwrap();
    assert!(board.piece(a).can_capture(board.piece(b), &board));
    assert!(board.piece(b).can_capture(board.piece(a), &board));
}

#[test]
fn trap_strips_defender_rank() {
    let mut board = Board::new();
    // (7,2) is one of Red's traps
    let cat = board.spawn(PieceKind::Cat, PlayerColor::Red, pos(7, 1)).unwrap();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Blue, pos(7, 2)).unwrap();
    assert!(board.piece(cat).can_capture(board.piece(elephant), &board));

    // The same elephant in Blue's own trap keeps its rank
    let mut board = Board::new();
    let cat = board.spawn(PieceKind::Cat, PlayerColor::Red, pos(1, 3)).unwrap();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Blue, pos(1, 2)).unwrap();
    assert!(!board.piece(cat).can_capture(board.piece(elephant), &board));
}

#[test]
fn elephant_never_takes_rat_outside_trap() {
    let mut board = Board::new();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Red, pos(4, 3)).unwrap();
    let rat = board.spawn(PieceKind::Rat, PlayerColor::Blue, pos(3, 3)).unwrap();
    assert!(!board.piece(elephant).can_capture(board.piece(rat), &board));

    let mut board = Board::new();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Red, pos(8, 1)).unwrap();
    let rat = board.spawn(PieceKind::Rat, PlayerColor::Blue, pos(8, 2)).unwrap();
    assert!(board.piece(elephant).can_capture(board.piece(rat), &board));
}

#[test]
fn rat_takes_elephant_on_land_only() {
    let mut board = Board::new();
    let rat = board.spawn(PieceKind::Rat, PlayerColor::Red, pos(6, 1)).unwrap();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Blue, pos(6, 2)).unwrap();
    assert!(board.piece(rat).can_capture(board.piece(elephant), &board));

    let mut board = Board::new();
    let rat = board.spawn(PieceKind::Rat, PlayerColor::Red, pos(5, 1)).unwrap();
    let elephant = board.spawn(PieceKind::Elephant, PlayerColor::Blue, pos(6, 1)).unwrap();
    assert!(!board.piece(rat).can_capture(board.piece(elephant), &board));
}

#[test]
fn rats_fight_within_one_environment() {
    let mut board = Board::new();
    let swimmer = board.spawn(PieceKind::Rat, PlayerColor::Red, pos(4, 1)).unwrap();
    let other = board.spawn(PieceKind::Rat, PlayerColor::Blue, pos(3, 1)).unwrap();
    let walker = board.spawn(PieceKind::Rat, PlayerColor::Blue, pos(4, 0)).unwrap();

    assert!(board.piece(swimmer).can_capture(board.piece(other), &board));
    assert!(!board.piece(swimmer).can_capture(board.piece(walker), &board));
    assert!(!board.piece(walker).can_capture(board.piece(swimmer), &board));
}

#[test]
fn lion_jumps_river_vertically() {
    let mut board = Board::new();
    let lion = board.spawn(PieceKind::Lion, PlayerColor::Red, pos(2, 1)).unwrap();
    assert!(board.piece(lion).can_move_to(&board, pos(6, 1)));
    assert!(board.piece(lion).get_valid_moves(&board).contains(&pos(6, 1)));

    board.spawn(PieceKind::Rat, PlayerColor::Red, pos(4, 1));
    assert!(!board.piece(lion).can_move_to(&board, pos(6, 1)), "a rat blocks the jump");
}

#[test]
fn jump_needs_exact_distance_over_water() {
    let mut board = Board::new();
    let tiger = board.spawn(PieceKind::Tiger, PlayerColor::Blue, pos(2, 4)).unwrap();
    let t = board.piece(tiger);
    assert!(t.can_move_to(&board, pos(6, 4)));
    assert!(!t.can_move_to(&board, pos(5, 4)), "landing in water");
    assert!(!t.can_move_to(&board, pos(7, 4)), "too far");

    let mut board = Board::new();
    let tiger = board.spawn(PieceKind::Tiger, PlayerColor::Blue, pos(2, 3)).unwrap();
    assert!(!board.piece(tiger).can_move_to(&board, pos(6, 3)), "column 3 is land");
}

#[test]
fn horizontal_jump_never_clears_three_water_cells() {
    let mut board = Board::new();
    let lion = board.spawn(PieceKind::Lion, PlayerColor::Red, pos(4, 0)).unwrap();
    assert!(!board.piece(lion).can_move_to(&board, pos(4, 4)));
    assert!(!board
        .piece(lion)
        .get_valid_moves(&board)
        .iter()
        .any(|p| p.row() == 4 && p.col() != 0));
}

#[test]
fn jump_onto_enemy_follows_rank() {
    let mut board = Board::new();
    let tiger = board.spawn(PieceKind::Tiger, PlayerColor::Red, pos(6, 2)).unwrap();
    let lion = board.spawn(PieceKind::Lion, PlayerColor::Blue, pos(2, 2)).unwrap();

    let t = board.piece(tiger);
    assert!(t.can_move_to(&board, pos(2, 2)));
    assert!(!t.can_capture(board.piece(lion), &board));
    assert!(board.piece(lion).can_capture(t, &board));
}
