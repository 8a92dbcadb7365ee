// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for board bounds, movement, traps and record strings

use jungle_core::board::terrain_at;
use jungle_core::moves::RecordedMove;
use jungle_core::{Board, Game, PieceKind, PlayerColor, Position, TerrainType};
use proptest::prelude::*;

const STANDARD: [PieceKind; 5] = [
    PieceKind::Cat,
    PieceKind::Dog,
    PieceKind::Wolf,
    PieceKind::Leopard,
    PieceKind::Elephant,
];

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn any_color() -> impl Strategy<Value = PlayerColor> {
    prop_oneof![Just(PlayerColor::Red), Just(PlayerColor::Blue)]
}

fn on_board() -> impl Strategy<Value = Position> {
    (0..9i32, 0..7i32).prop_map(|(r, c)| Position::new(r, c))
}

proptest! {
    #[test]
    fn off_board_access_is_inert(row in -50i32..50, col in -50i32..50) {
        prop_assume!(!(0..9).contains(&row) || !(0..7).contains(&col));
        let pos = Position::new(row, col);
        let mut board = Board::new();

        prop_assert!(!board.is_valid_position(pos));
        prop_assert_eq!(board.get_piece(pos), None);
        board.set_piece(pos, None);
        prop_assert_eq!(board.get_piece(pos), None);
        prop_assert!(board.spawn(PieceKind::Cat, PlayerColor::Red, pos).is_none());
        prop_assert!(!board.is_water(pos));
        prop_assert!(!board.is_den(pos, None));
        prop_assert!(!board.is_trap(pos, None));
    }

    #[test]
    fn standard_piece_movement(
        kind in prop::sample::select(STANDARD.to_vec()),
        owner in any_color(),
        from in on_board(),
        to in (-1..10i32, -1..8i32).prop_map(|(r, c)| Position::new(r, c)),
        friend in any::<bool>(),
    ) {
        prop_assume!(terrain_at(from) != TerrainType::Water);
        let mut board = Board::new();
        let id = board.spawn(kind, owner, from).unwrap();
        if friend && to != from {
            board.spawn(PieceKind::Rat, owner, to);
        }

        let expected = from.is_adjacent(to)
            && board.is_valid_position(to)
            && !board.is_water(to)
            && !board.is_den(to, Some(owner))
            && !(friend && board.get_piece(to).is_some());
        prop_assert_eq!(board.piece(id).can_move_to(&board, to), expected);
    }

    #[test]
    fn trap_override_beats_rank(
        attacker in any_kind(),
        defender in any_kind(),
        owner in any_color(),
        trap in prop::sample::select(vec![(0, 2), (0, 4), (1, 2), (1, 4), (7, 2), (7, 4), (8, 2), (8, 4)]),
    ) {
        let trap = Position::new(trap.0, trap.1);
        let mut board = Board::new();
        let target = board.spawn(defender, owner.opposite(), trap).unwrap();
        let source = Board::positions()
            .find(|p| p.is_adjacent(trap))
            .unwrap();
        let hunter = board.spawn(attacker, owner, source).unwrap();

        let can = board.piece(hunter).can_capture(board.piece(target), &board);
        if board.is_trap(trap, Some(owner)) {
            prop_assert!(can);
        }
    }

    #[test]
    fn record_string_round_trips(name in "\\PC{1,40}") {
        let mut game = Game::new(name.clone(), "Other");
        game.make_move(Position::new(8, 0), Position::new(7, 0)).unwrap();
        let line = game.record_string(&game.move_history()[0]);
        let parsed = RecordedMove::parse(&line).unwrap();

        prop_assert_eq!(parsed.player_name, name);
        prop_assert_eq!(parsed.piece_kind, PieceKind::Rat);
        prop_assert_eq!(parsed.from, Position::new(8, 0));
        prop_assert_eq!(parsed.to, Position::new(7, 0));
        prop_assert_eq!(parsed.captured_kind, None);
    }
}
