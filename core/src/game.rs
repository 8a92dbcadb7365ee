// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game orchestration: turn order, move pipeline, victory and undo

use crate::board::Board;
use crate::game_state::GameState;
use crate::moves::{Move, MoveResult};
use crate::piece::{PieceId, PieceKind};
use crate::player::Player;
use crate::{GameError, GameStatus, PlayerColor, Position};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// Standard opening position
const STARTING_LAYOUT: [(PieceKind, PlayerColor, i32, i32); 16] = [
    (PieceKind::Lion, PlayerColor::Red, 6, 0),
    (PieceKind::Tiger, PlayerColor::Red, 6, 6),
    (PieceKind::Dog, PlayerColor::Red, 7, 1),
    (PieceKind::Cat, PlayerColor::Red, 7, 5),
    (PieceKind::Rat, PlayerColor::Red, 8, 0),
    (PieceKind::Leopard, PlayerColor::Red, 8, 2),
    (PieceKind::Wolf, PlayerColor::Red, 8, 4),
    (PieceKind::Elephant, PlayerColor::Red, 8, 6),
    (PieceKind::Elephant, PlayerColor::Blue, 0, 0),
    (PieceKind::Wolf, PlayerColor::Blue, 0, 2),
    (PieceKind::Leopard, PlayerColor::Blue, 0, 4),
    (PieceKind::Rat, PlayerColor::Blue, 0, 6),
    (PieceKind::Cat, PlayerColor::Blue, 1, 1),
    (PieceKind::Dog, PlayerColor::Blue, 1, 5),
    (PieceKind::Tiger, PlayerColor::Blue, 2, 0),
    (PieceKind::Lion, PlayerColor::Blue, 2, 6),
];

/// A single game of Jungle
///
/// Red (index 0) moves first. Once the status leaves
/// [`GameStatus::Ongoing`] the game refuses further moves and undos.
#[derive(Debug, Clone)]
pub struct Game {
    id: Uuid,
    board: Board,
    players: [Player; 2],
    current_player_index: usize,
    move_history: Vec<Move>,
    undo_stack: VecDeque<GameState>,
    status: GameStatus,
}

impl Game {
    /// Number of consecutive moves that can be taken back
    pub const MAX_UNDO_MOVES: usize = 3;

    /// Start a new game from the standard opening position
    pub fn new(red_name: impl Into<String>, blue_name: impl Into<String>) -> Self {
        let mut game = Self::empty(red_name.into(), blue_name.into());
        for (kind, owner, row, col) in STARTING_LAYOUT {
            if let Some(id) = game.board.spawn(kind, owner, Position::new(row, col)) {
                game.players[owner.index()].add_piece(id);
            }
        }
        tracing::info!(game = %game.id, "New game created");
        game
    }

    /// The standard opening position as `(position, kind, owner)` triples
    pub fn starting_layout() -> Vec<(Position, PieceKind, PlayerColor)> {
        STARTING_LAYOUT
            .iter()
            .map(|&(kind, owner, row, col)| (Position::new(row, col), kind, owner))
            .collect()
    }

    /// Rebuild a game from a piece layout, turn and status.
    ///
    /// Move history and undo snapshots start empty.
    pub fn from_layout<I>(
        red_name: impl Into<String>,
        blue_name: impl Into<String>,
        pieces: I,
        current_player_index: usize,
        status: GameStatus,
    ) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (Position, PieceKind, PlayerColor)>,
    {
        if PlayerColor::from_index(current_player_index).is_none() {
            return Err(GameError::InvalidPlayerIndex(current_player_index));
        }

        let mut game = Self::empty(red_name.into(), blue_name.into());
        for (pos, kind, owner) in pieces {
            if game.board.get_piece(pos).is_some() {
                return Err(GameError::OccupiedPosition(pos));
            }
            let id = game
                .board
                .spawn(kind, owner, pos)
                .ok_or(GameError::InvalidPosition(pos))?;
            game.players[owner.index()].add_piece(id);
        }
        game.current_player_index = current_player_index;
        game.status = status;

        tracing::info!(
            game = %game.id,
            pieces = game.board.piece_count(),
            ?status,
            "Game restored from layout"
        );
        Ok(game)
    }

    fn empty(red_name: String, blue_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board: Board::new(),
            players: [
                Player::new(red_name, PlayerColor::Red),
                Player::new(blue_name, PlayerColor::Blue),
            ],
            current_player_index: 0,
            move_history: Vec::new(),
            undo_stack: VecDeque::with_capacity(Self::MAX_UNDO_MOVES + 1),
            status: GameStatus::Ongoing,
        }
    }

    /// Identifier used to correlate log lines of this game
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Both players, Red first
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, color: PlayerColor) -> &Player {
        &self.players[color.index()]
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Player whose turn it is (or who made the winning move)
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1 - self.current_player_index]
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Winning player, if any
    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Player1Wins => Some(&self.players[0]),
            GameStatus::Player2Wins => Some(&self.players[1]),
            GameStatus::Ongoing | GameStatus::Draw => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Number of moves that can currently be undone
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Record-file line for a move of this game
    pub fn record_string(&self, mv: &Move) -> String {
        mv.to_record_string(self.player(mv.owner()).name())
    }

    /// Destinations the piece at `from` may move to, captures included
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        let Some(piece) = self.board.piece_at(from) else {
            return Vec::new();
        };
        piece
            .get_valid_moves(&self.board)
            .into_iter()
            .filter(|to| {
                self.board
                    .piece_at(*to)
                    .map_or(true, |target| piece.can_capture(target, &self.board))
            })
            .collect()
    }

    /// Attempt to move the piece at `from` to `to`.
    ///
    /// Rule violations come back as an unsuccessful [`MoveResult`] and leave
    /// the game untouched. Only a move on a finished game is an `Err`.
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveResult, GameError> {
        let span = tracing::debug_span!("game.make_move", game = %self.id, %from, %to);
        let _enter = span.enter();

        if self.is_game_over() {
            tracing::warn!(status = ?self.status, "Move attempted after game over");
            return Err(GameError::GameOver);
        }

        match self.validate_move(from, to) {
            Ok((piece, captured)) => Ok(self.apply_move(piece, from, to, captured)),
            Err(reason) => {
                tracing::debug!(%reason, "Move rejected");
                Ok(MoveResult::rejected(reason))
            }
        }
    }

    /// Take back the most recent move.
    ///
    /// Returns `Ok(false)` when there is nothing left to undo.
    pub fn undo_move(&mut self) -> Result<bool, GameError> {
        let span = tracing::debug_span!("game.undo_move", game = %self.id);
        let _enter = span.enter();

        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let Some(state) = self.undo_stack.pop_back() else {
            tracing::warn!("Nothing to undo");
            return Ok(false);
        };

        state.restore_to_board(&mut self.board);
        self.current_player_index = state.current_player_index();

        if let Some(mv) = self.move_history.pop() {
            if let Some(captured) = mv.captured_piece() {
                let owner = self.board.piece(captured).owner();
                self.players[owner.index()].add_piece(captured);
            }
            tracing::info!(
                kind = %mv.kind(),
                from = %mv.from(),
                to = %mv.to(),
                remaining = self.undo_stack.len(),
                "Move undone"
            );
        }

        Ok(true)
    }

    fn validate_move(&self, from: Position, to: Position) -> Result<(PieceId, Option<PieceId>), GameError> {
        if !self.board.is_valid_position(from) {
            return Err(GameError::InvalidPosition(from));
        }
        if !self.board.is_valid_position(to) {
            return Err(GameError::InvalidPosition(to));
        }

        let id = self
            .board
            .get_piece(from)
            .ok_or(GameError::PieceNotFound(from))?;
        let piece = self.board.piece(id);

        let current = self.current_player();
        if piece.owner() != current.color() {
            return Err(GameError::WrongPlayer {
                position: from,
                owner: self.player(piece.owner()).name().to_string(),
                current: current.name().to_string(),
            });
        }

        if !piece.can_move_to(&self.board, to) {
            return Err(GameError::InvalidMove {
                kind: piece.kind(),
                from,
                to,
            });
        }

        let captured = match self.board.get_piece(to) {
            None => None,
            Some(target_id) => {
                let target = self.board.piece(target_id);
                if target.owner() == piece.owner() {
                    return Err(GameError::InvalidMove {
                        kind: piece.kind(),
                        from,
                        to,
                    });
                }
                if !piece.can_capture(target, &self.board) {
                    return Err(GameError::InvalidCapture {
                        attacker: piece.kind(),
                        defender: target.kind(),
                    });
                }
                Some(target_id)
            }
        };

        Ok((id, captured))
    }

    fn apply_move(&mut self, id: PieceId, from: Position, to: Position, captured: Option<PieceId>) -> MoveResult {
        self.save_game_state();

        let mover = self.current_player().color();
        self.board.set_piece(from, None);
        self.board.set_piece(to, Some(id));
        self.board.relocate(id, to);

        let kind = self.board.piece(id).kind();
        let captured = captured.map(|cid| {
            self.players[mover.opposite().index()].remove_piece(cid);
            (cid, self.board.piece(cid).kind())
        });

        let mv = Move::new(id, kind, mover, from, to, captured);
        let mut message = format!("{} moved from {} to {}", kind, from, to);
        if let Some((_, taken)) = captured {
            message.push_str(&format!(" (captured {})", taken));
        }
        tracing::info!(record = %self.record_string(&mv), "Move applied");
        self.move_history.push(mv);

        self.check_victory_conditions(to, mover);
        if !self.is_game_over() {
            self.switch_turn();
        }

        MoveResult::applied(message, captured)
    }

    fn save_game_state(&mut self) {
        let state = GameState::capture_from_board(
            &self.board,
            self.current_player_index,
            self.move_history.len(),
        );
        self.undo_stack.push_back(state);
        while self.undo_stack.len() > Self::MAX_UNDO_MOVES {
            self.undo_stack.pop_front();
        }
    }

    /// Den entry first, then elimination
    fn check_victory_conditions(&mut self, landed: Position, mover: PlayerColor) {
        let opponent = mover.opposite();

        if self.board.is_den(landed, Some(opponent)) {
            self.status = GameStatus::win_for(mover);
            tracing::info!(winner = %self.player(mover).name(), "Den reached");
            return;
        }

        if !self.player(opponent).has_pieces() {
            self.status = GameStatus::win_for(mover);
            tracing::info!(winner = %self.player(mover).name(), "All opposing pieces captured");
        }
    }

    fn switch_turn(&mut self) {
        self.current_player_index = 1 - self.current_player_index;
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game(current_player={}, status={:?}, moves={})",
            self.current_player(),
            self.status,
            self.move_history.len()
        )
    }
}
