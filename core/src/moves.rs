// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move records and move-attempt results
//!
//! A [`Move`] is written once per applied move and never changes. Its
//! textual form is
//!
//! ```text
//! <owner-name> - <PieceKind> from (<row>,<col>) to (<row>,<col>)[ (captured <PieceKind>)]
//! ```
//!
//! and [`RecordedMove::parse`] reads it back.

use crate::piece::{PieceId, PieceKind};
use crate::{GameError, PlayerColor, Position};
use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CAPTURE_MARKER: &str = " (captured ";

/// A move that was applied to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    piece: PieceId,
    kind: PieceKind,
    owner: PlayerColor,
    from: Position,
    to: Position,
    captured: Option<(PieceId, PieceKind)>,
    timestamp: DateTime<Local>,
}

impl Move {
    pub(crate) fn new(
        piece: PieceId,
        kind: PieceKind,
        owner: PlayerColor,
        from: Position,
        to: Position,
        captured: Option<(PieceId, PieceKind)>,
    ) -> Self {
        Self {
            piece,
            kind,
            owner,
            from,
            to,
            captured,
            timestamp: Local::now(),
        }
    }

    pub fn piece(&self) -> PieceId {
        self.piece
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn owner(&self) -> PlayerColor {
        self.owner
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    /// Handle of the piece taken by this move
    pub fn captured_piece(&self) -> Option<PieceId> {
        self.captured.map(|(id, _)| id)
    }

    pub fn captured_kind(&self) -> Option<PieceKind> {
        self.captured.map(|(_, kind)| kind)
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Render this move in record-file form
    pub fn to_record_string(&self, owner_name: &str) -> String {
        let mut line = format!(
            "{} - {} from {} to {}",
            owner_name, self.kind, self.from, self.to
        );
        if let Some(kind) = self.captured_kind() {
            line.push_str(&format!("{}{})", CAPTURE_MARKER, kind));
        }
        line
    }
}

/// Outcome of a move attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    success: bool,
    message: String,
    captured: Option<(PieceId, PieceKind)>,
    failure: Option<GameError>,
}

impl MoveResult {
    pub(crate) fn applied(message: String, captured: Option<(PieceId, PieceKind)>) -> Self {
        Self {
            success: true,
            message,
            captured,
            failure: None,
        }
    }

    pub(crate) fn rejected(error: GameError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            captured: None,
            failure: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn captured_piece(&self) -> Option<PieceId> {
        self.captured.map(|(id, _)| id)
    }

    pub fn captured_kind(&self) -> Option<PieceKind> {
        self.captured.map(|(_, kind)| kind)
    }

    /// Rule that rejected the move, if it was rejected
    pub fn failure(&self) -> Option<&GameError> {
        self.failure.as_ref()
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Error returned for a line that does not follow the record grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid record string format: {0}")]
pub struct RecordParseError(pub String);

/// A move parsed back from its record-file form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMove {
    pub player_name: String,
    pub piece_kind: PieceKind,
    pub from: Position,
    pub to: Position,
    pub captured_kind: Option<PieceKind>,
}

impl RecordedMove {
    /// Parse a record line produced by [`Move::to_record_string`].
    ///
    /// The grammar is matched from the right, so the player name may contain
    /// anything, including `" - "`.
    pub fn parse(line: &str) -> Result<Self, RecordParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let err = || RecordParseError(line.to_string());

        let (body, captured_kind) = split_capture(line);

        let (rest, to) = body.rsplit_once(" to ").ok_or_else(err)?;
        let to = parse_position(to).ok_or_else(err)?;
        let (rest, from) = rest.rsplit_once(" from ").ok_or_else(err)?;
        let from = parse_position(from).ok_or_else(err)?;
        let (player_name, kind) = rest.rsplit_once(" - ").ok_or_else(err)?;
        let piece_kind = kind.parse::<PieceKind>().map_err(|_| err())?;

        if player_name.is_empty() {
            return Err(err());
        }

        Ok(Self {
            player_name: player_name.to_string(),
            piece_kind,
            from,
            to,
            captured_kind,
        })
    }
}

impl FromStr for RecordedMove {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Peel off a trailing ` (captured Kind)` if one is present
fn split_capture(line: &str) -> (&str, Option<PieceKind>) {
    let captured = line
        .strip_suffix(')')
        .and_then(|inner| inner.rsplit_once(CAPTURE_MARKER))
        .and_then(|(body, kind)| kind.parse::<PieceKind>().ok().map(|k| (body, k)));

    match captured {
        Some((body, kind)) => (body, Some(kind)),
        None => (line, None),
    }
}

/// Parse `(row,col)` with non-negative integers
fn parse_position(text: &str) -> Option<Position> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let (row, col) = inner.split_once(',')?;
    let row: u8 = row.parse().ok()?;
    let col: u8 = col.parse().ok()?;
    Some(Position::new(row.into(), col.into()))
}
