// SPDX-License-Identifier: MIT OR Apache-2.0

//! `.jungle` save files
//!
//! A save holds the players, whose turn it is, the piece layout and the game
//! status as pretty-printed JSON. The move list is written for reference but
//! is not replayed on load, so a loaded game starts with empty history and
//! nothing to undo.

use crate::game::Game;
use crate::piece::PieceKind;
use crate::{GameError, GameStatus, PlayerColor, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of save files
pub const SAVE_EXTENSION: &str = "jungle";

/// Format version written to and accepted from save files
pub const SAVE_VERSION: &str = "1.0";

/// Errors raised while saving or loading a game
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed save file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a .jungle file: {}", .0.display())]
    WrongExtension(PathBuf),

    #[error("Unsupported save version: {0}")]
    UnsupportedVersion(String),

    #[error("Unknown piece type: {0}")]
    UnknownPiece(String),

    #[error("{kind} stored with rank {stored}, expected {expected}")]
    RankMismatch {
        kind: PieceKind,
        stored: u8,
        expected: u8,
    },

    #[error("Unknown player color: {0}")]
    UnknownColor(String),

    #[error("Malformed board position key: {0}")]
    BadPositionKey(String),

    #[error("Expected 2 players, found {0}")]
    PlayerCount(usize),

    #[error("Invalid layout: {0}")]
    Layout(#[from] GameError),
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: String,
    players: Vec<SavedPlayer>,
    current_player: usize,
    board_state: BTreeMap<String, SavedPiece>,
    #[serde(default)]
    move_history: Vec<SavedMove>,
    game_status: GameStatus,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedPlayer {
    name: String,
    color: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedPiece {
    piece: String,
    owner: String,
    rank: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedMove {
    piece_type: String,
    piece_rank: u8,
    owner_color: String,
    from_row: i32,
    from_col: i32,
    to_row: i32,
    to_col: i32,
    captured_piece_type: Option<String>,
    captured_piece_rank: Option<u8>,
    timestamp: String,
}

/// Replace or append the extension so `path` ends in `.ext`
pub(crate) fn with_extension(path: &Path, ext: &str) -> PathBuf {
    if path.extension().map_or(false, |e| e == ext) {
        path.to_path_buf()
    } else {
        path.with_extension(ext)
    }
}

/// Write `data` to a sibling temp file, then rename it over `path`
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".tmp_{}", file_name));
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(data)?;
        file.flush()?;
    }
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

fn position_key(pos: Position) -> String {
    format!("{},{}", pos.row(), pos.col())
}

fn parse_position_key(key: &str) -> Result<Position, PersistenceError> {
    let bad = || PersistenceError::BadPositionKey(key.to_string());
    let (row, col) = key.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse::<i32>().map_err(|_| bad())?;
    let col = col.trim().parse::<i32>().map_err(|_| bad())?;
    Ok(Position::new(row, col))
}

fn parse_color(text: &str) -> Result<PlayerColor, PersistenceError> {
    match text {
        "red" => Ok(PlayerColor::Red),
        "blue" => Ok(PlayerColor::Blue),
        other => Err(PersistenceError::UnknownColor(other.to_string())),
    }
}

fn to_save_file(game: &Game) -> SaveFile {
    let players = game
        .players()
        .iter()
        .map(|p| SavedPlayer {
            name: p.name().to_string(),
            color: p.color().to_string(),
        })
        .collect();

    let board_state = game
        .board()
        .occupied()
        .map(|(pos, _, piece)| {
            (
                position_key(pos),
                SavedPiece {
                    piece: piece.kind().to_string(),
                    owner: piece.owner().to_string(),
                    rank: piece.rank(),
                },
            )
        })
        .collect();

    let move_history = game
        .move_history()
        .iter()
        .map(|mv| SavedMove {
            piece_type: mv.kind().to_string(),
            piece_rank: mv.kind().rank(),
            owner_color: mv.owner().to_string(),
            from_row: mv.from().row(),
            from_col: mv.from().col(),
            to_row: mv.to().row(),
            to_col: mv.to().col(),
            captured_piece_type: mv.captured_kind().map(|k| k.to_string()),
            captured_piece_rank: mv.captured_kind().map(|k| k.rank()),
            timestamp: mv.timestamp().to_rfc3339(),
        })
        .collect();

    SaveFile {
        version: SAVE_VERSION.to_string(),
        players,
        current_player: game.current_player_index(),
        board_state,
        move_history,
        game_status: game.status(),
    }
}

/// Save `game` as JSON.
///
/// The extension is forced to `.jungle`; the path actually written is returned.
pub fn save_game(game: &Game, path: impl AsRef<Path>) -> Result<PathBuf, PersistenceError> {
    let path = with_extension(path.as_ref(), SAVE_EXTENSION);
    let json = serde_json::to_string_pretty(&to_save_file(game))?;

    write_atomic(&path, json.as_bytes()).map_err(|source| PersistenceError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        game = %game.id(),
        path = %path.display(),
        bytes = json.len(),
        "Game saved"
    );
    Ok(path)
}

/// Load a game written by [`save_game`]
pub fn load_game(path: impl AsRef<Path>) -> Result<Game, PersistenceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PersistenceError::NotFound(path.to_path_buf()));
    }
    if path.extension().map_or(true, |e| e != SAVE_EXTENSION) {
        return Err(PersistenceError::WrongExtension(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let save: SaveFile = serde_json::from_str(&text)?;

    if save.version != SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion(save.version));
    }

    let [red, blue] = match <[SavedPlayer; 2]>::try_from(save.players) {
        Ok(players) => players,
        Err(players) => return Err(PersistenceError::PlayerCount(players.len())),
    };

    let mut layout = Vec::with_capacity(save.board_state.len());
    for (key, saved) in &save.board_state {
        let pos = parse_position_key(key)?;
        let kind: PieceKind = saved
            .piece
            .parse()
            .map_err(|_| PersistenceError::UnknownPiece(saved.piece.clone()))?;
        if saved.rank != kind.rank() {
            return Err(PersistenceError::RankMismatch {
                kind,
                stored: saved.rank,
                expected: kind.rank(),
            });
        }
        let owner = parse_color(&saved.owner)?;
        layout.push((pos, kind, owner));
    }

    let game = Game::from_layout(
        red.name,
        blue.name,
        layout,
        save.current_player,
        save.game_status,
    )?;

    tracing::info!(
        game = %game.id(),
        path = %path.display(),
        pieces = game.board().piece_count(),
        "Game loaded"
    );
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_extension() {
        assert_eq!(with_extension(Path::new("a"), "jungle"), PathBuf::from("a.jungle"));
        assert_eq!(with_extension(Path::new("a.jungle"), "jungle"), PathBuf::from("a.jungle"));
        assert_eq!(with_extension(Path::new("a.txt"), "jungle"), PathBuf::from("a.jungle"));
    }

    #[test]
    fn test_position_key() {
        assert_eq!(position_key(Position::new(8, 3)), "8,3");
        assert_eq!(parse_position_key("8,3").unwrap(), Position::new(8, 3));
        assert!(matches!(
            parse_position_key("8;3"),
            Err(PersistenceError::BadPositionKey(_))
        ));
    }

    #[test]
    fn test_save_file_shape() {
        let game = Game::new("Alice", "Bob");
        let value = serde_json::to_value(to_save_file(&game)).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["current_player"], 0);
        assert_eq!(value["game_status"], "ongoing");
        assert_eq!(value["players"][1]["color"], "blue");
        assert_eq!(value["board_state"]["6,0"]["piece"], "Lion");
        assert_eq!(value["board_state"]["6,0"]["owner"], "red");
        assert_eq!(value["board_state"]["6,0"]["rank"], 7);
    }
}
