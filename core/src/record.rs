// SPDX-License-Identifier: MIT OR Apache-2.0

//! `.record` move logs and replay
//!
//! ```text
//! JUNGLE_GAME_RECORD_V1.0
//! Players: Alice (Red), Bob (Blue)
//! Start Time: 2024-05-01 14:03:11
//! Move 1: Alice - Rat from (8,0) to (7,0)
//! Move 2: Bob - Rat from (0,6) to (1,6)
//! Game Result: In Progress
//! ```

use crate::game::Game;
use crate::moves::{RecordParseError, RecordedMove};
use crate::persistence::{with_extension, write_atomic};
use crate::{GameError, PlayerColor};
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const RECORD_EXTENSION: &str = "record";
pub const RECORD_HEADER: &str = "JUNGLE_GAME_RECORD_V1.0";

const HEADER_PREFIX: &str = "JUNGLE_GAME_RECORD_V";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DEFAULT_RED_NAME: &str = "Player 1";
const DEFAULT_BLUE_NAME: &str = "Player 2";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a .record file: {}", .0.display())]
    WrongExtension(PathBuf),

    #[error("Record file is empty")]
    Empty,

    #[error("Invalid record file format: missing header")]
    MissingHeader,

    #[error("Invalid move on line {line}: {source}")]
    BadMove {
        line: usize,
        #[source]
        source: RecordParseError,
    },

    #[error("Failed to replay move {number}: {reason}")]
    ReplayRejected { number: usize, reason: String },
}

/// Contents of a record file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameRecord {
    pub red_name: Option<String>,
    pub blue_name: Option<String>,
    pub start_time: Option<String>,
    pub moves: Vec<RecordedMove>,
    pub result: Option<String>,
}

/// Render the full record text for `game`
pub fn record_text(game: &Game) -> String {
    let [red, blue] = game.players();
    let mut lines = vec![
        RECORD_HEADER.to_string(),
        format!(
            "Players: {} ({}), {} ({})",
            red.name(),
            PlayerColor::Red.title(),
            blue.name(),
            PlayerColor::Blue.title()
        ),
    ];

    let start = game
        .move_history()
        .first()
        .map(|mv| mv.timestamp())
        .unwrap_or_else(Local::now);
    lines.push(format!("Start Time: {}", start.format(TIME_FORMAT)));

    for (i, mv) in game.move_history().iter().enumerate() {
        lines.push(format!("Move {}: {}", i + 1, game.record_string(mv)));
    }

    if game.is_game_over() {
        match game.winner() {
            Some(winner) => lines.push(format!("Game Result: {} Wins", winner.name())),
            None => lines.push("Game Result: Draw".to_string()),
        }
        if let Some(last) = game.move_history().last() {
            lines.push(format!("End Time: {}", last.timestamp().format(TIME_FORMAT)));
        }
    } else {
        lines.push("Game Result: In Progress".to_string());
    }

    lines.join("\n")
}

/// Write the move log of `game`; the extension is forced to `.record`
pub fn save_record(game: &Game, path: impl AsRef<Path>) -> Result<PathBuf, RecordError> {
    let path = with_extension(path.as_ref(), RECORD_EXTENSION);
    let text = record_text(game);
    write_atomic(&path, text.as_bytes()).map_err(|source| RecordError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        game = %game.id(),
        path = %path.display(),
        moves = game.move_history().len(),
        "Record saved"
    );
    Ok(path)
}

/// Parse record text
pub fn parse_record(text: &str) -> Result<GameRecord, RecordError> {
    if text.trim().is_empty() {
        return Err(RecordError::Empty);
    }

    let mut lines = text.lines().map(str::trim).enumerate();
    let (_, first) = lines.next().ok_or(RecordError::Empty)?;
    if !first.starts_with(HEADER_PREFIX) {
        return Err(RecordError::MissingHeader);
    }

    let mut record = GameRecord::default();
    for (idx, line) in lines {
        if let Some(players) = line.strip_prefix("Players:") {
            if let Some((red, blue)) = parse_players(players.trim()) {
                record.red_name = Some(red);
                record.blue_name = Some(blue);
            }
        } else if let Some(start) = line.strip_prefix("Start Time:") {
            record.start_time = Some(start.trim().to_string());
        } else if let Some(result) = line.strip_prefix("Game Result:") {
            record.result = Some(result.trim().to_string());
        } else if line.starts_with("Move ") {
            let Some((_, body)) = line.split_once(": ") else {
                continue;
            };
            let mv = RecordedMove::parse(body).map_err(|source| RecordError::BadMove {
                line: idx + 1,
                source,
            })?;
            record.moves.push(mv);
        }
    }

    Ok(record)
}

/// `Alice (Red), Bob (Blue)` into its two names
fn parse_players(text: &str) -> Option<(String, String)> {
    let red_tag = format!(" ({}), ", PlayerColor::Red.title());
    let blue_tag = format!(" ({})", PlayerColor::Blue.title());
    let (red, blue) = text.split_once(&red_tag)?;
    let blue = blue.strip_suffix(&blue_tag)?;
    Some((red.trim().to_string(), blue.trim().to_string()))
}

fn read_record_file(path: &Path) -> Result<String, RecordError> {
    if !path.exists() {
        return Err(RecordError::NotFound(path.to_path_buf()));
    }
    if path.extension().map_or(true, |e| e != RECORD_EXTENSION) {
        return Err(RecordError::WrongExtension(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a record file
pub fn load_record(path: impl AsRef<Path>) -> Result<GameRecord, RecordError> {
    let path = path.as_ref();
    let record = parse_record(&read_record_file(path)?)?;
    tracing::info!(path = %path.display(), moves = record.moves.len(), "Record loaded");
    Ok(record)
}

/// Replay a parsed record on a fresh game.
///
/// Names given here take precedence over the names in the record.
pub fn replay(record: &GameRecord, red_name: Option<&str>, blue_name: Option<&str>) -> Result<Game, RecordError> {
    let red = red_name
        .map(str::to_string)
        .or_else(|| record.red_name.clone())
        .unwrap_or_else(|| DEFAULT_RED_NAME.to_string());
    let blue = blue_name
        .map(str::to_string)
        .or_else(|| record.blue_name.clone())
        .unwrap_or_else(|| DEFAULT_BLUE_NAME.to_string());

    let mut game = Game::new(red, blue);
    for (i, mv) in record.moves.iter().enumerate() {
        let number = i + 1;
        let rejected = |reason: String| RecordError::ReplayRejected { number, reason };
        let result = game
            .make_move(mv.from, mv.to)
            .map_err(|e: GameError| rejected(e.to_string()))?;
        if !result.is_success() {
            return Err(rejected(result.message().to_string()));
        }
    }

    tracing::info!(
        game = %game.id(),
        moves = record.moves.len(),
        status = ?game.status(),
        "Record replayed"
    );
    Ok(game)
}

/// Load a record file and replay it
pub fn replay_record(
    path: impl AsRef<Path>,
    red_name: Option<&str>,
    blue_name: Option<&str>,
) -> Result<Game, RecordError> {
    let record = load_record(path)?;
    replay(&record, red_name, blue_name)
}
