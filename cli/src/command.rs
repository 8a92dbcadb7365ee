// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of interactive commands
//!
//! Moves may be written in letter form (`a0 b1`, column letter then row
//! digit) or numeric form (`0,0 1,0`, `(0,0) (1,0)`, `0 0 1 0`, row first).
//! An optional `move`/`m` prefix and `from`/`to` filler words are accepted.

use jungle_core::{Position, BOARD_HEIGHT, BOARD_WIDTH};
use thiserror::Error;

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move { from: Position, to: Position },
    Undo,
    Save(String),
    Load(String),
    Record(String),
    Replay(String),
    /// List legal destinations of the piece at a square
    Hint(Position),
    New,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command cannot be empty. Use format like 'a0 b1' or '0,0 1,0' or type 'help' for more info.")]
    Empty,

    #[error("Invalid command '{0}'. Use formats like 'a0 b1', '0,0 1,0', or 'move from a0 to b1'. Type 'help' for more examples.")]
    UnknownFormat(String),

    #[error("Position ({row},{col}) is out of bounds. Valid range: rows 0-8, cols 0-6")]
    OutOfBounds { row: i64, col: i64 },

    #[error("Missing {what}. Usage: {command} <{what}>")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
}

const FILLER_WORDS: [&str; 4] = ["move", "m", "from", "to"];

/// Parse one line of user input
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let Some(keyword) = input.split_whitespace().next() else {
        return Err(CommandError::Empty);
    };
    let rest = input[keyword.len()..].trim();

    let filename = |command: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument {
                command,
                what: "filename",
            })
        } else {
            Ok(rest.to_string())
        }
    };

    match keyword.to_ascii_lowercase().as_str() {
        "undo" | "u" => Ok(Command::Undo),
        "save" | "s" => filename("save").map(Command::Save),
        "load" | "l" => filename("load").map(Command::Load),
        "record" | "rec" => filename("record").map(Command::Record),
        "replay" | "rep" => filename("replay").map(Command::Replay),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "new" => Ok(Command::New),
        "hint" | "moves" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "hint",
                    what: "position",
                });
            }
            parse_position(rest).map(Command::Hint)
        }
        _ => parse_move(input).map(|(from, to)| Command::Move { from, to }),
    }
}

/// Parse a move into its source and destination squares
pub fn parse_move(input: &str) -> Result<(Position, Position), CommandError> {
    let tokens = tokenize(input);
    let unknown = || CommandError::UnknownFormat(input.trim().to_string());

    match tokens.as_slice() {
        [] => Err(CommandError::Empty),
        [from, to] => {
            let from = parse_lettered(from).ok_or_else(unknown)??;
            let to = parse_lettered(to).ok_or_else(unknown)??;
            Ok((from, to))
        }
        [r1, c1, r2, c2] => {
            let n = |t: &str| t.parse::<i64>().map_err(|_| unknown());
            let from = checked(n(r1.as_str())?, n(c1.as_str())?)?;
            let to = checked(n(r2.as_str())?, n(c2.as_str())?)?;
            Ok((from, to))
        }
        _ => Err(unknown()),
    }
}

/// Parse a single square in either notation
pub fn parse_position(input: &str) -> Result<Position, CommandError> {
    let tokens = tokenize(input);
    let unknown = || CommandError::UnknownFormat(input.trim().to_string());

    match tokens.as_slice() {
        [] => Err(CommandError::Empty),
        [square] => parse_lettered(square).ok_or_else(unknown)?,
        [row, col] => {
            let row = row.parse::<i64>().map_err(|_| unknown())?;
            let col = col.parse::<i64>().map_err(|_| unknown())?;
            checked(row, col)
        }
        _ => Err(unknown()),
    }
}

/// Lowercase, turn brackets and commas into spaces, drop filler words
fn tokenize(input: &str) -> Vec<String> {
    let cleaned: String = input
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if matches!(c, '(' | ')' | ',') { ' ' } else { c })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|t| !FILLER_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// `None` if `token` is not letter+digits; otherwise the bounds-checked square
fn parse_lettered(token: &str) -> Option<Result<Position, CommandError>> {
    let mut chars = token.chars();
    let letter = chars.next().filter(char::is_ascii_lowercase)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let row = digits.parse::<i64>().ok()?;
    let col = i64::from(letter as u8 - b'a');
    Some(checked(row, col))
}

fn checked(row: i64, col: i64) -> Result<Position, CommandError> {
    let in_bounds = (0..i64::from(BOARD_HEIGHT)).contains(&row) && (0..i64::from(BOARD_WIDTH)).contains(&col);
    if !in_bounds {
        return Err(CommandError::OutOfBounds { row, col });
    }
    // Bounded above by the board size
    Ok(Position::new(row as i32, col as i32))
}
