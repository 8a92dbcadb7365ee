// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering and console messages for the CLI.

use jungle_core::{
    Board, Game, MoveResult, Piece, PieceKind, PlayerColor, Position, TerrainType, BOARD_HEIGHT,
    BOARD_WIDTH,
};

const RULE: &str = "==================================================";
const RECENT_MOVES: usize = 5;

/// Single-letter symbol of a piece kind (Leopard is `P`)
pub fn piece_symbol(kind: PieceKind) -> char {
    match kind {
        PieceKind::Rat => 'R',
        PieceKind::Cat => 'C',
        PieceKind::Dog => 'D',
        PieceKind::Wolf => 'W',
        PieceKind::Leopard => 'P',
        PieceKind::Tiger => 'T',
        PieceKind::Lion => 'L',
        PieceKind::Elephant => 'E',
    }
}

/// Red pieces are lowercase, Blue pieces uppercase
pub fn render_piece(piece: &Piece) -> char {
    let symbol = piece_symbol(piece.kind());
    match piece.owner() {
        PlayerColor::Red => symbol.to_ascii_lowercase(),
        PlayerColor::Blue => symbol,
    }
}

fn terrain_marker(terrain: TerrainType) -> char {
    match terrain {
        TerrainType::Water => '~',
        TerrainType::Den => '#',
        TerrainType::Trap => '*',
        TerrainType::Land => '.',
    }
}

/// Render the board as ASCII art
pub fn render_board(board: &Board) -> String {
    let border = format!("  +{}+", "-".repeat((BOARD_WIDTH * 2 - 1) as usize));
    let mut output = String::new();

    // Column labels
    output.push_str("   ");
    for col in 0..BOARD_WIDTH {
        output.push_str(&format!(" {}", col));
    }
    output.push('\n');
    output.push_str(&border);
    output.push('\n');

    for row in 0..BOARD_HEIGHT {
        output.push_str(&format!("{} |", row));
        let cells: Vec<String> = (0..BOARD_WIDTH)
            .map(|col| {
                let pos = Position::new(row, col);
                match board.piece_at(pos) {
                    Some(piece) => render_piece(piece),
                    None => terrain_marker(board.get_terrain(pos)),
                }
                .to_string()
            })
            .collect();
        output.push_str(&cells.join(" "));
        output.push_str("|\n");
    }

    output.push_str(&border);
    output.push('\n');
    output
}

pub fn render_legend() -> String {
    let mut lines = vec![
        "Terrain Legend:".to_string(),
        "  . = Land".to_string(),
        "  ~ = Water".to_string(),
        "  # = Den".to_string(),
        "  * = Trap".to_string(),
        String::new(),
        "Piece Legend:".to_string(),
    ];
    for kind in PieceKind::ALL {
        let symbol = piece_symbol(kind);
        lines.push(format!(
            "  {}/{} = {} ({})",
            symbol,
            symbol.to_ascii_lowercase(),
            kind,
            kind.rank()
        ));
    }
    lines.push(String::new());
    lines.push("  UPPERCASE = Blue Player".to_string());
    lines.push("  lowercase = Red Player".to_string());
    lines.join("\n")
}

/// Players, turn or result, and piece counts
pub fn render_status(game: &Game) -> String {
    let [red, blue] = game.players();
    let mut lines = vec![format!("Players: {} vs {}", red, blue)];

    if game.is_game_over() {
        match game.winner() {
            Some(winner) => lines.push(format!("Game Over - Winner: {}", winner)),
            None => lines.push("Game Over - Draw".to_string()),
        }
    } else {
        lines.push(format!("Current Turn: {}", game.current_player()));
        lines.push(format!(
            "Pieces Remaining: {}={}, {}={}",
            red.name(),
            red.piece_count(),
            blue.name(),
            blue.piece_count()
        ));
    }
    lines.push(format!("Moves Played: {}", game.move_history().len()));
    lines.join("\n")
}

fn render_recent_moves(game: &Game) -> String {
    let history = game.move_history();
    let start = history.len().saturating_sub(RECENT_MOVES);
    let mut lines = vec!["Recent Moves:".to_string(), "-".repeat(RULE.len())];
    for (i, mv) in history.iter().enumerate().skip(start) {
        lines.push(format!("{}. {}", i + 1, game.record_string(mv)));
    }
    if start > 0 {
        lines.push(format!("... ({} earlier moves)", start));
    }
    lines.join("\n")
}

/// Full screen: header, status, board, recent moves, undo availability
pub fn render_game(game: &Game) -> String {
    let mut sections = vec![
        format!("{}\nJUNGLE GAME\n{}", RULE, RULE),
        render_status(game),
        render_board(game.board()),
    ];
    if !game.move_history().is_empty() {
        sections.push(render_recent_moves(game));
    }
    if game.can_undo() {
        sections.push(format!(
            "Undo available: {} move(s) can be undone",
            game.undo_depth()
        ));
    } else {
        sections.push("Undo not available".to_string());
    }
    sections.join("\n\n")
}

pub fn render_welcome(show_legend: bool) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "WELCOME TO JUNGLE GAME".to_string(),
        RULE.to_string(),
        String::new(),
        "A strategic board game where animals battle for territory!".to_string(),
    ];
    if show_legend {
        lines.push(String::new());
        lines.push(render_legend());
    }
    lines.push(String::new());
    lines.push("Type 'help' for the list of commands.".to_string());
    lines.push(RULE.to_string());
    lines.join("\n")
}

pub fn render_game_over(game: &Game) -> String {
    let mut lines = vec![String::new(), RULE.to_string(), "GAME OVER".to_string(), RULE.to_string(), String::new()];
    match game.winner() {
        Some(winner) => lines.push(format!("Winner: {}", winner)),
        None => lines.push("Game ended in a draw".to_string()),
    }
    lines.push(String::new());
    lines.push(format!("Total moves: {}", game.move_history().len()));
    lines.push(String::new());
    lines.push("Final Board State:".to_string());
    lines.push(render_board(game.board()));
    lines.push("Use 'record <file>' or 'save <file>' to keep this game, 'new' to play again.".to_string());
    lines.join("\n")
}

pub fn render_help() -> String {
    [
        "Available Commands:",
        "  a0 b1 | 0,0 1,0 | move from a0 to b1  - Make a move",
        "      (letters a-g are columns, digits 0-8 are rows; numeric form is row,col)",
        "  hint <pos>        - List legal destinations for a piece (alias: moves)",
        "  undo              - Undo the last move (up to 3 moves)",
        "  save <file>       - Save the current game (.jungle)",
        "  load <file>       - Load a saved game",
        "  record <file>     - Save the game record (.record)",
        "  replay <file>     - Replay a game from a record",
        "  new               - Start a new game with the same players",
        "  help              - Show this help message",
        "  quit              - Exit the game",
    ]
    .join("\n")
}

pub fn render_move_result(result: &MoveResult) -> String {
    if result.is_success() {
        success(result.message())
    } else {
        failure(result.message())
    }
}

pub fn render_undo_result(undone: bool) -> String {
    if undone {
        success("Move undone successfully")
    } else {
        failure("No moves to undo")
    }
}

pub fn render_hint(game: &Game, from: Position, destinations: &[Position]) -> String {
    let Some(piece) = game.board().piece_at(from) else {
        return info(&format!("No piece at {}", from));
    };
    if destinations.is_empty() {
        return info(&format!("{} at {} has no legal moves", piece.kind(), from));
    }
    let list: Vec<String> = destinations.iter().map(ToString::to_string).collect();
    info(&format!("{} at {} can move to: {}", piece.kind(), from, list.join(" ")))
}

pub fn success(message: &str) -> String {
    format!("✓ {}", message)
}

pub fn failure(message: &str) -> String {
    format!("✗ {}", message)
}

pub fn error(message: &str) -> String {
    format!("ERROR: {}", message)
}

pub fn info(message: &str) -> String {
    format!("INFO: {}", message)
}
