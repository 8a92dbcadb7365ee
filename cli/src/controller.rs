// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive game controller
//!
//! Owns the current [`Game`] and turns parsed commands into game calls and
//! console output. Output goes to any [`Write`], so a `Vec<u8>` can stand in
//! for the terminal.

use crate::command::{parse_command, Command};
use crate::config::CliConfig;
use crate::render;
use jungle_core::persistence::{load_game, save_game};
use jungle_core::record::{replay_record, save_record};
use jungle_core::{Game, Position};
use std::io::{self, Write};

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Quit requested mid-game; ask the user before leaving
    ConfirmQuit,
    Quit,
}

pub struct GameController<W: Write> {
    game: Game,
    config: CliConfig,
    out: W,
}

impl<W: Write> GameController<W> {
    pub fn new(game: Game, config: CliConfig, out: W) -> Self {
        Self { game, config, out }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn show_welcome(&mut self) -> io::Result<()> {
        let text = render::render_welcome(self.config.show_legend);
        self.say(&text)
    }

    pub fn show_game(&mut self) -> io::Result<()> {
        let text = render::render_game(&self.game);
        self.say(&text)?;
        if self.game.is_game_over() {
            let text = render::render_game_over(&self.game);
            self.say(&text)?;
        }
        Ok(())
    }

    /// Write the input prompt without a trailing newline
    pub fn show_prompt(&mut self) -> io::Result<()> {
        let prompt = if self.game.is_game_over() {
            "Game over. Command: ".to_string()
        } else {
            format!("{}, enter your move: ", self.game.current_player())
        };
        write!(self.out, "{}", prompt)?;
        self.out.flush()
    }

    /// Handle one line of user input
    pub fn process_command(&mut self, line: &str) -> io::Result<Outcome> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(input = line, error = %e, "Unparseable command");
                self.say(&render::error(&e.to_string()))?;
                return Ok(Outcome::Continue);
            }
        };
        tracing::debug!(?command, game = %self.game.id(), "Command");

        match command {
            Command::Move { from, to } => self.handle_move(from, to)?,
            Command::Undo => self.handle_undo()?,
            Command::Save(file) => self.handle_save(&file)?,
            Command::Load(file) => self.handle_load(&file)?,
            Command::Record(file) => self.handle_record(&file)?,
            Command::Replay(file) => self.handle_replay(&file)?,
            Command::Hint(pos) => {
                let destinations = self.game.legal_destinations(pos);
                let text = render::render_hint(&self.game, pos, &destinations);
                self.say(&text)?;
            }
            Command::New => {
                let [red, blue] = self.game.players().clone().map(|p| p.name().to_string());
                self.game = Game::new(red, blue);
                self.say(&render::info("New game started"))?;
                self.show_game()?;
            }
            Command::Help => self.say(&render::render_help())?,
            Command::Quit => {
                if !self.game.is_game_over() && !self.game.move_history().is_empty() {
                    return Ok(Outcome::ConfirmQuit);
                }
                self.say("Thanks for playing!")?;
                return Ok(Outcome::Quit);
            }
        }
        Ok(Outcome::Continue)
    }

    fn handle_move(&mut self, from: Position, to: Position) -> io::Result<()> {
        match self.game.make_move(from, to) {
            Ok(result) => {
                self.say(&render::render_move_result(&result))?;
                if result.is_success() {
                    self.show_game()?;
                }
            }
            Err(e) => self.say(&render::error(&e.to_string()))?,
        }
        Ok(())
    }

    fn handle_undo(&mut self) -> io::Result<()> {
        match self.game.undo_move() {
            Ok(undone) => {
                self.say(&render::render_undo_result(undone))?;
                if undone {
                    self.show_game()?;
                }
            }
            Err(e) => self.say(&render::error(&e.to_string()))?,
        }
        Ok(())
    }

    fn handle_save(&mut self, file: &str) -> io::Result<()> {
        let message = match save_game(&self.game, self.config.resolve(file)) {
            Ok(path) => render::success(&format!("Game saved to {}", path.display())),
            Err(e) => render::error(&format!("Failed to save game: {}", e)),
        };
        self.say(&message)
    }

    fn handle_load(&mut self, file: &str) -> io::Result<()> {
        match load_game(self.config.resolve(file)) {
            Ok(game) => {
                self.game = game;
                self.say(&render::success(&format!("Game loaded from {}", file)))?;
                self.show_game()
            }
            Err(e) => self.say(&render::error(&format!("Failed to load game: {}", e))),
        }
    }

    fn handle_record(&mut self, file: &str) -> io::Result<()> {
        let message = match save_record(&self.game, self.config.resolve(file)) {
            Ok(path) => render::success(&format!("Game record saved to {}", path.display())),
            Err(e) => render::error(&format!("Failed to save record: {}", e)),
        };
        self.say(&message)
    }

    fn handle_replay(&mut self, file: &str) -> io::Result<()> {
        match replay_record(self.config.resolve(file), None, None) {
            Ok(game) => {
                let moves = game.move_history().len();
                self.game = game;
                self.say(&render::success(&format!("Replayed {} moves from {}", moves, file)))?;
                self.show_game()
            }
            Err(e) => self.say(&render::error(&format!("Failed to replay record: {}", e))),
        }
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }
}

/// True for an affirmative answer to a yes/no question
pub fn confirms(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
