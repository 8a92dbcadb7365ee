// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jungle CLI - play Dou Shou Qi against a friend in the terminal

use anyhow::{bail, Context, Result};
use clap::Parser;
use jungle_cli::config::{load_config, CliConfig};
use jungle_cli::controller::{confirms, GameController, Outcome};
use jungle_cli::names::{generate_distinct_name, validate_name, NAME_RULES};
use jungle_core::persistence::load_game;
use jungle_core::record::replay_record;
use jungle_core::Game;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::signal;
use tracing_subscriber::EnvFilter;

type StdinLines = Lines<BufReader<Stdin>>;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "jungle", about = "Jungle (Dou Shou Qi) board game", version)]
struct Args {
    /// Resume a saved game (.jungle)
    #[clap(long, conflicts_with = "replay")]
    load: Option<String>,

    /// Rebuild a game from a record file (.record)
    #[clap(long)]
    replay: Option<String>,

    /// Name of the Red player
    #[clap(long)]
    red: Option<String>,

    /// Name of the Blue player
    #[clap(long)]
    blue: Option<String>,

    /// Path to an alternative config.toml
    #[clap(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args, config: &CliConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if args.debug => EnvFilter::new("debug"),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level in config: {}", config.log_level))?,
    };

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Print `question` and wait for one line. `None` on EOF or Ctrl+C.
async fn ask(lines: &mut StdinLines, question: &str) -> Result<Option<String>> {
    print!("{}", question);
    io::stdout().flush()?;

    tokio::select! {
        _ = signal::ctrl_c() => Ok(None),
        result = lines.next_line() => {
            let line = result.context("Error reading input")?;
            Ok(line.map(|l| l.trim().to_string()))
        }
    }
}

/// Ask for a player name until a valid one is given. Empty input picks a random name.
async fn prompt_name(lines: &mut StdinLines, label: &str, taken: Option<&str>) -> Result<Option<String>> {
    loop {
        let question = format!("Enter name for {} (leave empty for a random name): ", label);
        let Some(answer) = ask(lines, &question).await? else {
            return Ok(None);
        };

        if answer.is_empty() {
            let name = generate_distinct_name(taken.unwrap_or_default());
            println!("{} will be called {}", label, name);
            return Ok(Some(name));
        }
        if !validate_name(&answer) {
            println!("{}", NAME_RULES);
            continue;
        }
        if taken == Some(answer.as_str()) {
            println!("Players must have different names.");
            continue;
        }
        return Ok(Some(answer));
    }
}

fn preset_name(arg: Option<&String>, fallback: Option<&String>, label: &str) -> Result<Option<String>> {
    match arg.or(fallback) {
        Some(name) if validate_name(name) => Ok(Some(name.trim().to_string())),
        Some(name) => bail!("Invalid name for {} '{}': {}", label, name, NAME_RULES),
        None => Ok(None),
    }
}

/// Pick names from arguments, config defaults, then interactive prompts
async fn resolve_names(args: &Args, config: &CliConfig, lines: &mut StdinLines) -> Result<Option<(String, String)>> {
    let red = preset_name(args.red.as_ref(), config.default_red_name.as_ref(), "Red")?;
    let blue = preset_name(args.blue.as_ref(), config.default_blue_name.as_ref(), "Blue")?;

    let red = match red {
        Some(name) => name,
        None => match prompt_name(lines, "Red", blue.as_deref()).await? {
            Some(name) => name,
            None => return Ok(None),
        },
    };
    let blue = match blue {
        Some(name) if name == red => bail!("Players must have different names ('{}')", name),
        Some(name) => name,
        None => match prompt_name(lines, "Blue", Some(&red)).await? {
            Some(name) => name,
            None => return Ok(None),
        },
    };
    Ok(Some((red, blue)))
}

async fn build_game(args: &Args, config: &CliConfig, lines: &mut StdinLines) -> Result<Option<Game>> {
    if let Some(file) = &args.load {
        let game = load_game(config.resolve(file))
            .with_context(|| format!("Failed to load game from {}", file))?;
        return Ok(Some(game));
    }
    if let Some(file) = &args.replay {
        let game = replay_record(config.resolve(file), args.red.as_deref(), args.blue.as_deref())
            .with_context(|| format!("Failed to replay record {}", file))?;
        return Ok(Some(game));
    }
    Ok(resolve_names(args, config, lines)
        .await?
        .map(|(red, blue)| Game::new(red, blue)))
}

async fn run_game_loop(controller: &mut GameController<io::Stdout>, lines: &mut StdinLines) -> Result<()> {
    loop {
        controller.show_prompt()?;

        tokio::select! {
            _ = signal::ctrl_c() => {
                println!("\nReceived Ctrl+C, exiting...");
                break;
            }

            result = lines.next_line() => {
                let line = match result {
                    Ok(Some(line)) => line,
                    Ok(None) => break, // EOF
                    Err(e) => {
                        eprintln!("Error reading input: {}", e);
                        continue;
                    }
                };

                match controller.process_command(&line)? {
                    Outcome::Continue => {}
                    Outcome::Quit => break,
                    Outcome::ConfirmQuit => {
                        let answer = ask(lines, "Are you sure you want to quit? (yes/no): ").await?;
                        if answer.as_deref().map_or(true, confirms) {
                            println!("Thanks for playing!");
                            break;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_logging(&args, &config)?;
    tracing::debug!(?args, ?config, "Starting");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let Some(game) = build_game(&args, &config, &mut lines).await? else {
        println!();
        return Ok(());
    };
    tracing::info!(game = %game.id(), "Game ready");

    let mut controller = GameController::new(game, config, io::stdout());
    controller.show_welcome()?;
    controller.show_game()?;

    run_game_loop(&mut controller, &mut lines).await?;
    tracing::info!(game = %controller.game().id(), moves = controller.game().move_history().len(), "Exiting");
    Ok(())
}
