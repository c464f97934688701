//! Gravity chess.
//!
//! A chess variant in which every piece falls toward row 7 after each
//! half-move, unless a platform holds it up. Players may place, move or
//! remove platforms instead of moving a piece.

pub mod position;
pub mod utils;
pub mod error;
pub mod movegen_tables;
pub mod movegeneration;
pub mod legality;
pub mod gravity;
pub mod platforms;
pub mod chess_move;
pub mod zobrist;
pub mod transposition;
pub mod evaluation;
pub mod game;
pub mod selection;
pub mod config;
pub mod cli;
pub mod ui;
pub mod gui;

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use clap::Parser;
use env_logger::Env;
use log::info;

use cli::{Cli, Commands};
use config::Config;
use game::{Game, GameState};
use platforms::Platforms;
use position::{Board, Color};

/// A game from the initial position, or from the settled board read from `layout`.
fn new_game(layout: Option<&Path>, cache_entries: usize) -> anyhow::Result<Game> {
    let path = match layout {
        Some(path) => path,
        None => return Ok(Game::new(cache_entries)),
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let board = Board::from_layout(&text).with_context(|| format!("bad layout in {}", path.display()))?;
    let platforms = Platforms::new();
    info!("starting from layout {}", path.display());
    let state = GameState::from_board(gravity::resolve_gravity(&board, &platforms), platforms, Color::White);
    state
        .check_playable()
        .with_context(|| format!("layout in {} cannot be played", path.display()))?;
    Ok(Game::with_state(state, cache_entries))
}

fn main() -> anyhow::Result<()> {
    let env = Env::default().filter_or("GRAVITY_CHESS_LOG", "info");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();
    let cfg_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("GRAVITY_CHESS_CONFIG").map(|s| s.into()));
    let cfg = Config::load(cfg_path.as_deref())?;
    let game = new_game(cli.layout.as_deref(), cfg.legal_cache_entries)?;

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => {
            info!("starting window");
            gui::run_gui(cfg, game).map_err(|e| anyhow!("error running GUI: {}", e))?;
        }
        Commands::Text => {
            ui::play_game(game)?;
        }
    }
    Ok(())
}
