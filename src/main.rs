mod config;
mod food;
mod game;
mod input;
mod logging;
mod point;
mod render;
mod snake;
mod term;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::GameConfig;
use crate::game::SnakeGame;
use crate::term::{Screen, TermManager};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    logging::init_global(&logging::default_log_path());

    let mut term = TermManager::new()?;
    let (cols, rows) = term.size();
    info!(cols, rows, "terminal probed");

    // Each board cell takes two columns
    let mut game = SnakeGame::new(cols as i32 / 2, rows as i32, GameConfig::default())
        .context("Can't start the game")?;

    // The terminal is restored whether setup or the loop failed part way
    let result = term
        .setup()
        .context("Error setting up the terminal")
        .and_then(|_| game.run(&mut term));
    let restored = term.restore();

    if let Err(e) = &result {
        error!("game loop failed: {:#}", e);
    }

    result.and(restored)
}
