use std::time::Duration;

use crate::point::Point;
use crate::snake::Facing;

/// Tunables for a game. There is no way to change them at runtime.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// How long each loop iteration waits for a key. This paces the game.
    pub tick: Duration,
    /// Where the snake's head starts after every reset
    pub start: Point,
    pub start_facing: Facing,
    /// Score awarded per food
    pub food_bonus: u32,
    /// Segments added per food
    pub growth: usize,
    /// Food spawns in a centered square no wider than this
    pub spawn_side: i32,
    /// Random draws before the food spawner falls back to scanning
    pub spawn_attempts: usize,
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick: Duration::from_millis(100),
            start: Point::new(10, 10),
            start_facing: Facing::East,
            food_bonus: 3,
            growth: 3,
            spawn_side: 30,
            spawn_attempts: 64,
            min_width: 12,
            min_height: 12,
        }
    }
}
