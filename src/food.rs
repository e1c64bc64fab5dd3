use std::cmp::min;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::point::Point;
use crate::snake::Snake;

/// Picks food cells that are not under the snake.
///
/// Food lands in a square of side `min(side_cap, width, height)` centered on the board.
/// After `attempts` unlucky random draws the spawner scans that square, then the whole
/// board, for the first free cell, so it always terminates.
pub struct FoodSpawner {
    rng: StdRng,
    side_cap: i32,
    attempts: usize,
}

impl FoodSpawner {
    pub fn new(side_cap: i32, attempts: usize) -> Self {
        FoodSpawner { rng: StdRng::from_entropy(), side_cap, attempts }
    }

    pub fn with_seed(side_cap: i32, attempts: usize, seed: u64) -> Self {
        FoodSpawner { rng: StdRng::seed_from_u64(seed), side_cap, attempts }
    }

    /// Returns `None` only when the snake covers every cell of the board.
    pub fn spawn(&mut self, snake: &Snake, width: i32, height: i32) -> Option<Point> {
        let side = min(self.side_cap, min(width, height));
        if side <= 0 {
            return None;
        }

        let left = (width - side) / 2;
        let top = (height - side) / 2;

        for _ in 0..self.attempts {
            let pos = Point::new(
                left + self.rng.gen_range(0..side),
                top + self.rng.gen_range(0..side),
            );

            if !snake.contains(pos) {
                debug!(x = pos.x, y = pos.y, "food spawned");
                return Some(pos);
            }
        }

        warn!(attempts = self.attempts, len = snake.len(), "random food spawn failed, scanning");

        let found = first_free(snake, left, top, side, side)
            .or_else(|| first_free(snake, 0, 0, width, height));

        if found.is_none() {
            warn!("board is full, no cell left for food");
        }

        found
    }
}

fn first_free(snake: &Snake, left: i32, top: i32, width: i32, height: i32) -> Option<Point> {
    (top..top + height)
        .flat_map(|y| (left..left + width).map(move |x| Point::new(x, y)))
        .find(|pos| !snake.contains(*pos))
}
