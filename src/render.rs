use anyhow::Result;

use crate::game::{Mode, SnakeGame};
use crate::point::Point;
use crate::term::{Screen, Tint};
use crate::{Coords, TermInt};

const SNAKE_BODY_CHAR: char = '#';
const FOOD_CHAR: char = '@';

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    /// Clears the screen and draws one whole frame for the game's current mode.
    pub fn draw<S: Screen>(&self, game: &SnakeGame, screen: &mut S) -> Result<()> {
        screen.clear()?;

        match game.mode() {
            Mode::Menu => self.draw_menu(game, screen)?,
            Mode::Playing => self.draw_board(game, screen)?,
            Mode::Dead => self.draw_dead(game, screen)?,
        }

        screen.flush()
    }

    fn draw_board<S: Screen>(&self, game: &SnakeGame, screen: &mut S) -> Result<()> {
        let snake = game.snake();

        for segment in snake.segments() {
            screen.print_at(cell_coords(*segment), SNAKE_BODY_CHAR, Tint::Snake)?;
        }
        screen.print_at(cell_coords(snake.head()), snake.facing().head_char(), Tint::Snake)?;

        screen.print_at(cell_coords(game.food()), FOOD_CHAR, Tint::Food)?;

        screen.print_str_at(
            text_coords(game.width() - 1, 1),
            &score_banner(game.score()),
            Tint::Banner,
        )
    }

    fn draw_menu<S: Screen>(&self, game: &SnakeGame, screen: &mut S) -> Result<()> {
        let (w, mid) = (game.width(), game.height() / 2);

        screen.print_str_at(text_coords(w - 6, mid), "S N A K E", Tint::Text)?;
        screen.print_str_at(text_coords(w - 12, mid + 2), "Press enter to start...", Tint::Text)?;
        screen.print_str_at(text_coords(w - 8, mid + 3), "or q to quit", Tint::Text)
    }

    fn draw_dead<S: Screen>(&self, game: &SnakeGame, screen: &mut S) -> Result<()> {
        let (w, mid) = (game.width(), game.height() / 2);

        screen.print_str_at(text_coords(w - 6, mid), "Game Over", Tint::Text)?;
        screen.print_str_at(
            text_coords(w - 6, mid + 2),
            &format!("Score: {:03}", game.score()),
            Tint::Text,
        )?;
        screen.print_str_at(text_coords(w - 12, mid + 3), "Enter to retry, q to quit", Tint::Text)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn score_banner(score: u32) -> String {
    format!("\\- {:03} -/", score)
}

/// Board cells are two terminal columns wide so the board looks square.
fn cell_coords(pos: Point) -> Coords {
    ((pos.x * 2) as TermInt, pos.y as TermInt)
}

fn text_coords(col: i32, row: i32) -> Coords {
    (col.max(0) as TermInt, row.max(0) as TermInt)
}
