use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::food::FoodSpawner;
use crate::input::Command;
use crate::point::Point;
use crate::render::Renderer;
use crate::snake::Snake;
use crate::term::{KeySource, Screen};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    Dead,
}

pub struct SnakeGame {
    width: i32,
    height: i32,
    score: u32,
    running: bool,
    mode: Mode,
    snake: Snake,
    food: Point,
    spawner: FoodSpawner,
    config: GameConfig,
}

impl SnakeGame {
    /// Builds a game for a board of `width` x `height` cells, starting at the menu.
    pub fn new(width: i32, height: i32, config: GameConfig) -> Result<Self> {
        let spawner = FoodSpawner::new(config.spawn_side, config.spawn_attempts);
        Self::with_spawner(width, height, config, spawner)
    }

    pub fn with_spawner(width: i32, height: i32, config: GameConfig, spawner: FoodSpawner) -> Result<Self> {
        if width < config.min_width || height < config.min_height {
            bail!(
                "terminal too small: board is {}x{} cells, need at least {}x{}",
                width,
                height,
                config.min_width,
                config.min_height
            );
        }

        let mut game = SnakeGame {
            width,
            height,
            score: 0,
            running: true,
            mode: Mode::Menu,
            snake: Snake::new(config.start, config.start_facing),
            food: config.start,
            spawner,
            config,
        };
        game.reset();

        Ok(game)
    }

    /// Reads keys, advances and redraws until the quit key is pressed.
    pub fn run<T: Screen + KeySource>(&mut self, term: &mut T) -> Result<()> {
        let renderer = Renderer::new();
        renderer.draw(self, term)?;

        while self.running {
            let command = term.read_key(self.config.tick)?.map(Command::from);
            self.tick(command);
            renderer.draw(self, term)?;
        }

        info!(score = self.score, "quitting");
        Ok(())
    }

    /// One loop iteration: at most one command, then a simulation step when playing.
    pub fn tick(&mut self, command: Option<Command>) {
        let command = command.unwrap_or(Command::Ignore);

        if command == Command::Quit {
            self.running = false;
            return;
        }

        match self.mode {
            Mode::Menu | Mode::Dead => {
                if command == Command::Confirm {
                    self.start();
                }
            }
            Mode::Playing => {
                if let Command::Turn(facing) = command {
                    self.snake.set_facing(facing);
                }
                self.update();
            }
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.snake = Snake::new(self.config.start, self.config.start_facing);
        self.respawn_food();
    }

    fn start(&mut self) {
        info!(from = ?self.mode, "starting a new run");
        self.mode = Mode::Playing;
        self.reset();
    }

    fn update(&mut self) {
        self.snake.advance();
        self.snake.wrap_head(self.width, self.height);
        let head = self.snake.head();
        debug_assert!(head.is_within(self.width, self.height));

        // Checked before growing: fresh segments are stacked on the tail, which is
        // the head itself for a one-segment snake
        let bitten = self.snake.body_contains(head);

        if head == self.food {
            self.score += self.config.food_bonus;
            self.snake.grow(self.config.growth);
            self.respawn_food();
        }

        if bitten {
            info!(score = self.score, len = self.snake.len(), "snake bit itself");
            self.mode = Mode::Dead;
        }
    }

    fn respawn_food(&mut self) {
        match self.spawner.spawn(&self.snake, self.width, self.height) {
            Some(food) => self.food = food,
            None => warn!(x = self.food.x, y = self.food.y, "no free cell, food stays put"),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }
}

#[cfg(test)]
impl SnakeGame {
    pub(crate) fn place_food(&mut self, food: Point) {
        self.food = food;
    }

    pub(crate) fn force_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Facing;
    use crate::term::MemoryScreen;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use proptest::prelude::*;

    fn game(width: i32, height: i32) -> SnakeGame {
        let config = GameConfig::default();
        let spawner = FoodSpawner::with_seed(config.spawn_side, config.spawn_attempts, 42);
        SnakeGame::with_spawner(width, height, config, spawner).unwrap()
    }

    fn playing(width: i32, height: i32) -> SnakeGame {
        let mut g = game(width, height);
        g.tick(Some(Command::Confirm));
        assert_eq!(g.mode(), Mode::Playing);
        g
    }

    fn key(code: KeyCode) -> Option<KeyEvent> {
        Some(KeyEvent { code, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn starts_at_menu() {
        let g = game(40, 20);
        assert_eq!(g.mode(), Mode::Menu);
        assert!(g.is_running());
        assert_eq!(g.score(), 0);
        assert_eq!(g.snake().segments(), &[Point::new(10, 10)]);
    }

    #[test]
    fn rejects_tiny_board() {
        let config = GameConfig::default();
        assert!(SnakeGame::new(11, 20, config.clone()).is_err());
        assert!(SnakeGame::new(40, 11, config.clone()).is_err());
        assert!(SnakeGame::new(12, 12, config).is_ok());
    }

    #[test]
    fn menu_ignores_everything_but_confirm_and_quit() {
        let mut g = game(40, 20);
        g.tick(Some(Command::Turn(Facing::North)));
        g.tick(Some(Command::Ignore));
        g.tick(None);
        assert_eq!(g.mode(), Mode::Menu);
        assert_eq!(g.snake().segments(), &[Point::new(10, 10)]);
    }

    #[test]
    fn one_step_east() {
        let mut g = playing(40, 20);
        g.food = Point::new(30, 15);
        g.tick(None);
        assert_eq!(g.snake().segments(), &[Point::new(11, 10)]);
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn eating_scores_grows_and_respawns() {
        let mut g = playing(40, 20);
        g.food = Point::new(11, 10);
        g.tick(None);

        assert_eq!(g.score(), 3);
        assert_eq!(g.snake().len(), 4);
        assert_eq!(g.snake().head(), Point::new(11, 10));
        assert!(!g.snake().contains(g.food()));
        assert_eq!(g.mode(), Mode::Playing);
    }

    #[test]
    fn opposite_turn_is_ignored() {
        let mut g = playing(40, 20);
        g.food = Point::new(30, 15);
        g.tick(Some(Command::Turn(Facing::West)));
        assert_eq!(g.snake().facing(), Facing::East);
        assert_eq!(g.snake().head(), Point::new(11, 10));
    }

    #[test]
    fn head_wraps_at_edges() {
        let mut g = playing(12, 12);
        g.food = Point::new(5, 5);
        g.tick(None);
        assert_eq!(g.snake().head(), Point::new(11, 10));
        g.tick(None);
        assert_eq!(g.snake().head(), Point::new(0, 10));

        g.tick(Some(Command::Turn(Facing::North)));
        assert_eq!(g.snake().head(), Point::new(0, 9));
        for _ in 0..9 {
            g.tick(None);
        }
        assert_eq!(g.snake().head(), Point::new(0, 0));
        g.tick(None);
        assert_eq!(g.snake().head(), Point::new(0, 11));
    }

    #[test]
    fn biting_the_body_kills_on_that_tick() {
        let mut g = playing(40, 20);
        g.food = Point::new(11, 10);
        g.tick(None);
        g.snake.grow(1);
        assert_eq!(g.snake().len(), 5);

        // Let the stacked segments unfold into a straight line
        g.food = Point::new(30, 18);
        for _ in 0..4 {
            g.tick(None);
        }

        // Five segments are enough to run into the body on a tight turn
        g.tick(Some(Command::Turn(Facing::South)));
        g.tick(Some(Command::Turn(Facing::West)));
        assert_eq!(g.mode(), Mode::Playing);
        g.tick(Some(Command::Turn(Facing::North)));

        assert_eq!(g.mode(), Mode::Dead);
        assert_eq!(g.snake().len(), 5);
    }

    #[test]
    fn crossing_an_edge_onto_the_body_kills() {
        let mut g = playing(12, 12);
        g.food = Point::new(5, 8);
        g.snake = Snake::new(Point::new(0, 5), Facing::North);
        g.snake.grow(4);

        g.tick(None);
        g.tick(Some(Command::Turn(Facing::West)));
        assert_eq!(g.snake().head(), Point::new(11, 4));
        g.tick(Some(Command::Turn(Facing::South)));
        assert_eq!(g.mode(), Mode::Playing);

        g.tick(Some(Command::Turn(Facing::East)));
        assert_eq!(g.snake().head(), Point::new(0, 5));
        assert_eq!(g.mode(), Mode::Dead);
    }

    #[test]
    fn dead_ignores_turns_and_restarts_on_confirm() {
        let mut g = playing(40, 20);
        g.mode = Mode::Dead;
        g.score = 12;
        g.snake.grow(5);

        g.tick(Some(Command::Turn(Facing::North)));
        assert_eq!(g.mode(), Mode::Dead);
        assert_eq!(g.score(), 12);

        g.tick(Some(Command::Confirm));
        assert_eq!(g.mode(), Mode::Playing);
        assert_eq!(g.score(), 0);
        assert_eq!(g.snake().segments(), &[Point::new(10, 10)]);
        assert_eq!(g.snake().facing(), Facing::East);
    }

    #[test]
    fn quit_works_in_every_mode() {
        for mode in [Mode::Menu, Mode::Playing, Mode::Dead].iter() {
            let mut g = game(40, 20);
            g.mode = *mode;
            g.tick(Some(Command::Quit));
            assert!(!g.is_running(), "quit ignored in {:?}", mode);
            assert_eq!(g.mode(), *mode);
        }
    }

    #[test]
    fn run_loop_plays_until_quit() {
        let mut g = game(40, 20);
        let mut screen = MemoryScreen::new(80, 20);
        screen.script(vec![
            None,
            key(KeyCode::Enter),
            None,
            key(KeyCode::Down),
            None,
            key(KeyCode::Char('q')),
        ]);

        g.run(&mut screen).unwrap();

        assert!(!g.is_running());
        assert_eq!(g.mode(), Mode::Playing);
        assert_eq!(screen.frames, 7);
        assert_eq!(g.snake().head(), Point::new(11, 12));
    }

    proptest! {
        #[test]
        fn play_invariants_hold(keys in prop::collection::vec(0u8..5, 1..300)) {
            let mut g = playing(20, 14);

            for k in keys {
                if g.mode() != Mode::Playing {
                    break;
                }

                let before_len = g.snake().len();
                let before_score = g.score();
                let before_facing = g.snake().facing();
                let command = match k {
                    0 => Command::Turn(Facing::North),
                    1 => Command::Turn(Facing::East),
                    2 => Command::Turn(Facing::South),
                    3 => Command::Turn(Facing::West),
                    _ => Command::Ignore,
                };

                g.tick(Some(command));

                if let Command::Turn(f) = command {
                    if f.is_opposite(before_facing) {
                        prop_assert_eq!(g.snake().facing(), before_facing);
                    }
                }

                let ate = g.score() != before_score;
                if ate {
                    prop_assert_eq!(g.score(), before_score + 3);
                    prop_assert_eq!(g.snake().len(), before_len + 3);
                } else {
                    prop_assert_eq!(g.snake().len(), before_len);
                }

                for seg in g.snake().segments() {
                    prop_assert!(seg.is_within(20, 14), "segment off board: {:?}", seg);
                }
            }
        }
    }
}
