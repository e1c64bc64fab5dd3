use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Facing;

/// What a key press means to the game, independent of the current mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Confirm,
    Quit,
    Turn(Facing),
    Ignore,
}

impl From<KeyEvent> for Command {
    fn from(ev: KeyEvent) -> Self {
        if is_ctrl_c(&ev) {
            return Command::Quit;
        }

        match ev.code {
            KeyCode::Enter => Command::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Facing::North),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Facing::East),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Facing::South),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Facing::West),
            _ => Command::Ignore,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
