use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, poll, read};
use crossterm::style::{Attribute, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

/// Colour role of something drawn on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tint {
    Text,
    Snake,
    Food,
    Banner,
}

/// Character-cell drawing surface, addressed as (column, row).
pub trait Screen {
    fn size(&self) -> Coords;
    fn clear(&mut self) -> Result<()>;
    fn print_at(&mut self, pos: Coords, ch: char, tint: Tint) -> Result<()>;
    fn print_str_at(&mut self, pos: Coords, text: &str, tint: Tint) -> Result<()>;
    /// The character last drawn at `pos` since the previous clear.
    fn cell(&self, pos: Coords) -> Option<char>;
    fn flush(&mut self) -> Result<()>;
}

pub trait KeySource {
    /// Waits at most `timeout` for a key press.
    fn read_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// What has been drawn on each cell, so cells can be queried back.
pub struct CellBuffer {
    width: TermInt,
    height: TermInt,
    cells: Vec<char>,
}

impl CellBuffer {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        CellBuffer { width, height, cells: vec![' '; width as usize * height as usize] }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = ' ');
    }

    /// Returns false if `pos` is off screen, in which case nothing is stored.
    pub fn put(&mut self, pos: Coords, ch: char) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = ch;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, pos: Coords) -> Option<char> {
        self.index(pos).map(|i| self.cells[i])
    }

    #[cfg(test)]
    pub fn row(&self, y: TermInt) -> String {
        let start = self.width as usize * y as usize;
        self.cells[start..start + self.width as usize].iter().collect()
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: CellBuffer,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let stdout = stdout();
        let screen = CellBuffer::new(width, height);
        Ok(TermManager { width, height, stdout, screen })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    /// Puts the terminal back the way it was. Every step is attempted even if an
    /// earlier one fails; the first failure is reported.
    pub fn restore(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode().context("Error disabling raw mode");
        let cursor = execute!(self.stdout, cursor::Show, cursor::EnableBlinking)
            .context("Error showing cursor");
        let alt = execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen");

        raw.and(cursor).and(alt)
    }

    fn queue_styled(&mut self, pos: Coords, tint: Tint, content: impl std::fmt::Display + Clone) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;

        match tint {
            Tint::Text => {}
            Tint::Snake => queue!(
                self.stdout,
                style::SetAttribute(Attribute::Bold),
                style::SetForegroundColor(Color::Green)
            )?,
            Tint::Food => queue!(
                self.stdout,
                style::SetAttribute(Attribute::Bold),
                style::SetForegroundColor(Color::Red)
            )?,
            Tint::Banner => queue!(
                self.stdout,
                style::SetForegroundColor(Color::Black),
                style::SetBackgroundColor(Color::White)
            )?,
        }

        queue!(self.stdout, style::Print(content))?;

        if tint != Tint::Text {
            queue!(self.stdout, style::SetAttribute(Attribute::Reset), style::ResetColor)?;
        }

        Ok(())
    }
}

impl Screen for TermManager {
    fn size(&self) -> Coords {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen.clear();
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char, tint: Tint) -> Result<()> {
        if !self.screen.put(pos, ch) {
            return Ok(());
        }
        self.queue_styled(pos, tint, ch).context("Error drawing")
    }

    fn print_str_at(&mut self, pos: Coords, text: &str, tint: Tint) -> Result<()> {
        // Clip to the screen so the terminal never wraps onto the next row
        let room = self.width.saturating_sub(pos.0) as usize;
        if pos.1 >= self.height || room == 0 {
            return Ok(());
        }

        let visible: String = text.chars().take(room).collect();
        for (i, ch) in visible.chars().enumerate() {
            self.screen.put((pos.0 + i as TermInt, pos.1), ch);
        }

        self.queue_styled(pos, tint, visible).context("Error drawing")
    }

    fn cell(&self, pos: Coords) -> Option<char> {
        self.screen.get(pos)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl KeySource for TermManager {
    fn read_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !poll(timeout).context("Error polling for input")? {
            return Ok(None);
        }

        match read().context("Error reading input")? {
            Event::Key(ev) => Ok(Some(ev)),
            _ => Ok(None),
        }
    }
}

/// An off-screen terminal for driving the game without a TTY.
#[cfg(test)]
pub struct MemoryScreen {
    buffer: CellBuffer,
    size: Coords,
    keys: std::collections::VecDeque<Option<KeyEvent>>,
    pub frames: usize,
}

#[cfg(test)]
impl MemoryScreen {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        MemoryScreen {
            buffer: CellBuffer::new(width, height),
            size: (width, height),
            keys: Default::default(),
            frames: 0,
        }
    }

    /// Queues what the next `read_key` calls return. `None` is a tick with no key.
    pub fn script(&mut self, keys: impl IntoIterator<Item = Option<KeyEvent>>) {
        self.keys.extend(keys);
    }

    pub fn row(&self, y: TermInt) -> String {
        self.buffer.row(y)
    }

    pub fn text(&self) -> String {
        (0..self.size.1).map(|y| self.row(y)).collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
impl Screen for MemoryScreen {
    fn size(&self) -> Coords {
        self.size
    }

    fn clear(&mut self) -> Result<()> {
        self.buffer.clear();
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char, _tint: Tint) -> Result<()> {
        self.buffer.put(pos, ch);
        Ok(())
    }

    fn print_str_at(&mut self, pos: Coords, text: &str, _tint: Tint) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.buffer.put((pos.0 + i as TermInt, pos.1), ch);
        }
        Ok(())
    }

    fn cell(&self, pos: Coords) -> Option<char> {
        self.buffer.get(pos)
    }

    fn flush(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
impl KeySource for MemoryScreen {
    fn read_key(&mut self, _timeout: Duration) -> Result<Option<KeyEvent>> {
        // A drained script quits, so a runaway loop ends the test instead of hanging it
        Ok(self.keys.pop_front().unwrap_or_else(|| {
            Some(KeyEvent {
                code: crossterm::event::KeyCode::Char('q'),
                modifiers: crossterm::event::KeyModifiers::NONE,
            })
        }))
    }
}
