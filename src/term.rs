use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use ringsnake::{CellState, Grid};

pub type TermInt = u16;

/// Every grid cell is drawn two columns wide so that cells look square.
const CELL_WIDTH: TermInt = 2;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    origin: (TermInt, TermInt),
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), origin: (0, 0) })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Centers a board of `cols x rows` grid cells, failing if it does not fit.
    pub fn fit_board(&mut self, cols: usize, rows: usize) -> Result<()> {
        let board_w = cols as u64 * CELL_WIDTH as u64;
        let board_h = rows as u64;
        if board_w > self.width as u64 || board_h > self.height as u64 {
            bail!(
                "terminal is {}x{}, the {}x{} grid needs at least {}x{}",
                self.width,
                self.height,
                cols,
                rows,
                board_w,
                board_h
            );
        }

        self.origin = (
            (self.width - board_w as TermInt) / 2,
            (self.height - board_h as TermInt) / 2,
        );
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn draw_grid(&mut self, grid: &Grid) -> Result<()> {
        queue_grid(&mut self.stdout, self.origin, grid)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queues one frame of `grid` with its top-left corner at `origin`.
fn queue_grid<W: Write>(out: &mut W, origin: (TermInt, TermInt), grid: &Grid) -> Result<()> {
    let (ox, oy) = origin;
    for (y, row) in grid.rows().enumerate() {
        queue!(out, cursor::MoveTo(ox, oy + y as TermInt))?;
        for cell in row {
            let (glyph, color) = glyph(*cell);
            queue!(out, style::SetForegroundColor(color), style::Print(glyph))?;
        }
    }
    queue!(out, style::ResetColor)?;
    Ok(())
}

fn glyph(cell: CellState) -> (&'static str, Color) {
    match cell {
        CellState::Empty => ("  ", Color::Reset),
        CellState::Occupied => ("██", Color::Yellow),
        CellState::Food => ("++", Color::Green),
        CellState::Wall => ("##", Color::White),
        CellState::Collision => ("XX", Color::Red),
    }
}
