use std::{thread::sleep, time::Duration};

use anyhow::{Context, Result};
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use log::{info, warn};

use ringsnake::{Direction::{*, self}, Game, SimConfig, TickOutcome};
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

/// What the player asked for after a game ended.
pub enum Next {
    Replay,
    Quit,
}

pub struct SnakeApp {
    config: SimConfig,
    seed: Option<u64>,
    ticks_per_step: u64,
    paused: bool,
    term: TermManager,
}

impl SnakeApp {
    pub fn new(config: SimConfig, seed: Option<u64>, tick_interval: Duration) -> Result<Self> {
        let ticks_per_step = (tick_interval.as_millis() as u64 / POLL_INTERVAL_MS).max(1);
        let term = TermManager::new().context("reading terminal size")?;
        Ok(SnakeApp { config, seed, ticks_per_step, paused: false, term })
    }

    /// Prepares the terminal. On failure the terminal is already restored.
    pub fn initialize(&mut self) -> Result<()> {
        self.term.fit_board(self.config.width, self.config.height)?;
        if let Err(err) = self.term.setup() {
            // setup can fail after the alternate screen is already up
            if let Err(restore_err) = self.term.restore() {
                warn!("restoring terminal after failed setup: {:#}", restore_err);
            }
            return Err(err);
        }
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Shows the controls and waits for a key. Returns `Next::Quit` on CTRL+C.
    pub fn show_intro(&mut self) -> Result<Next> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.clear()?;
        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Next::Quit);
        }
        Ok(Next::Replay)
    }

    pub fn play(&mut self) -> Result<Next> {
        let mut game = match self.seed {
            Some(seed) => Game::with_seed(&self.config, seed),
            None => Game::new(&self.config),
        }
        .context("setting up the game")?;

        self.paused = false;
        self.term.clear()?;
        self.term.draw_grid(game.grid())?;

        let mut intent: Option<Direction> = None;
        let mut ticks_until_step = self.ticks_per_step;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => return Ok(Next::Quit),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => intent = Some(Up),
                        KeyCode::Char('a') | KeyCode::Left => intent = Some(Left),
                        KeyCode::Char('s') | KeyCode::Down => intent = Some(Down),
                        KeyCode::Char('d') | KeyCode::Right => intent = Some(Right),
                        KeyCode::Esc => self.toggle_pause(&game)?,
                        _ => {}
                    }
                }
            }

            if self.paused { continue; }

            ticks_until_step -= 1;
            if ticks_until_step > 0 { continue; }
            ticks_until_step = self.ticks_per_step;

            let outcome = game.tick(intent.take())?;
            self.term.draw_grid(game.grid())?;

            if outcome == TickOutcome::Terminated {
                break;
            }
        }

        let length = game.body().length();
        info!("game over after {} ticks, length {}", game.ticks(), length);
        self.term.show_message(&[
            "Game over!",
            &*format!("Length: {}", length),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Next::Quit);
        }
        Ok(Next::Replay)
    }

    fn toggle_pause(&mut self, game: &Game) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.clear()?;
            self.term.draw_grid(game.grid())?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
