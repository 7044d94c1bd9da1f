//! Grid snake simulation: a ring-buffer body on a power-of-two occupancy grid.
//!
//! The crate exposes the simulation core only. Input, rendering and timing
//! are left to the caller, which steps a [`Game`] once per tick.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod snake;

pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use food::FoodPlacer;
pub use game::{Game, GameState, TickOutcome};
pub use grid::{CellState, Grid, Position};
pub use snake::{Body, Direction};
