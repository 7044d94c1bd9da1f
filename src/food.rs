use log::{debug, warn};
use rand::Rng;

use crate::grid::{CellState, Grid, Position};

/// Drops food on a uniformly random empty cell.
///
/// Sampling is plain rejection: draw an index over the whole grid and retry
/// until it hits an `Empty` cell. The expected number of draws grows as the
/// snake fills the grid, which is fine for the grid sizes this game runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct FoodPlacer;

impl FoodPlacer {
    pub fn new() -> Self {
        FoodPlacer
    }

    /// Returns the new food position, or `None` if no empty cell is left.
    pub fn place<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> Option<Position> {
        if grid.count(CellState::Empty) == 0 {
            warn!("no empty cell left for food on {}x{} grid", grid.width(), grid.height());
            return None;
        }

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let index = rng.gen_range(0..grid.area());
            if grid.cell_at(index) == CellState::Empty {
                let pos = grid.position_of(index);
                grid.set(pos, CellState::Food);
                debug!("food placed at {} after {} attempt(s)", pos, attempts);
                return Some(pos);
            }
        }
    }
}
