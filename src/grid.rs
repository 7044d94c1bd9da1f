use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Occupied,
    Food,
    Wall,
    Collision,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// The neighbouring position one step towards `direction`, or `None` when
    /// that would go below zero on either axis.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Position { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Row-major occupancy map shared by the body, the food placer and the
/// renderer. The area is a power of two so the body ring can mask its indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    walls: bool,
    cells: Box<[CellState]>,
}

impl Grid {
    pub fn new(width: usize, height: usize, walls: bool) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::ZeroDimension { width, height });
        }

        let area = width
            .checked_mul(height)
            .filter(|area| area.is_power_of_two())
            .ok_or(SimError::AreaNotPowerOfTwo { width, height, area: width.saturating_mul(height) })?;

        let mut grid = Grid {
            width,
            height,
            walls,
            cells: vec![CellState::Empty; area].into_boxed_slice(),
        };

        if walls {
            for y in 0..height {
                for x in 0..width {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        grid.set(Position::new(x, y), CellState::Wall);
                    }
                }
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn has_walls(&self) -> bool {
        self.walls
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// # Panics
    ///
    /// If `pos` is outside the grid. Every position the simulation produces is
    /// derived from a legal move, so this only fires on corrupted geometry.
    pub fn index_of(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {} out of bounds for {}x{} grid",
            pos,
            self.width,
            self.height
        );
        pos.y * self.width + pos.x
    }

    pub fn position_of(&self, index: usize) -> Position {
        assert!(index < self.area(), "cell index {} out of bounds for area {}", index, self.area());
        Position::new(index % self.width, index / self.width)
    }

    pub fn get(&self, pos: Position) -> CellState {
        self.cells[self.index_of(pos)]
    }

    pub fn set(&mut self, pos: Position, state: CellState) {
        let index = self.index_of(pos);
        self.cells[index] = state;
    }

    pub fn cell_at(&self, index: usize) -> CellState {
        self.cells[index]
    }

    /// The neighbour of `pos` towards `direction` if it is still on the grid.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.step(direction).filter(|next| self.contains(*next))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.position_of(i), *cell))
    }

    /// One slice per row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }
}
