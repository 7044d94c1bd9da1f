use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::food::FoodPlacer;
use crate::grid::{CellState, Grid, Position};
use crate::snake::{Body, Direction};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Continued,
    Grew,
    Terminated,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Running,
    Terminated,
}

/// One simulation run. Owns the grid and the body for their whole lifetime;
/// callers drive it by calling [`Game::tick`] once per scheduler period.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    body: Body,
    placer: FoodPlacer,
    rng: StdRng,
    state: GameState,
    food: Option<Position>,
    collision: Option<Position>,
    ticks: u64,
}

impl Game {
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: &SimConfig, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: &SimConfig, rng: StdRng) -> Result<Self, SimError> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height, config.walls)?;
        let initial = config.initial_positions()?;
        let body = Body::new(grid.area(), &initial, config.initial_direction)?;
        for pos in body.segments() {
            grid.set(pos, CellState::Occupied);
        }

        let mut game = Game {
            grid,
            body,
            placer: FoodPlacer::new(),
            rng,
            state: GameState::Running,
            food: None,
            collision: None,
            ticks: 0,
        };
        game.food = game.placer.place(&mut game.grid, &mut game.rng);

        info!(
            "new game on {}x{} grid (walls: {}), snake of {} heading {:?}",
            config.width,
            config.height,
            config.walls,
            game.body.length(),
            game.body.direction()
        );
        Ok(game)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn direction(&self) -> Direction {
        self.body.direction()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// The cell marked `Collision` once the game has terminated.
    pub fn collision(&self) -> Option<Position> {
        self.collision
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Moves the food item to `pos`, which must be an empty cell or the
    /// current food cell.
    pub fn set_food(&mut self, pos: Position) -> Result<(), SimError> {
        if self.food == Some(pos) {
            return Ok(());
        }
        if !self.grid.contains(pos) {
            return Err(SimError::FoodOutOfBounds(pos));
        }
        if self.grid.get(pos) != CellState::Empty {
            return Err(SimError::FoodCellNotEmpty(pos));
        }
        if let Some(old) = self.food.take() {
            self.grid.set(old, CellState::Empty);
        }
        self.grid.set(pos, CellState::Food);
        self.food = Some(pos);
        Ok(())
    }

    /// Advances the simulation by one step.
    ///
    /// `Err` is reserved for broken invariants; running into a wall or into
    /// the snake itself is reported as `Ok(TickOutcome::Terminated)`. Once
    /// terminated, the game ignores further ticks.
    pub fn tick(&mut self, intent: Option<Direction>) -> Result<TickOutcome, SimError> {
        if self.state == GameState::Terminated {
            return Ok(TickOutcome::Terminated);
        }
        self.ticks += 1;

        if let Some(dir) = intent {
            if !self.body.steer(dir) {
                trace!("tick {}: ignored reversal to {:?}", self.ticks, dir);
            }
        }

        let old_head = self.body.head_position();
        let new_head = match self.grid.neighbor(old_head, self.body.direction()) {
            Some(pos) => pos,
            // Only reachable without walls: the snake ran off the edge.
            None => return Ok(self.terminate(old_head)),
        };

        let outcome = match self.grid.get(new_head) {
            CellState::Empty => {
                let old_tail = self.body.pop_tail();
                self.grid.set(old_tail, CellState::Empty);
                self.body.push_head(new_head)?;
                self.grid.set(new_head, CellState::Occupied);
                TickOutcome::Continued
            }
            CellState::Food => {
                self.body.push_head(new_head)?;
                self.grid.set(new_head, CellState::Occupied);
                debug!("ate food at {}, length now {}", new_head, self.body.length());
                self.food = self.placer.place(&mut self.grid, &mut self.rng);
                TickOutcome::Grew
            }
            CellState::Wall | CellState::Occupied | CellState::Collision => self.terminate(new_head),
        };

        trace!("tick {}: head {} -> {}, {:?}", self.ticks, old_head, new_head, outcome);
        Ok(outcome)
    }

    fn terminate(&mut self, at: Position) -> TickOutcome {
        self.grid.set(at, CellState::Collision);
        self.collision = Some(at);
        self.state = GameState::Terminated;
        info!(
            "collision at {} after {} tick(s), final length {}",
            at,
            self.ticks,
            self.body.length()
        );
        TickOutcome::Terminated
    }
}
