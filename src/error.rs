use std::io;

use thiserror::Error;

use crate::grid::Position;
use crate::snake::Direction;

/// Faults raised by the simulation core.
///
/// Game-rule events such as hitting a wall are never reported here, they are
/// the normal `TickOutcome::Terminated` result of a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("grid area {width}x{height} = {area} is not a power of two")]
    AreaNotPowerOfTwo { width: usize, height: usize, area: usize },

    #[error("ring capacity {0} is not a power of two")]
    CapacityNotPowerOfTwo(usize),

    #[error("the snake needs at least one segment")]
    EmptyBody,

    #[error("{len} segments do not fit in a ring of capacity {capacity}")]
    BodyExceedsCapacity { len: usize, capacity: usize },

    #[error("initial segment {0} lies outside the grid")]
    InitialBodyOutOfBounds(Position),

    #[error("initial body leaves the grid stepping {direction:?} from {at}")]
    InitialBodyLeavesGrid { at: Position, direction: Direction },

    #[error("initial segment {0} is not on an empty cell")]
    InitialBodyBlocked(Position),

    #[error("ring overflow: body already holds {capacity} segments")]
    RingOverflow { capacity: usize },

    #[error("cannot place food on non-empty cell {0}")]
    FoodCellNotEmpty(Position),

    #[error("food position {0} lies outside the grid")]
    FoodOutOfBounds(Position),
}

/// Failures while loading a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] SimError),
}
