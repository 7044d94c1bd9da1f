use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SimError};
use crate::grid::{CellState, Grid, Position};
use crate::snake::Direction;

pub const DEFAULT_GRID_SIZE: usize = 32;
pub const DEFAULT_SNAKE_LENGTH: usize = 4;
pub const DEFAULT_OFFSET: Position = Position::new(5, 10);

/// Construction-time inputs of a simulation run.
///
/// `initial_offset` is the tail segment; the body extends `initial_length - 1`
/// cells from it towards `initial_direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub walls: bool,
    pub initial_length: usize,
    pub initial_offset: Position,
    pub initial_direction: Direction,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            walls: true,
            initial_length: DEFAULT_SNAKE_LENGTH,
            initial_offset: DEFAULT_OFFSET,
            initial_direction: Direction::Right,
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let grid = Grid::new(self.width, self.height, self.walls)?;
        for pos in self.initial_positions()? {
            if !grid.contains(pos) {
                return Err(SimError::InitialBodyOutOfBounds(pos));
            }
            if grid.get(pos) != CellState::Empty {
                return Err(SimError::InitialBodyBlocked(pos));
            }
        }
        Ok(())
    }

    /// Initial segments, tail first.
    pub fn initial_positions(&self) -> Result<Vec<Position>, SimError> {
        if self.initial_length == 0 {
            return Err(SimError::EmptyBody);
        }

        let mut positions = Vec::with_capacity(self.initial_length);
        let mut pos = self.initial_offset;
        positions.push(pos);
        for _ in 1..self.initial_length {
            pos = pos
                .step(self.initial_direction)
                .ok_or(SimError::InitialBodyLeavesGrid { at: pos, direction: self.initial_direction })?;
            positions.push(pos);
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            config.initial_positions().unwrap(),
            vec![
                Position::new(5, 10),
                Position::new(6, 10),
                Position::new(7, 10),
                Position::new(8, 10)
            ]
        );
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = SimConfig::from_yaml_str("width: 16\nheight: 16\nwalls: false\n").unwrap();
        assert_eq!(config.width, 16);
        assert!(!config.walls);
        assert_eq!(config.initial_length, DEFAULT_SNAKE_LENGTH);
        assert_eq!(config.initial_direction, Direction::Right);
    }

    #[test]
    fn test_yaml_with_offset_and_direction() {
        let yaml = "width: 8\nheight: 8\nwalls: false\ninitial_length: 3\n\
                    initial_offset: { x: 4, y: 6 }\ninitial_direction: Up\n";
        let config = SimConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.initial_positions().unwrap(),
            vec![Position::new(4, 6), Position::new(4, 5), Position::new(4, 4)]
        );
    }

    #[test]
    fn test_invalid_area_is_rejected() {
        let result = SimConfig::from_yaml_str("width: 10\nheight: 10\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(SimError::AreaNotPowerOfTwo { area: 100, .. }))
        ));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        assert!(matches!(
            SimConfig::from_yaml_str("width: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_snake_overlapping_wall_is_rejected() {
        let config = SimConfig {
            initial_offset: Position::new(0, 10),
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimError::InitialBodyBlocked(Position::new(0, 10))));
    }

    #[test]
    fn test_snake_leaving_grid_is_rejected() {
        let config = SimConfig {
            width: 8,
            height: 8,
            walls: false,
            initial_offset: Position::new(6, 0),
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimError::InitialBodyOutOfBounds(Position::new(8, 0))));

        let config = SimConfig {
            initial_direction: Direction::Left,
            initial_offset: Position::new(1, 3),
            walls: false,
            ..SimConfig::default()
        };
        let err = SimError::InitialBodyLeavesGrid { at: Position::new(0, 3), direction: Direction::Left };
        assert_eq!(config.initial_positions(), Err(err.clone()));
        assert_eq!(config.validate(), Err(err));
    }

    #[test]
    fn test_zero_length_is_rejected() {
        let config = SimConfig { initial_length: 0, ..SimConfig::default() };
        assert_eq!(config.validate(), Err(SimError::EmptyBody));
    }
}
