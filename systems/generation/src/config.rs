//! Tunable parameters for level generation.

use portal_maze_core::{GridDimensions, ObstaclePolicy, ObstacleTuning};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid edge that leaves room for the entrance and exit regions.
pub const MIN_GRID_EDGE: u32 = 5;

/// Largest supported grid edge.
pub const MAX_GRID_EDGE: u32 = 1024;

const DEFAULT_SEED: u64 = 0x6d61_7a65_5eed;

/// Aggregated knobs controlling the generate-validate-retry loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Carve attempts made before generation reports failure.
    pub max_attempts: u32,
    /// How reachability checks avoid patrolling obstacles.
    pub obstacle_policy: ObstaclePolicy,
    /// Seed for the carving random source.
    pub seed: u64,
    /// Motion parameters handed to every published level.
    pub obstacle: ObstacleTuning,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 20,
            max_attempts: 10,
            obstacle_policy: ObstaclePolicy::default(),
            seed: DEFAULT_SEED,
            obstacle: ObstacleTuning::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from TOML; omitted keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Grid dimensions described by the configuration.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.columns, self.rows)
    }

    /// Checks that every value lies within its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MIN_GRID_EDGE || self.rows < MIN_GRID_EDGE {
            return Err(ConfigError::DimensionsTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns > MAX_GRID_EDGE || self.rows > MAX_GRID_EDGE {
            return Err(ConfigError::DimensionsTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(self.obstacle.step_fraction > 0.0) {
            return Err(ConfigError::NonPositiveStep(self.obstacle.step_fraction));
        }
        if !(self.obstacle.arrival_epsilon > 0.0) {
            return Err(ConfigError::NonPositiveEpsilon(
                self.obstacle.arrival_epsilon,
            ));
        }
        if !(self.obstacle.frames_per_second > 0.0) {
            return Err(ConfigError::NonPositiveFrameRate(
                self.obstacle.frames_per_second,
            ));
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a [`GeneratorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse generator config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The grid is too small to hold the entrance and exit regions.
    #[error(
        "grid must be at least {min}x{min} (got {columns}x{rows})",
        min = MIN_GRID_EDGE
    )]
    DimensionsTooSmall {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The grid exceeds the supported edge length.
    #[error(
        "grid must be at most {max}x{max} (got {columns}x{rows})",
        max = MAX_GRID_EDGE
    )]
    DimensionsTooLarge {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// Obstacles would never move.
    #[error("obstacle step fraction must be positive (got {0})")]
    NonPositiveStep(f32),
    /// Obstacles would never register arriving at a waypoint.
    #[error("obstacle arrival epsilon must be positive (got {0})")]
    NonPositiveEpsilon(f32),
    /// The reference frame rate must be positive.
    #[error("obstacle frame rate must be positive (got {0})")]
    NonPositiveFrameRate(f32),
}
