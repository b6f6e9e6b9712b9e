#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Generate-validate-retry loop producing solvable levels.
//!
//! Each attempt carves a fresh grid, overlays the requested level's mechanics
//! and certifies that the exit, every portal and every switch are reachable
//! from the entrance. The first certified attempt is published as a
//! [`Level`]; when every attempt is rejected the caller receives
//! [`GenerationError::GenerationFailure`] and no level is produced.

use portal_maze_core::{
    CellCoord, Grid, LevelMechanics, LevelNumber, MechanicsError, Portal, Switch,
};
use portal_maze_system_carving::carve;
use portal_maze_system_mechanics::{load, overlay};
use portal_maze_system_reachability::ReachabilityValidator;
use portal_maze_world::Level;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

mod config;

pub use config::{ConfigError, GeneratorConfig, MAX_GRID_EDGE, MIN_GRID_EDGE};

/// Diagnostic record of a single generation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationEvent {
    /// An attempt failed certification and was discarded.
    AttemptRejected {
        /// Level being generated.
        level: LevelNumber,
        /// One-based attempt number.
        attempt: u32,
        /// First check the attempt failed.
        reason: Rejection,
    },
    /// An attempt passed every check and was published.
    LevelAccepted {
        /// Level that was generated.
        level: LevelNumber,
        /// Number of attempts used, including the accepted one.
        attempts: u32,
        /// Length of the certified entrance-to-exit path.
        path_length: usize,
    },
}

/// Reason an attempt failed certification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No route leads from the entrance to the exit.
    ExitUnreachable,
    /// At least one portal cannot be reached from the entrance.
    PortalUnreachable,
    /// At least one switch cannot be reached from the entrance.
    SwitchUnreachable,
}

/// Errors reported to the level-progression collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested level has no declared mechanics.
    #[error("level {0} is not declared")]
    UnknownLevel(u32),
    /// Every attempt was rejected.
    #[error("failed to generate a solvable layout for level {level} after {attempts} attempts")]
    GenerationFailure {
        /// Level that could not be generated.
        level: u32,
        /// Number of attempts made.
        attempts: u32,
    },
}

impl From<MechanicsError> for GenerationError {
    fn from(error: MechanicsError) -> Self {
        match error {
            MechanicsError::UnknownLevel(level) => GenerationError::UnknownLevel(level),
        }
    }
}

/// Level generator that owns its configuration and random source.
#[derive(Debug)]
pub struct LevelGenerator<R = ChaCha8Rng> {
    config: GeneratorConfig,
    validator: ReachabilityValidator,
    rng: R,
}

impl LevelGenerator<ChaCha8Rng> {
    /// Creates a generator seeded from `config.seed`.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R> LevelGenerator<R>
where
    R: Rng,
{
    /// Creates a generator drawing carving randomness from `rng`.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            validator: ReachabilityValidator::new(config.obstacle_policy),
            config,
            rng,
        })
    }

    /// Configuration the generator was built with.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a certified level, recording every attempt in `out`.
    ///
    /// Calling this again for the same level number restarts it with a fresh
    /// layout, because the random source has advanced.
    pub fn generate(
        &mut self,
        level: LevelNumber,
        out: &mut Vec<GenerationEvent>,
    ) -> Result<Level, GenerationError> {
        let mechanics = load(level)?;
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let mut grid = carve(self.config.dimensions(), &mut self.rng);
            overlay(&mut grid, &mechanics);
            grid.force_entrance_and_exit();

            match self.certify(&grid, &mechanics) {
                Ok(path_length) => {
                    out.push(GenerationEvent::LevelAccepted {
                        level,
                        attempts: attempt,
                        path_length,
                    });
                    return Ok(Level::new(
                        level,
                        grid,
                        mechanics,
                        self.config.obstacle,
                    ));
                }
                Err(reason) => out.push(GenerationEvent::AttemptRejected {
                    level,
                    attempt,
                    reason,
                }),
            }
        }

        Err(GenerationError::GenerationFailure {
            level: level.get(),
            attempts: max_attempts,
        })
    }

    /// Checks the exit, every portal and every switch against the entrance.
    ///
    /// Returns the length of the certified entrance-to-exit path.
    pub fn certify(&self, grid: &Grid, mechanics: &LevelMechanics) -> Result<usize, Rejection> {
        let entrance = grid.entrance();
        let exit = self
            .validator
            .is_reachable(grid, mechanics, entrance, grid.exit());
        if !exit.reachable {
            return Err(Rejection::ExitUnreachable);
        }

        let portals: Vec<CellCoord> = mechanics.portals().iter().map(Portal::position).collect();
        if !self
            .validator
            .all_accessible(grid, mechanics, entrance, &portals)
        {
            return Err(Rejection::PortalUnreachable);
        }

        let switches: Vec<CellCoord> = mechanics.switches().iter().map(Switch::position).collect();
        if !self
            .validator
            .all_accessible(grid, mechanics, entrance, &switches)
        {
            return Err(Rejection::SwitchUnreachable);
        }

        Ok(exit.path.len())
    }
}
