#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for the portal maze.
//!
//! A [`Level`] is assembled once by the generator and then mutated only
//! through [`apply`]: movement intents resolve against the grid and mechanics,
//! ticks advance the simulation clock and every patrolling obstacle. Adapters
//! read the level exclusively through the [`query`] module.

use std::time::Duration;

use portal_maze_core::{
    CellCoord, Command, Event, Grid, LevelMechanics, LevelNumber, ObstacleTuning,
};

mod player;

/// Fully validated level published to players and renderers.
#[derive(Clone, Debug)]
pub struct Level {
    number: LevelNumber,
    grid: Grid,
    mechanics: LevelMechanics,
    obstacle_tuning: ObstacleTuning,
    player: CellCoord,
    clock: Duration,
    last_move_at: Option<Duration>,
    completed: bool,
}

impl Level {
    /// Assembles a level with the player standing on the entrance.
    #[must_use]
    pub fn new(
        number: LevelNumber,
        grid: Grid,
        mechanics: LevelMechanics,
        obstacle_tuning: ObstacleTuning,
    ) -> Self {
        let player = grid.entrance();
        Self {
            number,
            grid,
            mechanics,
            obstacle_tuning,
            player,
            clock: Duration::ZERO,
            last_move_at: None,
            completed: false,
        }
    }

    /// Places the player on `cell` if it can be stood on.
    ///
    /// Returns `false` and leaves the player untouched when the cell is
    /// blocked or hidden behind a visible movable wall.
    pub fn place_player(&mut self, cell: CellCoord) -> bool {
        if !self.grid.is_passable(cell) || self.mechanics.is_wall_visible(cell) {
            return false;
        }
        self.player = cell;
        self.completed = cell == self.grid.exit();
        true
    }
}

/// Applies the provided command to the level, mutating state deterministically.
pub fn apply(level: &mut Level, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => {
            let _ = level.apply_move(direction, out_events);
        }
        Command::Tick { dt } => {
            level.clock = level.clock.saturating_add(dt);
            let tuning = level.obstacle_tuning;
            for obstacle in level.mechanics.obstacles_mut() {
                obstacle.advance(dt, &tuning);
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
    }
}

/// Query functions that provide read-only access to the level state.
pub mod query {
    use std::time::Duration;

    use portal_maze_core::{CellCoord, Grid, LevelMechanics, LevelNumber};
    use serde::Serialize;

    use super::Level;

    /// Number of the level being played.
    #[must_use]
    pub fn level_number(level: &Level) -> LevelNumber {
        level.number
    }

    /// Provides read-only access to the carved grid.
    #[must_use]
    pub fn grid(level: &Level) -> &Grid {
        &level.grid
    }

    /// Provides read-only access to the mechanics in their current state.
    #[must_use]
    pub fn mechanics(level: &Level) -> &LevelMechanics {
        &level.mechanics
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(level: &Level) -> CellCoord {
        level.player
    }

    /// Reports whether the player has reached the exit.
    #[must_use]
    pub fn is_complete(level: &Level) -> bool {
        level.completed
    }

    /// Simulated time elapsed since the player last changed position.
    ///
    /// Renderers derive transient animation offsets from this value.
    #[must_use]
    pub fn time_since_last_move(level: &Level) -> Option<Duration> {
        level
            .last_move_at
            .map(|moved_at| level.clock.saturating_sub(moved_at))
    }

    /// Captures an owned, serializable copy of everything a renderer draws.
    #[must_use]
    pub fn snapshot(level: &Level) -> LevelSnapshot {
        LevelSnapshot {
            level: level.number,
            grid: level.grid.clone(),
            mechanics: level.mechanics.clone(),
            player: level.player,
            completed: level.completed,
            since_last_move: time_since_last_move(level),
        }
    }

    /// Read-only snapshot of a level for the rendering boundary.
    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct LevelSnapshot {
        /// Level being played.
        pub level: LevelNumber,
        /// Carved grid.
        pub grid: Grid,
        /// Mechanics in their current state.
        pub mechanics: LevelMechanics,
        /// Cell occupied by the player.
        pub player: CellCoord,
        /// Whether the exit has been reached.
        pub completed: bool,
        /// Simulated time since the last accepted move, if any.
        pub since_last_move: Option<Duration>,
    }
}
