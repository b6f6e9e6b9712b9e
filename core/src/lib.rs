#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the portal maze engine.
//!
//! This crate defines the data model every other crate speaks: the binary
//! [`Grid`] produced by carving, the declarative [`LevelMechanics`] overlaid on
//! top of it, and the message surface connecting adapters with the level
//! aggregate. Adapters submit [`Command`] values, the world applies them and
//! broadcasts [`Event`] values describing the resulting side effects.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod grid;
mod mechanics;

pub use grid::{CellState, Grid, GridDimensions};
pub use mechanics::{
    LevelMechanics, MovableWall, Obstacle, ObstaclePoint, ObstacleTuning, Portal, PortalColor,
    Switch,
};

/// Location of a single grid cell expressed as column (`x`) and row (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the adjacent cell in the provided direction.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(CellCoord::new(column, row))
    }
}

/// Cardinal movement intents accepted from the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Column and row offsets of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Parses the single-letter `U`/`D`/`L`/`R` notation used by move scripts.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'R' => Some(Direction::Right),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Number identifying one of the declared levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelNumber(u32);

impl LevelNumber {
    /// First level of the progression.
    pub const FIRST: LevelNumber = LevelNumber(1);
    /// Last declared level; advancing past it wraps to [`LevelNumber::FIRST`].
    pub const LAST: LevelNumber = LevelNumber(3);

    /// Wraps a raw level number. Validity is checked when mechanics are loaded.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level that follows this one, wrapping from the last level back to the first.
    #[must_use]
    pub const fn advance(self) -> LevelNumber {
        if self.0 >= Self::LAST.0 {
            Self::FIRST
        } else {
            LevelNumber(self.0 + 1)
        }
    }
}

/// Conservative strategy used by reachability checks to avoid patrolling obstacles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstaclePolicy {
    /// Treats every cell an obstacle ever visits along its patrol as hazardous.
    #[default]
    AvoidPatrolPath,
    /// Treats only the cell each obstacle currently occupies as hazardous.
    AvoidCurrentPosition,
}

/// Commands that express all permissible mutations of a published level.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests that the player attempt a single step.
    Move {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Advances the simulation clock and every patrolling obstacle.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the level after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player walked between two adjacent cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Announces that the player stepped onto a portal and was teleported.
    PortalTraversed {
        /// Portal cell the player stepped onto.
        entry: CellCoord,
        /// Paired portal cell the player now occupies.
        exit: CellCoord,
        /// Colour group shared by both portals.
        color: PortalColor,
    },
    /// Announces that the player flipped a switch.
    SwitchToggled {
        /// Location of the switch that was flipped.
        position: CellCoord,
        /// State of the switch after the flip.
        active: bool,
    },
    /// Announces that the player reached the exit cell.
    LevelComplete {
        /// Level that was completed.
        level: LevelNumber,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
}

/// Summary of a single movement intent, mirrored by the events it emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The player's position changed.
    pub moved: bool,
    /// The player was teleported through a portal pair.
    pub teleported: bool,
    /// A switch was flipped instead of moving.
    pub toggled_switch: bool,
    /// The move placed the player on the exit cell.
    pub won_level: bool,
}

/// Errors raised while loading the declarative mechanics of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MechanicsError {
    /// The requested level number has no declared mechanics table.
    #[error("level {0} is not declared; known levels are 1 through 3")]
    UnknownLevel(u32),
}
