//! Dense binary grid produced by maze carving.

use serde::{Deserialize, Serialize};

use crate::CellCoord;

/// Binary state of a single maze cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// The cell can be walked on.
    Passable,
    /// The cell is solid wall.
    #[default]
    Blocked,
}

/// Number of columns and rows laid out in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    columns: u32,
    rows: u32,
}

impl GridDimensions {
    /// Creates a new dimensions descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }
}

/// Fixed-size maze grid stored in row-major order.
///
/// Coordinates outside the grid read as [`CellState::Blocked`] and writes to
/// them are ignored, which keeps neighbour expansion free of bounds checks at
/// every call site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid whose every cell is blocked.
    #[must_use]
    pub fn blocked(dimensions: GridDimensions) -> Self {
        let count = usize::try_from(dimensions.columns())
            .ok()
            .and_then(|columns| {
                usize::try_from(dimensions.rows())
                    .ok()
                    .and_then(|rows| columns.checked_mul(rows))
            })
            .unwrap_or(0);
        Self {
            dimensions,
            cells: vec![CellState::Blocked; count],
        }
    }

    /// Creates a grid whose interior is passable and whose one-cell border is blocked.
    #[must_use]
    pub fn open(dimensions: GridDimensions) -> Self {
        let mut grid = Self::blocked(dimensions);
        for row in 1..dimensions.rows().saturating_sub(1) {
            for column in 1..dimensions.columns().saturating_sub(1) {
                grid.set(CellCoord::new(column, row), CellState::Passable);
            }
        }
        grid
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.dimensions.columns()
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.dimensions.rows()
    }

    /// Reports whether the coordinate lies within the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns() && cell.row() < self.rows()
    }

    /// Reports whether the coordinate lies strictly inside the one-cell border.
    #[must_use]
    pub fn is_interior(&self, cell: CellCoord) -> bool {
        cell.column() > 0
            && cell.row() > 0
            && cell.column() < self.columns().saturating_sub(1)
            && cell.row() < self.rows().saturating_sub(1)
    }

    /// State of the provided cell. Out-of-bounds cells read as blocked.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> CellState {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(CellState::Blocked)
    }

    /// Overwrites the state of the provided cell, ignoring out-of-bounds writes.
    pub fn set(&mut self, cell: CellCoord, state: CellState) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = state;
        }
    }

    /// Reports whether the cell can be walked on.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.get(cell) == CellState::Passable
    }

    /// Number of passable cells in the grid.
    #[must_use]
    pub fn passable_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| **state == CellState::Passable)
            .count()
    }

    /// Cell where the player enters the maze.
    #[must_use]
    pub const fn entrance(&self) -> CellCoord {
        CellCoord::new(1, 1)
    }

    /// Cell the player must reach to complete the level.
    #[must_use]
    pub fn exit(&self) -> CellCoord {
        CellCoord::new(
            self.columns().saturating_sub(2),
            self.rows().saturating_sub(2),
        )
    }

    /// Forces the entrance, the exit and their approach cells to be passable.
    pub fn force_entrance_and_exit(&mut self) {
        let last_column = self.columns().saturating_sub(2);
        let last_row = self.rows().saturating_sub(2);
        let near_column = self.columns().saturating_sub(3);
        let near_row = self.rows().saturating_sub(3);

        let forced = [
            CellCoord::new(1, 1),
            CellCoord::new(2, 1),
            CellCoord::new(1, 2),
            CellCoord::new(last_column, last_row),
            CellCoord::new(near_column, last_row),
            CellCoord::new(last_column, near_row),
            CellCoord::new(near_column, near_row),
        ];

        for cell in forced {
            self.set(cell, CellState::Passable);
        }
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[CellState]> {
        let width = usize::try_from(self.columns()).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let width = usize::try_from(self.columns()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
