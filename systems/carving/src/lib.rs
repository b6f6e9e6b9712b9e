#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized backtracking maze carver.
//!
//! Carving walks the odd-coordinate sublattice starting from the entrance,
//! knocking out the wall cell between each visited cell and an unvisited
//! neighbour two steps away. The walk uses an explicit stack so deep grids
//! never grow the native call stack, and every direction shuffle is drawn from
//! the caller's random source so a seeded generator reproduces a grid exactly.

use portal_maze_core::{CellCoord, CellState, Direction, Grid, GridDimensions};
use rand::{seq::SliceRandom, Rng};

/// Carves a maze and forces the entrance and exit regions open.
///
/// The returned grid is connected between the entrance and exit. Forcing the
/// exit region may introduce a short cycle next to the exit.
#[must_use]
pub fn carve<R>(dimensions: GridDimensions, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let mut grid = spanning_tree(dimensions, rng);
    grid.force_entrance_and_exit();
    grid
}

/// Carves the spanning tree over the odd sublattice reachable from `(1,1)`.
///
/// Any two carved cells are joined by exactly one simple path. No cells outside
/// the tree are opened.
#[must_use]
pub fn spanning_tree<R>(dimensions: GridDimensions, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let mut grid = Grid::blocked(dimensions);
    let start = CellCoord::new(1, 1);
    if !grid.is_interior(start) {
        return grid;
    }

    grid.set(start, CellState::Passable);
    let mut stack = vec![Frame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.next_direction() else {
            let _ = stack.pop();
            continue;
        };
        let current = frame.cell;

        let Some((between, target)) = two_steps(current, direction) else {
            continue;
        };

        if grid.is_interior(target) && grid.get(target) == CellState::Blocked {
            grid.set(between, CellState::Passable);
            grid.set(target, CellState::Passable);
            stack.push(Frame::new(target, rng));
        }
    }

    grid
}

/// Cell under construction together with its remaining shuffled directions.
struct Frame {
    cell: CellCoord,
    directions: [Direction; 4],
    cursor: usize,
}

impl Frame {
    fn new<R>(cell: CellCoord, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            cursor: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(direction)
    }
}

fn two_steps(cell: CellCoord, direction: Direction) -> Option<(CellCoord, CellCoord)> {
    let between = cell.step(direction)?;
    let target = between.step(direction)?;
    Some((between, target))
}
