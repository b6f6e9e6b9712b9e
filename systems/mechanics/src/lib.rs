#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Declarative mechanics tables for the built-in levels.

use portal_maze_core::{
    CellCoord, CellState, Grid, LevelMechanics, LevelNumber, MechanicsError, MovableWall,
    Obstacle, Portal, PortalColor, Switch,
};

/// Loads the portals, switches, walls and obstacles declared for `level`.
pub fn load(level: LevelNumber) -> Result<LevelMechanics, MechanicsError> {
    match level.get() {
        1 => Ok(LevelMechanics::new(
            portal_pairs(1),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )),
        2 => Ok(LevelMechanics::new(
            portal_pairs(2),
            vec![Switch::new(cell(10, 10), cell(18, 18))],
            vec![MovableWall::new(cell(18, 18), true)],
            Vec::new(),
        )),
        3 => Ok(LevelMechanics::new(
            portal_pairs(3),
            vec![
                Switch::new(cell(10, 10), cell(18, 18)),
                Switch::new(cell(8, 8), cell(16, 16)),
            ],
            vec![
                MovableWall::new(cell(18, 18), true),
                MovableWall::new(cell(16, 16), true),
            ],
            vec![
                Obstacle::new(vec![cell(6, 6), cell(6, 10), cell(10, 10), cell(10, 6)]),
                Obstacle::new(vec![
                    cell(14, 14),
                    cell(14, 18),
                    cell(18, 18),
                    cell(18, 14),
                ]),
            ],
        )),
        other => Err(MechanicsError::UnknownLevel(other)),
    }
}

/// Opens every portal, switch and wall cell on a carved grid.
///
/// Movable walls block through their visibility rather than through the grid,
/// so their cells are carved too. Obstacle patrols are left untouched. The
/// entrance and exit regions are forced open again afterwards.
pub fn overlay(grid: &mut Grid, mechanics: &LevelMechanics) {
    let cells = mechanics
        .portals()
        .iter()
        .map(Portal::position)
        .chain(mechanics.switches().iter().map(Switch::position))
        .chain(mechanics.walls().iter().map(MovableWall::position));

    for position in cells {
        if grid.is_interior(position) {
            grid.set(position, CellState::Passable);
        }
    }

    grid.force_entrance_and_exit();
}

const PAIRS: [(PortalColor, (u32, u32), (u32, u32)); 3] = [
    (PortalColor::A, (5, 5), (15, 15)),
    (PortalColor::B, (7, 7), (17, 17)),
    (PortalColor::C, (3, 12), (12, 3)),
];

fn portal_pairs(count: usize) -> Vec<Portal> {
    PAIRS
        .iter()
        .take(count)
        .zip(0u32..)
        .flat_map(|(&(color, first, second), pair)| {
            [
                Portal::new(cell(first.0, first.1), color, pair),
                Portal::new(cell(second.0, second.1), color, pair),
            ]
        })
        .collect()
}

const fn cell(column: u32, row: u32) -> CellCoord {
    CellCoord::new(column, row)
}
