use std::collections::HashMap;

use portal_maze_core::{
    CellCoord, Grid, GridDimensions, LevelNumber, MechanicsError, Portal, PortalColor,
};
use portal_maze_system_mechanics::{load, overlay};

#[test]
fn level_one_declares_a_single_portal_pair() {
    let mechanics = load(LevelNumber::new(1)).expect("level 1 is declared");

    assert_eq!(
        mechanics.portals(),
        &[
            Portal::new(CellCoord::new(5, 5), PortalColor::A, 0),
            Portal::new(CellCoord::new(15, 15), PortalColor::A, 0),
        ]
    );
    assert!(mechanics.switches().is_empty());
    assert!(mechanics.walls().is_empty());
    assert!(mechanics.obstacles().is_empty());
}

#[test]
fn level_two_binds_switch_to_a_visible_wall() {
    let mechanics = load(LevelNumber::new(2)).expect("level 2 is declared");

    assert_eq!(mechanics.portals().len(), 4);
    assert_eq!(mechanics.switches().len(), 1);
    let switch = mechanics.switches()[0];
    assert_eq!(switch.position(), CellCoord::new(10, 10));
    assert!(!switch.is_active());
    assert!(mechanics.is_wall_visible(switch.target()));
}

#[test]
fn level_three_declares_rectangular_patrols() {
    let mechanics = load(LevelNumber::new(3)).expect("level 3 is declared");

    assert_eq!(mechanics.portals().len(), 6);
    assert_eq!(mechanics.switches().len(), 2);
    assert_eq!(mechanics.walls().len(), 2);
    assert_eq!(mechanics.obstacles().len(), 2);
    for obstacle in mechanics.obstacles() {
        assert_eq!(obstacle.patrol().len(), 4);
        assert_eq!(obstacle.path_index(), 0);
        assert_eq!(obstacle.occupied_cell(), obstacle.patrol()[0]);
    }
}

#[test]
fn every_pair_has_exactly_two_endpoints_sharing_a_colour() {
    for level in 1..=3 {
        let mechanics = load(LevelNumber::new(level)).expect("declared level");
        let mut pairs: HashMap<u32, Vec<PortalColor>> = HashMap::new();
        for portal in mechanics.portals() {
            pairs.entry(portal.pair()).or_default().push(portal.color());
        }

        for (pair, colors) in pairs {
            assert_eq!(colors.len(), 2, "level {level} pair {pair}");
            assert_eq!(colors[0], colors[1], "level {level} pair {pair}");
        }
    }
}

#[test]
fn unknown_levels_are_rejected() {
    assert_eq!(
        load(LevelNumber::new(4)),
        Err(MechanicsError::UnknownLevel(4))
    );
    assert_eq!(
        load(LevelNumber::new(0)),
        Err(MechanicsError::UnknownLevel(0))
    );
}

#[test]
fn overlay_opens_mechanic_cells_but_not_patrols() {
    let mechanics = load(LevelNumber::new(3)).expect("level 3 is declared");
    let mut grid = Grid::blocked(GridDimensions::new(20, 20));

    overlay(&mut grid, &mechanics);

    for cell in [
        CellCoord::new(5, 5),
        CellCoord::new(3, 12),
        CellCoord::new(10, 10),
        CellCoord::new(8, 8),
        CellCoord::new(16, 16),
        CellCoord::new(18, 18),
        CellCoord::new(1, 1),
    ] {
        assert!(grid.is_passable(cell), "{cell:?} should be opened");
    }
    assert!(!grid.is_passable(CellCoord::new(6, 8)));
    assert!(!grid.is_passable(CellCoord::new(14, 16)));
}

#[test]
fn overlay_ignores_cells_outside_the_interior() {
    let mechanics = load(LevelNumber::new(1)).expect("level 1 is declared");
    let mut grid = Grid::blocked(GridDimensions::new(8, 8));

    overlay(&mut grid, &mechanics);

    assert!(grid.is_passable(CellCoord::new(5, 5)));
    assert!(!grid.is_passable(CellCoord::new(15, 15)));
}
