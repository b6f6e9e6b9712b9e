use portal_maze_core::{
    CellCoord, CellState, Grid, GridDimensions, LevelMechanics, LevelNumber, MovableWall,
    Obstacle, ObstaclePolicy, Portal, PortalColor, Switch,
};
use portal_maze_system_carving::carve;
use portal_maze_system_mechanics::{load, overlay};
use portal_maze_system_reachability::{PathStep, ReachabilityValidator, StepKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cell(column: u32, row: u32) -> CellCoord {
    CellCoord::new(column, row)
}

/// Blocked grid with the provided cells carved open.
fn grid_with(columns: u32, rows: u32, open: &[CellCoord]) -> Grid {
    let mut grid = Grid::blocked(GridDimensions::new(columns, rows));
    for &position in open {
        grid.set(position, CellState::Passable);
    }
    grid
}

fn corridor(row: u32, columns: std::ops::RangeInclusive<u32>) -> Vec<CellCoord> {
    columns.map(|column| cell(column, row)).collect()
}

fn walk(column: u32, row: u32) -> PathStep {
    PathStep {
        cell: cell(column, row),
        kind: StepKind::Walk,
    }
}

#[test]
fn open_grid_path_is_shortest() {
    let grid = Grid::open(GridDimensions::new(10, 10));
    let certificate = ReachabilityValidator::default().is_reachable(
        &grid,
        &LevelMechanics::empty(),
        cell(1, 1),
        cell(8, 8),
    );

    assert!(certificate.reachable);
    assert_eq!(certificate.path.len(), 14);
    assert!(certificate.path.iter().all(|step| step.kind == StepKind::Walk));
    assert_eq!(certificate.path.last().map(|step| step.cell), Some(cell(8, 8)));
}

#[test]
fn blocked_corridor_is_unreachable() {
    let mut open = corridor(1, 1..=3);
    open.extend(corridor(1, 5..=7));
    let grid = grid_with(9, 3, &open);

    let certificate = ReachabilityValidator::default().is_reachable(
        &grid,
        &LevelMechanics::empty(),
        cell(1, 1),
        cell(7, 1),
    );

    assert!(!certificate.reachable);
    assert!(certificate.path.is_empty());
}

#[test]
fn portal_bridges_disconnected_rooms() {
    let mut open = corridor(1, 1..=4);
    open.extend(corridor(1, 6..=9));
    let grid = grid_with(11, 3, &open);
    let mechanics = LevelMechanics::new(
        vec![
            Portal::new(cell(4, 1), PortalColor::A, 0),
            Portal::new(cell(6, 1), PortalColor::A, 0),
        ],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    let certificate =
        ReachabilityValidator::default().is_reachable(&grid, &mechanics, cell(1, 1), cell(9, 1));

    assert!(certificate.reachable);
    assert_eq!(
        certificate.path,
        vec![
            walk(2, 1),
            walk(3, 1),
            PathStep {
                cell: cell(4, 1),
                kind: StepKind::PortalEntry,
            },
            PathStep {
                cell: cell(6, 1),
                kind: StepKind::PortalExit,
            },
            walk(7, 1),
            walk(8, 1),
            walk(9, 1),
        ]
    );
}

#[test]
fn portal_entry_cells_cannot_be_walked_through() {
    let mut open = corridor(1, 1..=5);
    open.push(cell(1, 3));
    let grid = grid_with(7, 5, &open);
    let mechanics = LevelMechanics::new(
        vec![
            Portal::new(cell(3, 1), PortalColor::B, 0),
            Portal::new(cell(1, 3), PortalColor::B, 0),
        ],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );
    let validator = ReachabilityValidator::default();

    assert!(
        !validator
            .is_reachable(&grid, &mechanics, cell(1, 1), cell(5, 1))
            .reachable,
        "stepping onto the portal always teleports, so the far side is sealed off"
    );
    assert!(
        validator
            .is_reachable(&grid, &mechanics, cell(1, 1), cell(3, 1))
            .reachable,
        "the portal itself can be touched"
    );
}

#[test]
fn switch_opens_the_wall_it_controls() {
    let mut open = corridor(1, 1..=5);
    open.push(cell(2, 2));
    let grid = grid_with(7, 4, &open);
    let mechanics = LevelMechanics::new(
        Vec::new(),
        vec![Switch::new(cell(2, 2), cell(4, 1))],
        vec![MovableWall::new(cell(4, 1), true)],
        Vec::new(),
    );

    let certificate =
        ReachabilityValidator::default().is_reachable(&grid, &mechanics, cell(1, 1), cell(5, 1));

    assert!(certificate.reachable);
    assert_eq!(
        certificate.path,
        vec![
            walk(2, 1),
            PathStep {
                cell: cell(2, 2),
                kind: StepKind::Switch,
            },
            walk(3, 1),
            walk(4, 1),
            walk(5, 1),
        ]
    );
    assert!(
        mechanics.is_wall_visible(cell(4, 1)),
        "validation must not mutate mechanics"
    );
}

#[test]
fn visible_wall_without_switch_blocks_the_corridor() {
    let grid = grid_with(7, 3, &corridor(1, 1..=5));
    let mechanics = LevelMechanics::new(
        Vec::new(),
        Vec::new(),
        vec![MovableWall::new(cell(3, 1), true)],
        Vec::new(),
    );

    let certificate =
        ReachabilityValidator::default().is_reachable(&grid, &mechanics, cell(1, 1), cell(5, 1));

    assert!(!certificate.reachable);
}

#[test]
fn switches_count_as_accessible_targets() {
    let mut open = corridor(1, 1..=3);
    open.push(cell(3, 2));
    let grid = grid_with(5, 4, &open);
    let mechanics = LevelMechanics::new(
        Vec::new(),
        vec![Switch::new(cell(3, 2), cell(9, 9))],
        Vec::new(),
        Vec::new(),
    );

    let validator = ReachabilityValidator::default();
    assert!(validator.all_accessible(&grid, &mechanics, cell(1, 1), &[cell(3, 2), cell(3, 1)]));
    assert!(!validator.all_accessible(&grid, &mechanics, cell(1, 1), &[cell(3, 2), cell(2, 2)]));
}

#[test]
fn patrol_policy_controls_obstacle_exclusion() {
    let grid = grid_with(9, 5, &corridor(1, 1..=7));
    // Patrol crosses the corridor at column 4 but currently rests below it.
    let mechanics = LevelMechanics::new(
        Vec::new(),
        Vec::new(),
        Vec::new(),
        vec![Obstacle::new(vec![cell(4, 3), cell(4, 1)])],
    );

    let strict = ReachabilityValidator::new(ObstaclePolicy::AvoidPatrolPath);
    let lenient = ReachabilityValidator::new(ObstaclePolicy::AvoidCurrentPosition);

    assert!(!strict.is_reachable(&grid, &mechanics, cell(1, 1), cell(7, 1)).reachable);
    assert!(lenient.is_reachable(&grid, &mechanics, cell(1, 1), cell(7, 1)).reachable);
}

#[test]
fn carved_mazes_connect_entrance_and_exit_without_mechanics() {
    let validator = ReachabilityValidator::default();
    for (columns, rows) in [(20, 20), (21, 15), (7, 9)] {
        for seed in 0..24 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = carve(GridDimensions::new(columns, rows), &mut rng);
            let certificate = validator.is_reachable(
                &grid,
                &LevelMechanics::empty(),
                grid.entrance(),
                grid.exit(),
            );

            assert!(
                certificate.reachable,
                "{columns}x{rows} seed {seed}: exit unreachable"
            );
        }
    }
}

#[test]
fn level_three_exit_sits_on_a_patrol() {
    let mechanics = load(LevelNumber::new(3)).expect("level 3 is declared");
    let mut grid = Grid::open(GridDimensions::new(20, 20));
    overlay(&mut grid, &mechanics);

    let strict = ReachabilityValidator::new(ObstaclePolicy::AvoidPatrolPath);
    let certificate = strict.is_reachable(&grid, &mechanics, grid.entrance(), grid.exit());

    assert!(!certificate.reachable);
}

#[test]
fn level_two_exit_requires_the_switch() {
    let mechanics = load(LevelNumber::new(2)).expect("level 2 is declared");
    let mut grid = Grid::open(GridDimensions::new(20, 20));
    overlay(&mut grid, &mechanics);

    let certificate = ReachabilityValidator::default().is_reachable(
        &grid,
        &mechanics,
        grid.entrance(),
        grid.exit(),
    );

    assert!(certificate.reachable);
    assert!(
        certificate
            .path
            .iter()
            .any(|step| step.kind == StepKind::Switch && step.cell == cell(10, 10)),
        "exit is walled off until the switch is flipped"
    );
}

#[test]
fn validation_is_deterministic() {
    let mechanics = load(LevelNumber::new(2)).expect("level 2 is declared");
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut grid = carve(GridDimensions::new(20, 20), &mut rng);
    overlay(&mut grid, &mechanics);
    let validator = ReachabilityValidator::default();

    let first = validator.is_reachable(&grid, &mechanics, grid.entrance(), grid.exit());
    let second = validator.is_reachable(&grid, &mechanics, grid.entrance(), grid.exit());

    assert_eq!(first, second);
}
