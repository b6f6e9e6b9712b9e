//! Declarative per-level mechanics overlaid on a carved grid.

use std::{collections::BTreeSet, time::Duration};

use serde::{Deserialize, Serialize};

use crate::CellCoord;

/// Colour group shared by the two endpoints of a portal pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortalColor {
    /// First colour group.
    A,
    /// Second colour group.
    B,
    /// Third colour group.
    C,
}

/// One endpoint of a teleporting portal pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Portal {
    position: CellCoord,
    color: PortalColor,
    pair: u32,
}

impl Portal {
    /// Creates a new portal endpoint.
    #[must_use]
    pub const fn new(position: CellCoord, color: PortalColor, pair: u32) -> Self {
        Self {
            position,
            color,
            pair,
        }
    }

    /// Cell occupied by the portal.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Colour group of the portal.
    #[must_use]
    pub const fn color(&self) -> PortalColor {
        self.color
    }

    /// Identifier shared with the paired endpoint.
    #[must_use]
    pub const fn pair(&self) -> u32 {
        self.pair
    }
}

/// Interactive switch bound to a movable wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Switch {
    position: CellCoord,
    active: bool,
    target: CellCoord,
}

impl Switch {
    /// Creates a new inactive switch bound to the wall at `target`.
    #[must_use]
    pub const fn new(position: CellCoord, target: CellCoord) -> Self {
        Self {
            position,
            active: false,
            target,
        }
    }

    /// Cell occupied by the switch.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Reports whether the switch is currently active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Position of the movable wall controlled by the switch.
    #[must_use]
    pub const fn target(&self) -> CellCoord {
        self.target
    }
}

/// Wall that blocks its cell only while visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovableWall {
    position: CellCoord,
    visible: bool,
}

impl MovableWall {
    /// Creates a new wall with the provided initial visibility.
    #[must_use]
    pub const fn new(position: CellCoord, visible: bool) -> Self {
        Self { position, visible }
    }

    /// Cell occupied by the wall.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Reports whether the wall currently blocks its cell.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Continuous obstacle position measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePoint {
    /// Horizontal position in cells.
    pub x: f32,
    /// Vertical position in cells.
    pub y: f32,
}

impl From<CellCoord> for ObstaclePoint {
    fn from(cell: CellCoord) -> Self {
        Self {
            x: cell.column() as f32,
            y: cell.row() as f32,
        }
    }
}

/// Tuning knobs for obstacle patrol motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Fraction of the remaining distance to the next waypoint covered per reference frame.
    pub step_fraction: f32,
    /// Distance per axis under which an obstacle counts as having arrived at a waypoint.
    pub arrival_epsilon: f32,
    /// Frame rate the step fraction is expressed against.
    pub frames_per_second: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            step_fraction: 0.05,
            arrival_epsilon: 0.1,
            frames_per_second: 60.0,
        }
    }
}

/// Hazard that patrols a cyclic sequence of waypoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    position: ObstaclePoint,
    patrol: Vec<CellCoord>,
    path_index: usize,
}

impl Obstacle {
    /// Creates an obstacle resting on the first waypoint of its patrol.
    #[must_use]
    pub fn new(patrol: Vec<CellCoord>) -> Self {
        let position = patrol
            .first()
            .copied()
            .map(ObstaclePoint::from)
            .unwrap_or(ObstaclePoint { x: 0.0, y: 0.0 });
        Self {
            position,
            patrol,
            path_index: 0,
        }
    }

    /// Current continuous position.
    #[must_use]
    pub const fn position(&self) -> ObstaclePoint {
        self.position
    }

    /// Waypoints visited in order, wrapping from the last back to the first.
    #[must_use]
    pub fn patrol(&self) -> &[CellCoord] {
        &self.patrol
    }

    /// Index of the waypoint most recently reached.
    #[must_use]
    pub const fn path_index(&self) -> usize {
        self.path_index
    }

    /// Grid cell containing the obstacle's current position.
    #[must_use]
    pub fn occupied_cell(&self) -> CellCoord {
        CellCoord::new(floor_to_cell(self.position.x), floor_to_cell(self.position.y))
    }

    /// Every cell the obstacle ever occupies while following its patrol.
    #[must_use]
    pub fn patrol_cells(&self) -> BTreeSet<CellCoord> {
        let mut cells = BTreeSet::new();
        let count = self.patrol.len();
        for (index, &start) in self.patrol.iter().enumerate() {
            let end = self.patrol[(index + 1) % count];
            trace_leg(start, end, &mut cells);
        }
        cells
    }

    /// Moves the obstacle toward its next waypoint by one simulation step.
    ///
    /// The obstacle closes a fixed fraction of the remaining distance per
    /// reference frame. Once within the arrival epsilon on both axes it snaps
    /// onto the waypoint and the path index advances modulo the patrol length.
    pub fn advance(&mut self, dt: Duration, tuning: &ObstacleTuning) {
        let count = self.patrol.len();
        if count == 0 {
            return;
        }

        let next_index = (self.path_index + 1) % count;
        let target = ObstaclePoint::from(self.patrol[next_index]);
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;

        if dx.abs() <= tuning.arrival_epsilon && dy.abs() <= tuning.arrival_epsilon {
            self.position = target;
            self.path_index = next_index;
            return;
        }

        let factor =
            (tuning.step_fraction * dt.as_secs_f32() * tuning.frames_per_second).clamp(0.0, 1.0);
        self.position.x += dx * factor;
        self.position.y += dy * factor;
    }
}

fn floor_to_cell(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.floor() as u32
    }
}

fn trace_leg(start: CellCoord, end: CellCoord, cells: &mut BTreeSet<CellCoord>) {
    let (x0, y0) = (i64::from(start.column()), i64::from(start.row()));
    let dx = i64::from(end.column()) - x0;
    let dy = i64::from(end.row()) - y0;
    let steps = dx.abs().max(dy.abs());

    if steps == 0 {
        let _ = cells.insert(start);
        return;
    }

    for step in 0..=steps {
        let x = x0 + (dx * step).div_euclid(steps);
        let y = y0 + (dy * step).div_euclid(steps);
        if let (Ok(column), Ok(row)) = (u32::try_from(x), u32::try_from(y)) {
            let _ = cells.insert(CellCoord::new(column, row));
        }
    }
}

/// Portals, switches, walls and obstacles belonging to one level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelMechanics {
    portals: Vec<Portal>,
    switches: Vec<Switch>,
    walls: Vec<MovableWall>,
    obstacles: Vec<Obstacle>,
}

impl LevelMechanics {
    /// Creates a mechanics table from its parts.
    ///
    /// Callers are responsible for internal consistency: every pair identifier
    /// should name exactly two portals and every switch should target a wall.
    #[must_use]
    pub fn new(
        portals: Vec<Portal>,
        switches: Vec<Switch>,
        walls: Vec<MovableWall>,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        Self {
            portals,
            switches,
            walls,
            obstacles,
        }
    }

    /// Mechanics table without any portals, switches, walls or obstacles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Portals declared for the level.
    #[must_use]
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Switches declared for the level.
    #[must_use]
    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    /// Movable walls declared for the level.
    #[must_use]
    pub fn walls(&self) -> &[MovableWall] {
        &self.walls
    }

    /// Obstacles patrolling the level.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Mutable access to the obstacles so the simulation driver can advance them.
    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    /// Portal located on the provided cell, if any.
    #[must_use]
    pub fn portal_at(&self, cell: CellCoord) -> Option<&Portal> {
        self.portals.iter().find(|portal| portal.position == cell)
    }

    /// Paired endpoint of the portal located on the provided cell.
    #[must_use]
    pub fn destination_of(&self, cell: CellCoord) -> Option<&Portal> {
        let entry = self.portal_at(cell)?;
        self.portals
            .iter()
            .find(|portal| portal.pair == entry.pair && portal.position != entry.position)
    }

    /// Switch located on the provided cell, if any.
    #[must_use]
    pub fn switch_at(&self, cell: CellCoord) -> Option<&Switch> {
        self.switches.iter().find(|switch| switch.position == cell)
    }

    /// Index of the switch located on the provided cell, if any.
    #[must_use]
    pub fn switch_index_at(&self, cell: CellCoord) -> Option<usize> {
        self.switches.iter().position(|switch| switch.position == cell)
    }

    /// Movable wall located on the provided cell, if any.
    #[must_use]
    pub fn wall_at(&self, cell: CellCoord) -> Option<&MovableWall> {
        self.walls.iter().find(|wall| wall.position == cell)
    }

    /// Reports whether a visible movable wall currently blocks the cell.
    #[must_use]
    pub fn is_wall_visible(&self, cell: CellCoord) -> bool {
        self.wall_at(cell).is_some_and(MovableWall::is_visible)
    }

    /// Flips the switch at `index` and syncs the bound wall so that `visible == !active`.
    ///
    /// Returns the new activation state, or `None` when no switch has that index.
    /// A switch bound to a missing wall still flips.
    pub fn toggle_switch(&mut self, index: usize) -> Option<bool> {
        let switch = self.switches.get_mut(index)?;
        switch.active = !switch.active;
        let active = switch.active;
        let target = switch.target;

        if let Some(wall) = self.walls.iter_mut().find(|wall| wall.position == target) {
            wall.visible = !active;
        }

        Some(active)
    }

    /// Union of every cell visited by any obstacle along its patrol.
    #[must_use]
    pub fn obstacle_patrol_cells(&self) -> BTreeSet<CellCoord> {
        self.obstacles
            .iter()
            .flat_map(Obstacle::patrol_cells)
            .collect()
    }

    /// Cells currently occupied by obstacles.
    #[must_use]
    pub fn obstacle_cells(&self) -> BTreeSet<CellCoord> {
        self.obstacles.iter().map(Obstacle::occupied_cell).collect()
    }
}
