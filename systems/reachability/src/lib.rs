#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first reachability validator for carved grids with mechanics.
//!
//! The search explores a composite state made of the current cell and the set
//! of switches flipped so far. Stepping onto a portal is a zero-cost hop to its
//! paired endpoint. Stepping toward a switch flips it in place, which may hide
//! the wall it controls. Plain walks never enter cells considered hazardous by
//! the configured [`ObstaclePolicy`]. The validator never mutates the
//! mechanics it inspects.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use portal_maze_core::{CellCoord, Direction, Grid, LevelMechanics, ObstaclePolicy};

/// Number of switches whose state the search can flip.
const TOGGLEABLE_SWITCHES: usize = u64::BITS as usize;

/// Kind of move recorded in a reachability certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Walked onto an adjacent cell.
    Walk,
    /// Stepped onto a portal endpoint.
    PortalEntry,
    /// Arrived on the paired portal endpoint.
    PortalExit,
    /// Flipped the switch on the recorded cell without moving.
    Switch,
}

/// Single entry of a recorded path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// Cell touched by the move.
    pub cell: CellCoord,
    /// Kind of move that touched the cell.
    pub kind: StepKind,
}

impl PathStep {
    const fn new(cell: CellCoord, kind: StepKind) -> Self {
        Self { cell, kind }
    }
}

/// Reachability certificate answering a single query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Certificate {
    /// Indicates whether the target can be reached.
    pub reachable: bool,
    /// Moves leading from the start to the target, empty when unreachable.
    pub path: Vec<PathStep>,
}

impl Certificate {
    fn unreachable() -> Self {
        Self::default()
    }
}

/// Validator answering solvability and accessibility queries.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReachabilityValidator {
    policy: ObstaclePolicy,
}

impl ReachabilityValidator {
    /// Creates a validator that avoids obstacles according to `policy`.
    #[must_use]
    pub const fn new(policy: ObstaclePolicy) -> Self {
        Self { policy }
    }

    /// Searches for a route from `from` to `to`.
    ///
    /// The search succeeds as soon as a state on `to` is dequeued. It also
    /// succeeds when `to` is a portal or switch touched from an adjacent cell.
    #[must_use]
    pub fn is_reachable(
        &self,
        grid: &Grid,
        mechanics: &LevelMechanics,
        from: CellCoord,
        to: CellCoord,
    ) -> Certificate {
        Search::new(grid, mechanics, self.policy).run(from, to)
    }

    /// Reports whether every target is independently reachable from `from`.
    #[must_use]
    pub fn all_accessible(
        &self,
        grid: &Grid,
        mechanics: &LevelMechanics,
        from: CellCoord,
        targets: &[CellCoord],
    ) -> bool {
        targets
            .iter()
            .all(|&target| self.is_reachable(grid, mechanics, from, target).reachable)
    }
}

/// Cell plus bitmask of switches flipped an odd number of times.
type State = (CellCoord, u64);

#[derive(Clone, Copy, Debug)]
enum Transition {
    Walk(CellCoord),
    Portal { entry: CellCoord, exit: CellCoord },
    Switch(CellCoord),
}

impl Transition {
    fn push_steps(self, out: &mut Vec<PathStep>) {
        match self {
            Transition::Walk(cell) => out.push(PathStep::new(cell, StepKind::Walk)),
            Transition::Portal { entry, exit } => {
                out.push(PathStep::new(entry, StepKind::PortalEntry));
                out.push(PathStep::new(exit, StepKind::PortalExit));
            }
            Transition::Switch(cell) => out.push(PathStep::new(cell, StepKind::Switch)),
        }
    }
}

struct Search<'a> {
    grid: &'a Grid,
    mechanics: &'a LevelMechanics,
    hazards: BTreeSet<CellCoord>,
    visited: HashSet<State>,
    parents: HashMap<State, (State, Transition)>,
    queue: VecDeque<State>,
}

impl<'a> Search<'a> {
    fn new(grid: &'a Grid, mechanics: &'a LevelMechanics, policy: ObstaclePolicy) -> Self {
        let hazards = match policy {
            ObstaclePolicy::AvoidPatrolPath => mechanics.obstacle_patrol_cells(),
            ObstaclePolicy::AvoidCurrentPosition => mechanics.obstacle_cells(),
        };
        Self {
            grid,
            mechanics,
            hazards,
            visited: HashSet::new(),
            parents: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    fn run(mut self, from: CellCoord, to: CellCoord) -> Certificate {
        let start = (from, 0);
        let _ = self.visited.insert(start);
        self.queue.push_back(start);

        while let Some(state) = self.queue.pop_front() {
            let (cell, toggled) = state;
            if cell == to {
                return self.certify(state, None);
            }

            for direction in Direction::ALL {
                let Some(next) = cell.step(direction) else {
                    continue;
                };
                if !self.grid.is_passable(next) {
                    continue;
                }

                let switch = self.mechanics.switch_index_at(next);
                if switch.is_none() && self.wall_blocks(next, toggled) {
                    continue;
                }

                if let Some(destination) = self.mechanics.destination_of(next) {
                    let exit = destination.position();
                    let hop = Transition::Portal { entry: next, exit };
                    if next == to {
                        return self.certify(state, Some(hop));
                    }
                    if self.grid.is_passable(exit) && !self.wall_blocks(exit, toggled) {
                        self.enqueue(state, (exit, toggled), hop);
                    }
                    continue;
                }

                if let Some(index) = switch {
                    if next == to {
                        return self.certify(state, Some(Transition::Switch(next)));
                    }
                    if index < TOGGLEABLE_SWITCHES {
                        self.enqueue(
                            state,
                            (cell, toggled ^ (1 << index)),
                            Transition::Switch(next),
                        );
                    }
                    continue;
                }

                if self.hazards.contains(&next) {
                    continue;
                }

                self.enqueue(state, (next, toggled), Transition::Walk(next));
            }
        }

        Certificate::unreachable()
    }

    fn enqueue(&mut self, parent: State, next: State, transition: Transition) {
        if self.visited.insert(next) {
            let _ = self.parents.insert(next, (parent, transition));
            self.queue.push_back(next);
        }
    }

    /// Reports whether a movable wall on `cell` is visible given the flipped switches.
    fn wall_blocks(&self, cell: CellCoord, toggled: u64) -> bool {
        let Some(wall) = self.mechanics.wall_at(cell) else {
            return false;
        };
        let flips = self
            .mechanics
            .switches()
            .iter()
            .take(TOGGLEABLE_SWITCHES)
            .enumerate()
            .filter(|&(index, switch)| switch.target() == cell && toggled & (1 << index) != 0)
            .count();
        wall.is_visible() != (flips % 2 == 1)
    }

    fn certify(&self, end: State, last: Option<Transition>) -> Certificate {
        let mut transitions: Vec<Transition> = last.into_iter().collect();
        let mut current = end;
        while let Some(&(parent, transition)) = self.parents.get(&current) {
            transitions.push(transition);
            current = parent;
        }

        let mut path = Vec::with_capacity(transitions.len());
        for transition in transitions.into_iter().rev() {
            transition.push_steps(&mut path);
        }

        Certificate {
            reachable: true,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_maze_core::GridDimensions;

    #[test]
    fn start_equals_target() {
        let grid = Grid::open(GridDimensions::new(5, 5));
        let certificate = ReachabilityValidator::default().is_reachable(
            &grid,
            &LevelMechanics::empty(),
            CellCoord::new(2, 2),
            CellCoord::new(2, 2),
        );
        assert!(certificate.reachable);
        assert!(certificate.path.is_empty());
    }

    #[test]
    fn portal_transition_records_entry_and_exit() {
        let mut path = Vec::new();
        Transition::Portal {
            entry: CellCoord::new(1, 1),
            exit: CellCoord::new(3, 3),
        }
        .push_steps(&mut path);
        assert_eq!(
            path,
            vec![
                PathStep::new(CellCoord::new(1, 1), StepKind::PortalEntry),
                PathStep::new(CellCoord::new(3, 3), StepKind::PortalExit),
            ]
        );
    }
}
