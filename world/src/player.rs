//! Movement intents resolved against the grid and mechanics.

use portal_maze_core::{CellCoord, Direction, Event, MoveOutcome};

use crate::Level;

/// Effect a single step has once the target cell is known to be enterable.
enum Interaction {
    Teleport { exit: CellCoord },
    Toggle { index: usize },
    Walk,
}

impl Level {
    /// Applies a single movement intent.
    ///
    /// Blocked or out-of-bounds targets leave the level untouched, as do
    /// portals whose paired endpoint cannot be entered and moves made after
    /// the exit has been reached. Otherwise portals take priority
    /// over switches, and switches are flipped from the adjacent cell without
    /// the player advancing onto them.
    pub fn apply_move(&mut self, direction: Direction, out: &mut Vec<Event>) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        if self.completed {
            return outcome;
        }

        let from = self.player;
        let Some(target) = from.step(direction) else {
            return outcome;
        };
        let Some(interaction) = self.interaction_at(target) else {
            return outcome;
        };

        match interaction {
            Interaction::Teleport { exit } => {
                self.player = exit;
                outcome.moved = true;
                outcome.teleported = true;
                if let Some(portal) = self.mechanics.portal_at(target) {
                    out.push(Event::PortalTraversed {
                        entry: target,
                        exit,
                        color: portal.color(),
                    });
                }
            }
            Interaction::Toggle { index } => {
                if let Some(active) = self.mechanics.toggle_switch(index) {
                    outcome.toggled_switch = true;
                    out.push(Event::SwitchToggled {
                        position: target,
                        active,
                    });
                }
                return outcome;
            }
            Interaction::Walk => {
                self.player = target;
                outcome.moved = true;
                out.push(Event::PlayerMoved { from, to: target });
            }
        }

        self.last_move_at = Some(self.clock);
        if self.player == self.grid.exit() {
            self.completed = true;
            outcome.won_level = true;
            out.push(Event::LevelComplete { level: self.number });
        }

        outcome
    }

    fn interaction_at(&self, target: CellCoord) -> Option<Interaction> {
        if !self.grid.is_passable(target) {
            return None;
        }

        let switch = self.mechanics.switch_index_at(target);
        if switch.is_none() && self.mechanics.is_wall_visible(target) {
            return None;
        }

        if let Some(destination) = self.mechanics.destination_of(target) {
            let exit = destination.position();
            if !self.grid.is_passable(exit) || self.mechanics.is_wall_visible(exit) {
                return None;
            }
            return Some(Interaction::Teleport { exit });
        }

        Some(match switch {
            Some(index) => Interaction::Toggle { index },
            None => Interaction::Walk,
        })
    }
}
