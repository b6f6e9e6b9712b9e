//! Plain-text rendering of a level snapshot.

use portal_maze_core::{CellCoord, CellState, LevelMechanics, PortalColor};
use portal_maze_world::query::LevelSnapshot;

/// Renders the snapshot as one text line per grid row.
///
/// Later layers win: terrain, mechanics, obstacles, then the player.
pub(crate) fn ascii(snapshot: &LevelSnapshot) -> String {
    let grid = &snapshot.grid;
    let obstacles = snapshot.mechanics.obstacle_cells();
    let width = usize::try_from(grid.columns()).unwrap_or(0).saturating_add(1);
    let height = usize::try_from(grid.rows()).unwrap_or(0);
    let mut text = String::with_capacity(width.saturating_mul(height));

    for (row, cells) in grid.rows_iter().enumerate() {
        for (column, state) in cells.iter().enumerate() {
            let cell = CellCoord::new(column as u32, row as u32);
            let glyph = if cell == snapshot.player {
                '@'
            } else if obstacles.contains(&cell) {
                'x'
            } else if let Some(glyph) = mechanic_glyph(&snapshot.mechanics, cell) {
                glyph
            } else if cell == grid.entrance() {
                'S'
            } else if cell == grid.exit() {
                'E'
            } else {
                match state {
                    CellState::Passable => '.',
                    CellState::Blocked => '#',
                }
            };
            text.push(glyph);
        }
        text.push('\n');
    }

    text
}

fn mechanic_glyph(mechanics: &LevelMechanics, cell: CellCoord) -> Option<char> {
    if let Some(portal) = mechanics.portal_at(cell) {
        return Some(match portal.color() {
            PortalColor::A => 'a',
            PortalColor::B => 'b',
            PortalColor::C => 'c',
        });
    }
    if let Some(switch) = mechanics.switch_at(cell) {
        return Some(if switch.is_active() { 'O' } else { 'o' });
    }
    if mechanics.is_wall_visible(cell) {
        return Some('W');
    }
    None
}
