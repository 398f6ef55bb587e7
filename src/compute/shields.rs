//! Destructible cover: layout, per-cell hits, and bulk erosion.

use crate::compute::collision::{is_collision, rects_overlap};
use crate::entities::{Position, Shield, Size};
use crate::sprites::{BLANK_CELL, PLAYER_SIZE, SHIELD_SIZE, SHIELD_SPRITE};

/// A projectile landed on a solid cell of `shields[index]`.
/// `cell` is relative to the shield's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShieldHit {
    pub index: usize,
    pub cell: Position,
}

/// Spread `count` shields evenly across the window, just above the player.
///
/// Leftover columns are split into `count + 1` gaps; the first gap is
/// rounded up and the rest rounded down. The window must be wide enough
/// for the shields themselves (`GameConfig::validate` checks this).
pub fn init_shields(count: usize, window: Size) -> Vec<Shield> {
    let gaps = count as i32 + 1;
    let spare = (window.width - count as i32 * SHIELD_SIZE.width).max(0);
    let first_padding = (spare + gaps - 1) / gaps;
    let padding = spare / gaps;
    let y = window.height - PLAYER_SIZE.height - 1 - SHIELD_SIZE.height - 2;

    (0..count as i32)
        .map(|i| Shield {
            position: Position::new(first_padding + i * (SHIELD_SIZE.width + padding), y),
            cells: SHIELD_SPRITE.iter().map(|row| row.as_bytes().to_vec()).collect(),
        })
        .collect()
}

/// First shield, in index order, with a solid cell under `projectile`.
pub fn shield_hit_test(shields: &[Shield], projectile: Option<Position>) -> Option<ShieldHit> {
    let projectile = projectile?;
    shields.iter().enumerate().find_map(|(index, shield)| {
        if !is_collision(projectile, shield.position, shield.size()) {
            return None;
        }
        let cell = Position::new(
            projectile.x - shield.position.x,
            projectile.y - shield.position.y,
        );
        shield.is_solid(cell).then_some(ShieldHit { index, cell })
    })
}

/// Punch out exactly the cell that was hit.
pub fn resolve_shield_hit(shields: &mut [Shield], hit: ShieldHit) {
    if hit.cell.x < 0 || hit.cell.y < 0 {
        return;
    }
    if let Some(cell) = shields
        .get_mut(hit.index)
        .and_then(|shield| shield.cells.get_mut(hit.cell.y as usize))
        .and_then(|row| row.get_mut(hit.cell.x as usize))
    {
        *cell = BLANK_CELL;
    }
}

/// Blank every shield cell covered by the box at `origin` with `size`.
pub fn erode_shields(shields: &mut [Shield], origin: Position, size: Size) {
    for shield in shields.iter_mut() {
        let shield_size = shield.size();
        if !rects_overlap(origin, size, shield.position, shield_size) {
            continue;
        }

        let dx = origin.x - shield.position.x;
        let dy = origin.y - shield.position.y;
        let rows = dy.max(0)..(dy + size.height).min(shield_size.height);
        let cols = dx.max(0)..(dx + size.width).min(shield_size.width);

        for row in rows {
            for col in cols.clone() {
                shield.cells[row as usize][col as usize] = BLANK_CELL;
            }
        }
    }
}
