//! The alien formation: lock-step movement, the shared explosion, and the
//! bomb pool.
//!
//! All randomness comes through the injected `rng` so callers control
//! determinism.

use log::debug;
use rand::Rng;

use crate::compute::collision::is_collision;
use crate::compute::shields::{erode_shields, resolve_shield_hit, shield_hit_test};
use crate::config::GameConfig;
use crate::entities::{
    AlienBomb, AlienState, AlienSwarm, BombOutcome, Player, Position, Shield, Size, SwarmOutcome,
};
use crate::sprites::{
    ALIENS_X_PADDING, ALIENS_Y_PADDING, ALIEN_BOMB_GLYPHS, ALIEN_SIZE, PLAYER_SIZE,
};

/// Rows a bomb falls per tick.
pub const ALIEN_BOMB_SPEED: i32 = 1;

/// Base of the bomb chance: one in `BOMB_CHANCE_BASE - crowding` per tick.
const BOMB_CHANCE_BASE: i64 = 70;

/// Smallest modulus the bomb roll may use, so the chance stays below 1.
const MIN_BOMB_MODULUS: i64 = 2;

/// Most bombs a single volley may try to drop.
const MAX_VOLLEY: i32 = 3;

// ── Construction ─────────────────────────────────────────────────────────────

/// Build a full-strength formation for `level`.
///
/// Higher levels start one line lower and have one line less to descend,
/// so the formation always lands exactly on the player's row.
pub fn init_aliens(window: Size, level: u32, config: &GameConfig) -> AlienSwarm {
    let rows = config.alien_rows;
    let cols = config.alien_cols;
    let line = config.lines_for_level(level);
    let formation_height =
        rows as i32 * ALIEN_SIZE.height + (rows as i32 - 1) * ALIENS_Y_PADDING;

    let mut swarm = AlienSwarm {
        position: Position::new(
            (window.width - cols as i32 * (ALIEN_SIZE.width + ALIENS_X_PADDING)) / 2,
            window.height - PLAYER_SIZE.height - formation_height - line as i32,
        ),
        rows,
        cols,
        cells: vec![AlienState::Alive; rows * cols],
        bombs: vec![AlienBomb::default(); config.max_bombs],
        sprite_size: ALIEN_SIZE,
        animation: 0,
        direction: 1,
        bombs_in_play: 0,
        movement_time: 0,
        explosion_timer: None,
        aliens_left: rows * cols,
        line,
    };
    reset_movement_time(&mut swarm);
    swarm
}

/// `2 * line + 5 * aliens_left / total`: the formation speeds up as it
/// descends and as it thins out.
pub fn reset_movement_time(swarm: &mut AlienSwarm) {
    let total = swarm.total_aliens().max(1) as i32;
    swarm.movement_time = 2 * swarm.line as i32 + 5 * swarm.aliens_left as i32 / total;
}

/// World position of the top-left corner of cell (`row`, `col`).
pub fn alien_position(swarm: &AlienSwarm, row: usize, col: usize) -> Position {
    Position::new(
        swarm.position.x + col as i32 * (swarm.sprite_size.width + ALIENS_X_PADDING),
        swarm.position.y + row as i32 * (swarm.sprite_size.height + ALIENS_Y_PADDING),
    )
}

// ── Formation bounds ─────────────────────────────────────────────────────────

/// Fully dead columns on each side of the formation, and fully dead rows
/// at its bottom. Exploding cells still count as occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyEdges {
    pub cols_left: usize,
    pub cols_right: usize,
    pub rows_bottom: usize,
}

/// The occupied part of the formation, in grid and world terms.
/// `right` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimmedBounds {
    pub first_col: usize,
    pub last_col: usize,
    pub left: i32,
    pub right: i32,
}

fn column_is_dead(swarm: &AlienSwarm, col: usize) -> bool {
    (0..swarm.rows).all(|row| swarm.cell(row, col) == Some(AlienState::Dead))
}

fn row_is_dead(swarm: &AlienSwarm, row: usize) -> bool {
    (0..swarm.cols).all(|col| swarm.cell(row, col) == Some(AlienState::Dead))
}

pub fn find_empty_rows_and_columns(swarm: &AlienSwarm) -> EmptyEdges {
    let cols_left = (0..swarm.cols)
        .take_while(|&col| column_is_dead(swarm, col))
        .count();
    let cols_right = (0..swarm.cols)
        .rev()
        .take_while(|&col| column_is_dead(swarm, col))
        .count();
    let rows_bottom = (0..swarm.rows)
        .rev()
        .take_while(|&row| row_is_dead(swarm, row))
        .count();

    EmptyEdges {
        cols_left,
        cols_right,
        rows_bottom,
    }
}

/// `None` once every cell is dead.
pub fn trimmed_bounds(swarm: &AlienSwarm) -> Option<TrimmedBounds> {
    let edges = find_empty_rows_and_columns(swarm);
    if edges.cols_left >= swarm.cols {
        return None;
    }

    let first_col = edges.cols_left;
    let last_col = swarm.cols - 1 - edges.cols_right;
    let columns = (last_col - first_col + 1) as i32;
    let width = swarm.sprite_size.width;
    let left = swarm.position.x + first_col as i32 * (width + ALIENS_X_PADDING);
    let right = left + columns * width + (columns - 1) * ALIENS_X_PADDING;

    Some(TrimmedBounds {
        first_col,
        last_col,
        left,
        right,
    })
}

/// Columns inside `bounds` that still hold at least one living alien.
pub fn active_columns(swarm: &AlienSwarm, bounds: &TrimmedBounds) -> Vec<usize> {
    (bounds.first_col..=bounds.last_col)
        .filter(|&col| {
            (0..swarm.rows).any(|row| swarm.cell(row, col) == Some(AlienState::Alive))
        })
        .collect()
}

// ── Hits and explosions ──────────────────────────────────────────────────────

/// Living alien whose box contains `projectile`, as (row, col).
pub fn alien_hit_test(swarm: &AlienSwarm, projectile: Option<Position>) -> Option<(usize, usize)> {
    let projectile = projectile?;
    (0..swarm.rows)
        .flat_map(|row| (0..swarm.cols).map(move |col| (row, col)))
        .find(|&(row, col)| {
            swarm.cell(row, col) == Some(AlienState::Alive)
                && is_collision(projectile, alien_position(swarm, row, col), swarm.sprite_size)
        })
}

/// Start the alien at (`row`, `col`) exploding and return its points.
///
/// The shared explosion timer only starts if it is idle, so aliens hit
/// while an explosion is running all clear together. Returns 0 for cells
/// outside the grid or not alive.
pub fn resolve_alien_hit(
    swarm: &mut AlienSwarm,
    row: usize,
    col: usize,
    config: &GameConfig,
) -> u32 {
    match swarm.cell_mut(row, col) {
        Some(cell) if *cell == AlienState::Alive => *cell = AlienState::Exploding,
        _ => return 0,
    }
    swarm.aliens_left = swarm.aliens_left.saturating_sub(1);
    if swarm.explosion_timer.is_none() {
        swarm.explosion_timer = Some(config.explosion_time);
    }
    config.points_for_row(row)
}

/// Count the explosion down; when it runs out every exploding cell dies.
pub fn update_explosions(swarm: &mut AlienSwarm) {
    if let Some(timer) = swarm.explosion_timer {
        swarm.explosion_timer = timer.checked_sub(1);
    }
    if swarm.explosion_timer.is_none() {
        for cell in swarm.cells.iter_mut() {
            if *cell == AlienState::Exploding {
                *cell = AlienState::Dead;
            }
        }
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Advance the formation by one tick.
///
/// A due step becomes a down-step (with a direction flip) when the leading
/// edge has reached a wall. Ticks without a sideways step may drop bombs.
pub fn update_aliens(
    swarm: &mut AlienSwarm,
    window: Size,
    shields: &mut [Shield],
    rng: &mut impl Rng,
) -> SwarmOutcome {
    update_explosions(swarm);

    swarm.movement_time -= 1;
    let mut move_horizontal = swarm.movement_time <= 0;
    let bounds = trimmed_bounds(swarm);

    if move_horizontal {
        let at_wall = bounds.map_or(false, |b| {
            (b.right >= window.width && swarm.direction > 0) || (b.left <= 0 && swarm.direction < 0)
        });
        if at_wall {
            if swarm.line == 0 {
                return SwarmOutcome::ReachedPlayerRow;
            }
            move_horizontal = false;
            swarm.position.y += 1;
            swarm.line -= 1;
            swarm.direction = -swarm.direction;
            reset_movement_time(swarm);
            erode_under_swarm(swarm, shields);
            debug!(
                "swarm stepped down, {} lines left, {} empty rows at the bottom",
                swarm.line,
                find_empty_rows_and_columns(swarm).rows_bottom
            );
        }
    }

    if move_horizontal {
        swarm.position.x += swarm.direction;
        reset_movement_time(swarm);
        swarm.animation = 1 - swarm.animation;
        erode_under_swarm(swarm, shields);
    } else if let Some(bounds) = bounds {
        drop_bombs(swarm, &bounds, rng);
    }

    SwarmOutcome::Continue
}

/// Living aliens chew through any cover they overlap.
fn erode_under_swarm(swarm: &AlienSwarm, shields: &mut [Shield]) {
    for row in 0..swarm.rows {
        for col in 0..swarm.cols {
            if swarm.cell(row, col) == Some(AlienState::Alive) {
                erode_shields(shields, alien_position(swarm, row, col), swarm.sprite_size);
            }
        }
    }
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

/// One roll per tick. The fewer aliens remain, the likelier a volley.
pub fn should_shoot_bomb(swarm: &AlienSwarm, rng: &mut impl Rng) -> bool {
    let crowding = (swarm.total_aliens() / (swarm.aliens_left + 1)) as i64;
    let modulus = (BOMB_CHANCE_BASE - crowding).max(MIN_BOMB_MODULUS);
    rng.gen_range(0..modulus) == 0
}

fn drop_bombs(swarm: &mut AlienSwarm, bounds: &TrimmedBounds, rng: &mut impl Rng) {
    let columns = active_columns(swarm, bounds);
    if !should_shoot_bomb(swarm, rng) || columns.is_empty() {
        return;
    }

    let shots = rng.gen_range(1..=MAX_VOLLEY) - swarm.bombs_in_play as i32;
    for _ in 0..shots.max(0) {
        let col = columns[rng.gen_range(0..columns.len())];
        shoot_bomb(swarm, col);
    }
}

/// Drop a bomb from the lowest living alien in `col` into the first free
/// pool slot. Returns `false` when the pool is full or the column is empty.
pub fn shoot_bomb(swarm: &mut AlienSwarm, col: usize) -> bool {
    let Some(slot) = swarm.bombs.iter().position(|bomb| bomb.position.is_none()) else {
        debug!("bomb pool full, dropping shot from column {col}");
        return false;
    };
    let Some(row) = (0..swarm.rows)
        .rev()
        .find(|&row| swarm.cell(row, col) == Some(AlienState::Alive))
    else {
        return false;
    };

    let origin = alien_position(swarm, row, col);
    swarm.bombs[slot] = AlienBomb {
        position: Some(Position::new(origin.x + 1, origin.y + swarm.sprite_size.height)),
        animation: 0,
    };
    swarm.bombs_in_play += 1;
    true
}

fn clear_bomb(swarm: &mut AlienSwarm, slot: usize) {
    if let Some(bomb) = swarm.bombs.get_mut(slot) {
        if bomb.position.take().is_some() {
            swarm.bombs_in_play = swarm.bombs_in_play.saturating_sub(1);
        }
        bomb.animation = 0;
    }
}

/// Empty the whole pool, e.g. when the player respawns.
pub fn clear_bombs(swarm: &mut AlienSwarm) {
    for slot in 0..swarm.bombs.len() {
        clear_bomb(swarm, slot);
    }
}

/// Move every bomb in play one step and resolve what it lands on:
/// cover first, then the player, then the floor.
///
/// Stops at the first bomb that hits the player.
pub fn update_bombs(
    swarm: &mut AlienSwarm,
    window: Size,
    player: &Player,
    shields: &mut [Shield],
) -> BombOutcome {
    for slot in 0..swarm.bombs.len() {
        let Some(current) = swarm.bombs[slot].position else {
            continue;
        };
        let next = Position::new(current.x, current.y + ALIEN_BOMB_SPEED);
        let bomb = &mut swarm.bombs[slot];
        bomb.position = Some(next);
        bomb.animation = (bomb.animation + 1) % ALIEN_BOMB_GLYPHS.len();

        if let Some(hit) = shield_hit_test(shields, Some(next)) {
            clear_bomb(swarm, slot);
            resolve_shield_hit(shields, hit);
        } else if is_collision(next, player.position, player.sprite_size) {
            clear_bomb(swarm, slot);
            return BombOutcome::PlayerHit;
        } else if next.y >= window.height {
            clear_bomb(swarm, slot);
        }
    }
    BombOutcome::Clear
}
