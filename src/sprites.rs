//! Glyph art and the sprite sizes derived from it.
//!
//! Multi-frame sprites stack their frames vertically: frame `n` of a sprite
//! with height `h` is rows `n * h .. (n + 1) * h`.

use crate::entities::Size;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SPRITE: &[&str] = &[" /A\\ ", "|/V\\|"];

/// Two frames of two rows each.
pub const PLAYER_EXPLOSION_SPRITE: &[&str] = &[" |@/.", ".`//-", "`_~; ", "_~`\"."];

pub const PLAYER_MISSILE_GLYPH: char = '!';

pub const PLAYER_SIZE: Size = Size { width: 5, height: 2 };

// ── Shields ───────────────────────────────────────────────────────────────────

pub const SHIELD_SPRITE: &[&str] = &["/IIIII\\", "IIIIIII", "I/   \\I"];

pub const SHIELD_SIZE: Size = Size { width: 7, height: 3 };

/// A shield cell holding this byte has been destroyed.
pub const BLANK_CELL: u8 = b' ';

// ── Aliens ────────────────────────────────────────────────────────────────────

pub const ALIEN30_SPRITE: &[&str] = &["/oO\\", "/\"\"\\", "/Oo\\", "<''>"];
pub const ALIEN20_SPRITE: &[&str] = &[" >< ", "|\\/|", "|><|", "/  \\"];
pub const ALIEN10_SPRITE: &[&str] = &["/--\\", "/  \\", "/--\\", "<  >"];

/// One sprite per score band, most valuable first. Bands past the end of
/// this table reuse the last sprite.
pub const ALIEN_BAND_SPRITES: &[&[&str]] = &[ALIEN30_SPRITE, ALIEN20_SPRITE, ALIEN10_SPRITE];

pub const ALIEN_EXPLOSION_SPRITE: &[&str] = &["\\||/", "/|\\*"];

pub const ALIEN_SIZE: Size = Size { width: 4, height: 2 };

/// Gap between neighbouring aliens in the formation.
pub const ALIENS_X_PADDING: i32 = 1;
pub const ALIENS_Y_PADDING: i32 = 1;

pub const ALIEN_BOMB_GLYPHS: [char; 4] = ['\\', '|', '/', '-'];
