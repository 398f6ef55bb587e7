//! Simulation core for a terminal space-invaders game.
//!
//! `entities` holds the pure data, `compute` the per-frame rules, and
//! `render` the bridge to whatever surface draws the game.

pub mod compute;
pub mod config;
pub mod entities;
pub mod render;
pub mod sprites;
