//! Tunable rules and dimensions, checked once before a session starts.

use std::time::Duration;

use thiserror::Error;

use crate::entities::Size;
use crate::sprites::{ALIENS_X_PADDING, ALIEN_SIZE, PLAYER_SIZE, SHIELD_SIZE};

/// Alien rows from `first_row` down to the next band's `first_row` are
/// worth `points` each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreBand {
    pub first_row: usize,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub alien_rows: usize,
    pub alien_cols: usize,
    pub max_bombs: usize,
    pub num_shields: usize,
    pub max_lives: u32,
    pub fps: u32,
    /// Lines of descent available on level 1. Each later level starts one
    /// line closer to the player.
    pub descent_lines: u32,
    /// Ticks an explosion stays on screen.
    pub explosion_time: u32,
    /// Ticks spent in the `Wait` state after a respawn.
    pub wait_time: u32,
    pub start_level: u32,
    /// Ordered by `first_row`, starting at row 0.
    pub score_bands: Vec<ScoreBand>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            alien_rows: 5,
            alien_cols: 11,
            max_bombs: 3,
            num_shields: 4,
            max_lives: 3,
            fps: 30,
            descent_lines: 11,
            explosion_time: 4,
            wait_time: 10,
            start_level: 1,
            score_bands: vec![
                ScoreBand { first_row: 0, points: 30 },
                ScoreBand { first_row: 1, points: 20 },
                ScoreBand { first_row: 3, points: 10 },
            ],
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alien grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("bomb pool must hold at least one bomb")]
    NoBombs,
    #[error("frame rate must be at least 1")]
    ZeroFps,
    #[error("player must start with at least one life")]
    NoLives,
    #[error("start level must be at least 1")]
    ZeroLevel,
    #[error("score table is empty")]
    EmptyScoreTable,
    #[error("score table must start at row 0 with strictly increasing rows")]
    UnorderedScoreTable,
    #[error("{count} shields of width {shield_width} do not fit in {width} columns")]
    ShieldsDoNotFit {
        count: usize,
        shield_width: i32,
        width: i32,
    },
    #[error("window is {width}x{height}, need at least {min_width}x{min_height}")]
    WindowTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
}

impl GameConfig {
    /// Rejects configurations the simulation cannot run with. Everything
    /// past this point assumes a valid config.
    pub fn validate(&self, window: Size) -> Result<(), ConfigError> {
        if self.alien_rows == 0 || self.alien_cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.alien_rows,
                cols: self.alien_cols,
            });
        }
        if self.max_bombs == 0 {
            return Err(ConfigError::NoBombs);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.max_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.start_level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        match self.score_bands.first() {
            None => return Err(ConfigError::EmptyScoreTable),
            Some(band) if band.first_row != 0 => return Err(ConfigError::UnorderedScoreTable),
            Some(_) => {}
        }
        if self
            .score_bands
            .windows(2)
            .any(|pair| pair[0].first_row >= pair[1].first_row)
        {
            return Err(ConfigError::UnorderedScoreTable);
        }

        let shields_width = self.num_shields as i32 * SHIELD_SIZE.width;
        if shields_width > window.width {
            return Err(ConfigError::ShieldsDoNotFit {
                count: self.num_shields,
                shield_width: SHIELD_SIZE.width,
                width: window.width,
            });
        }

        // The formation must fit between the walls, and the shield row must
        // sit on screen above the player.
        let min_width = (self.alien_cols as i32 * (ALIEN_SIZE.width + ALIENS_X_PADDING))
            .max(PLAYER_SIZE.width);
        let min_height = PLAYER_SIZE.height + 1 + SHIELD_SIZE.height + 2;
        if window.width < min_width || window.height < min_height {
            return Err(ConfigError::WindowTooSmall {
                width: window.width,
                height: window.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }

    /// Index into `score_bands` for an alien row.
    pub fn band_for_row(&self, row: usize) -> usize {
        self.score_bands
            .iter()
            .rposition(|band| band.first_row <= row)
            .unwrap_or(0)
    }

    pub fn points_for_row(&self, row: usize) -> u32 {
        self.score_bands
            .get(self.band_for_row(row))
            .map_or(0, |band| band.points)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Lines of descent for a given level, never below zero.
    pub fn lines_for_level(&self, level: u32) -> u32 {
        self.descent_lines.saturating_sub(level.saturating_sub(1))
    }
}
