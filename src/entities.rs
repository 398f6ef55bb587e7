//! All game entity types — pure data, plus a few read-only accessors.

use crate::config::GameConfig;
use crate::sprites::BLANK_CELL;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A cell on the shared integer grid. Negative values are legal: the swarm
/// may start partly above the visible area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ── Session state machine ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Intro,
    HighScores,
    Play,
    PlayerDead,
    Wait,
    GameOver,
}

/// An abstract key press, already decoded by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Left,
    Right,
    /// Shoots while playing, acknowledges a death otherwise.
    Fire,
}

/// What the front end should do after feeding the core an input or a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Running,
    Quit,
    SessionOver,
}

/// Result of moving the bomb pool for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombOutcome {
    Clear,
    PlayerHit,
}

/// Result of advancing the swarm for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwarmOutcome {
    Continue,
    /// The formation is at a wall with no lines of descent left.
    ReachedPlayerRow,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Position,
    pub sprite_size: Size,
    /// `None` while no missile is in flight.
    pub missile: Option<Position>,
    pub animation: usize,
    pub lives: u32,
    pub score: u32,
}

// ── Shields ───────────────────────────────────────────────────────────────────

/// Destructible cover. Each row is an owned byte buffer; a cell equal to
/// `BLANK_CELL` is destroyed and never comes back.
#[derive(Clone, Debug)]
pub struct Shield {
    pub position: Position,
    pub cells: Vec<Vec<u8>>,
}

impl Shield {
    pub fn size(&self) -> Size {
        let width = self.cells.first().map_or(0, Vec::len);
        Size::new(width as i32, self.cells.len() as i32)
    }

    /// Whether the cell at a shield-local offset is still standing.
    /// Offsets outside the grid are never solid.
    pub fn is_solid(&self, local: Position) -> bool {
        if local.x < 0 || local.y < 0 {
            return false;
        }
        self.cells
            .get(local.y as usize)
            .and_then(|row| row.get(local.x as usize))
            .map_or(false, |&cell| cell != BLANK_CELL)
    }

    pub fn solid_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != BLANK_CELL)
            .count()
    }

    /// Row `row` as text, for drawing.
    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().map(|&b| b as char).collect())
            .unwrap_or_default()
    }
}

// ── Swarm ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienState {
    Alive,
    Exploding,
    Dead,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlienBomb {
    /// `None` while this pool slot is free.
    pub position: Option<Position>,
    pub animation: usize,
}

#[derive(Clone, Debug)]
pub struct AlienSwarm {
    /// Top-left corner of cell (0, 0).
    pub position: Position,
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries.
    pub cells: Vec<AlienState>,
    /// Fixed-capacity pool; its length never changes after creation.
    pub bombs: Vec<AlienBomb>,
    pub sprite_size: Size,
    pub animation: usize,
    /// +1 moving right, -1 moving left.
    pub direction: i32,
    pub bombs_in_play: usize,
    /// Ticks until the next step; a step is due once this reaches zero.
    pub movement_time: i32,
    /// Shared by every exploding cell. `None` while no explosion runs.
    pub explosion_timer: Option<u32>,
    pub aliens_left: usize,
    /// Downward steps left before the formation reaches the player's row.
    pub line: u32,
}

impl AlienSwarm {
    pub fn total_aliens(&self) -> usize {
        self.rows * self.cols
    }

    /// State of a cell, or `None` when the indices fall outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<AlienState> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut AlienState> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn bomb_capacity(&self) -> usize {
        self.bombs.len()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Game {
    pub window: Size,
    pub state: GameState,
    pub level: u32,
    /// Ticks left in the `Wait` state.
    pub wait_timer: u32,
}

/// Everything one update pass owns. The renderer only ever sees a shared
/// borrow of this after a tick has completed.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub game: Game,
    pub player: Player,
    pub shields: Vec<Shield>,
    pub swarm: AlienSwarm,
}
