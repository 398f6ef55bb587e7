//! Game-logic functions.
//!
//! The session is owned by a single update pass: every public function here
//! takes it by exclusive reference and mutates it in place. Side effects are
//! limited to the injected RNG.

pub mod collision;
pub mod player;
pub mod shields;
pub mod swarm;

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::config::{ConfigError, GameConfig};
use crate::entities::{BombOutcome, Game, GameState, Input, Session, Signal, Size, SwarmOutcome};
use player::{
    init_player, move_player, player_shoot, reset_player, update_missile, PLAYER_MOVEMENT_AMOUNT,
};
use shields::{init_shields, resolve_shield_hit, shield_hit_test};
use swarm::{
    alien_hit_test, clear_bombs, init_aliens, resolve_alien_hit, update_aliens, update_bombs,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session for a play field of `width` x `height` cells.
///
/// This is the only fallible step: a config that cannot fit the window is
/// rejected here and never reaches the per-frame code.
pub fn init_state(config: GameConfig, width: u16, height: u16) -> Result<Session, ConfigError> {
    let window = Size::new(width as i32, height as i32);
    config.validate(window)?;
    debug!("starting session with {config:?}");

    let level = config.start_level;
    let session = Session {
        game: Game {
            window,
            state: GameState::Play,
            level,
            wait_timer: 0,
        },
        player: init_player(window, config.max_lives),
        shields: init_shields(config.num_shields, window),
        swarm: init_aliens(window, level, &config),
        config,
    };
    info!(
        "session started on a {}x{} field at level {}",
        width, height, session.game.level
    );
    Ok(session)
}

fn status(session: &Session) -> Signal {
    if session.game.state == GameState::GameOver {
        Signal::SessionOver
    } else {
        Signal::Running
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one decoded key press. Quit is reported before anything else is
/// touched.
pub fn handle_input(session: &mut Session, input: Input) -> Signal {
    let state = session.game.state;
    let width = session.game.window.width;

    match input {
        Input::Quit => return Signal::Quit,
        Input::Left if state == GameState::Play => {
            move_player(&mut session.player, -PLAYER_MOVEMENT_AMOUNT, width)
        }
        Input::Right if state == GameState::Play => {
            move_player(&mut session.player, PLAYER_MOVEMENT_AMOUNT, width)
        }
        Input::Fire if state == GameState::Play => player_shoot(&mut session.player),
        Input::Fire if state == GameState::PlayerDead => acknowledge_death(session),
        _ => {}
    }
    status(session)
}

/// Spend a life. Out of lives ends the session; otherwise the player
/// respawns after a short wait with the sky cleared of bombs.
fn acknowledge_death(session: &mut Session) {
    let player = &mut session.player;
    player.lives = player.lives.saturating_sub(1);
    player.animation = 0;

    if player.lives == 0 {
        session.game.state = GameState::GameOver;
        info!("game over with {} points", player.score);
        return;
    }

    session.game.state = GameState::Wait;
    session.game.wait_timer = session.config.wait_time;
    reset_player(player, session.game.window);
    clear_bombs(&mut session.swarm);
    info!("respawning, {} lives left", player.lives);
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(session: &mut Session, rng: &mut impl Rng) -> Signal {
    match session.game.state {
        GameState::Play => update_play(session, rng),
        GameState::PlayerDead => {
            session.player.animation = (session.player.animation + 1) % 2;
        }
        GameState::Wait => {
            session.game.wait_timer = session.game.wait_timer.saturating_sub(1);
            if session.game.wait_timer == 0 {
                session.game.state = GameState::Play;
            }
        }
        GameState::Intro | GameState::HighScores | GameState::GameOver => {}
    }
    status(session)
}

/// Fixed resolution order: missile, missile vs cover, missile vs aliens,
/// bombs, then the formation. A projectile consumed by one test is gone
/// before the next one runs.
fn update_play(session: &mut Session, rng: &mut impl Rng) {
    let Session {
        config,
        game,
        player,
        shields,
        swarm,
    } = session;

    update_missile(player);

    if let Some(hit) = shield_hit_test(shields, player.missile) {
        player.missile = None;
        resolve_shield_hit(shields, hit);
    }

    if let Some((row, col)) = alien_hit_test(swarm, player.missile) {
        player.missile = None;
        let points = resolve_alien_hit(swarm, row, col, config);
        player.score = player.score.saturating_add(points);
    }

    if update_bombs(swarm, game.window, player, shields) == BombOutcome::PlayerHit {
        game.state = GameState::PlayerDead;
        player.animation = 0;
        info!("player hit with {} lives left", player.lives);
        return;
    }

    if update_aliens(swarm, game.window, shields, rng) == SwarmOutcome::ReachedPlayerRow {
        game.state = GameState::GameOver;
        info!("the swarm landed, game over with {} points", player.score);
        return;
    }

    if swarm.aliens_left == 0 && swarm.explosion_timer.is_none() {
        game.level += 1;
        *swarm = init_aliens(game.window, game.level, config);
        player.missile = None;
        info!("wave cleared, starting level {}", game.level);
    }
}

// ── Frame gate ───────────────────────────────────────────────────────────────

/// Lets the simulation advance only once more than one frame interval has
/// passed since the previous tick.
#[derive(Clone, Debug)]
pub struct FrameGate {
    interval: Duration,
    last: Instant,
}

impl FrameGate {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` (and the clock restarts) when a tick is due at `now`.
    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) > self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
