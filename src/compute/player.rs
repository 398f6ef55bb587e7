//! Player movement and the single-missile rule.

use crate::entities::{Player, Position, Size};
use crate::sprites::PLAYER_SIZE;

/// Columns moved per Left/Right input.
pub const PLAYER_MOVEMENT_AMOUNT: i32 = 1;

/// Rows the missile climbs per tick.
pub const PLAYER_MISSILE_SPEED: i32 = 1;

pub fn init_player(window: Size, max_lives: u32) -> Player {
    let mut player = Player {
        position: Position::default(),
        sprite_size: PLAYER_SIZE,
        missile: None,
        animation: 0,
        lives: max_lives,
        score: 0,
    };
    reset_player(&mut player, window);
    player
}

/// Centre the player on the bottom row and drop any missile in flight.
pub fn reset_player(player: &mut Player, window: Size) {
    player.position = Position::new(
        window.width / 2 - player.sprite_size.width / 2,
        window.height - player.sprite_size.height - 1,
    );
    player.animation = 0;
    player.missile = None;
}

/// Shift the player by `dx`, clamped to `[0, window_width - sprite_width]`.
pub fn move_player(player: &mut Player, dx: i32, window_width: i32) {
    let max_x = (window_width - player.sprite_size.width).max(0);
    player.position.x = player.position.x.saturating_add(dx).clamp(0, max_x);
}

/// Fire from the centre of the sprite, one row above it. Ignored while a
/// missile is already in flight.
pub fn player_shoot(player: &mut Player) {
    if player.missile.is_some() {
        return;
    }
    player.missile = Some(Position::new(
        player.position.x + player.sprite_size.width / 2,
        player.position.y - 1,
    ));
}

pub fn update_missile(player: &mut Player) {
    if let Some(missile) = player.missile {
        let y = missile.y - PLAYER_MISSILE_SPEED;
        player.missile = (y >= 0).then_some(Position::new(missile.x, y));
    }
}
