//! Translates a session into draw calls on an abstract surface. No game
//! logic happens here.

use std::io;

use crate::compute::swarm::alien_position;
use crate::entities::{AlienState, GameState, Session};
use crate::sprites::{
    ALIEN_BAND_SPRITES, ALIEN_BOMB_GLYPHS, ALIEN_EXPLOSION_SPRITE, PLAYER_EXPLOSION_SPRITE,
    PLAYER_MISSILE_GLYPH, PLAYER_SPRITE,
};

/// Something that can show glyphs on the game's integer grid.
///
/// Coordinates may fall outside the visible area; implementations clip.
pub trait Canvas {
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char) -> io::Result<()>;

    /// Draw `frame_height` rows of `frames`, starting at row `frame_offset`.
    fn draw_sprite(
        &mut self,
        x: i32,
        y: i32,
        frames: &[&str],
        frame_height: usize,
        frame_offset: usize,
    ) -> io::Result<()>;
}

/// Draw the play field. Only the states with a live field draw anything.
pub fn draw_game<C: Canvas>(canvas: &mut C, session: &Session) -> io::Result<()> {
    match session.game.state {
        GameState::Play | GameState::Wait | GameState::PlayerDead => {}
        GameState::Intro | GameState::HighScores | GameState::GameOver => return Ok(()),
    }

    draw_player(canvas, session)?;
    draw_shields(canvas, session)?;
    draw_aliens(canvas, session)?;
    draw_bombs(canvas, session)
}

fn draw_player<C: Canvas>(canvas: &mut C, session: &Session) -> io::Result<()> {
    let player = &session.player;
    let height = player.sprite_size.height as usize;
    let (sprite, offset) = if session.game.state == GameState::PlayerDead {
        (PLAYER_EXPLOSION_SPRITE, player.animation * height)
    } else {
        (PLAYER_SPRITE, 0)
    };
    canvas.draw_sprite(player.position.x, player.position.y, sprite, height, offset)?;

    if let Some(missile) = player.missile {
        canvas.draw_glyph(missile.x, missile.y, PLAYER_MISSILE_GLYPH)?;
    }
    Ok(())
}

fn draw_shields<C: Canvas>(canvas: &mut C, session: &Session) -> io::Result<()> {
    for shield in &session.shields {
        let rows: Vec<String> = (0..shield.cells.len()).map(|r| shield.row_text(r)).collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        canvas.draw_sprite(shield.position.x, shield.position.y, &rows, rows.len(), 0)?;
    }
    Ok(())
}

fn draw_aliens<C: Canvas>(canvas: &mut C, session: &Session) -> io::Result<()> {
    let swarm = &session.swarm;
    let height = swarm.sprite_size.height as usize;

    for row in 0..swarm.rows {
        let band = session.config.band_for_row(row).min(ALIEN_BAND_SPRITES.len() - 1);
        for col in 0..swarm.cols {
            let origin = alien_position(swarm, row, col);
            match swarm.cell(row, col) {
                Some(AlienState::Alive) => canvas.draw_sprite(
                    origin.x,
                    origin.y,
                    ALIEN_BAND_SPRITES[band],
                    height,
                    swarm.animation * height,
                )?,
                Some(AlienState::Exploding) => {
                    canvas.draw_sprite(origin.x, origin.y, ALIEN_EXPLOSION_SPRITE, height, 0)?
                }
                Some(AlienState::Dead) | None => {}
            }
        }
    }
    Ok(())
}

fn draw_bombs<C: Canvas>(canvas: &mut C, session: &Session) -> io::Result<()> {
    for bomb in &session.swarm.bombs {
        if let Some(position) = bomb.position {
            let glyph = ALIEN_BOMB_GLYPHS[bomb.animation % ALIEN_BOMB_GLYPHS.len()];
            canvas.draw_glyph(position.x, position.y, glyph)?;
        }
    }
    Ok(())
}
