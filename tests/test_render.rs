use std::io;

use text_invaders::compute::init_state;
use text_invaders::config::GameConfig;
use text_invaders::entities::*;
use text_invaders::render::{draw_game, Canvas};
use text_invaders::sprites::*;

#[derive(Debug, Clone, PartialEq)]
struct SpriteCall {
    x: i32,
    y: i32,
    rows: Vec<String>,
    height: usize,
    offset: usize,
}

/// Records every draw call instead of showing anything.
#[derive(Default)]
struct RecordingCanvas {
    glyphs: Vec<(i32, i32, char)>,
    sprites: Vec<SpriteCall>,
}

impl Canvas for RecordingCanvas {
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char) -> io::Result<()> {
        self.glyphs.push((x, y, glyph));
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        x: i32,
        y: i32,
        frames: &[&str],
        frame_height: usize,
        frame_offset: usize,
    ) -> io::Result<()> {
        self.sprites.push(SpriteCall {
            x,
            y,
            rows: frames.iter().map(|row| row.to_string()).collect(),
            height: frame_height,
            offset: frame_offset,
        });
        Ok(())
    }
}

fn make_session() -> Session {
    init_state(GameConfig::default(), 80, 40).unwrap()
}

fn record(session: &Session) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::default();
    draw_game(&mut canvas, session).unwrap();
    canvas
}

fn rows_of(sprite: &[&str]) -> Vec<String> {
    sprite.iter().map(|row| row.to_string()).collect()
}

#[test]
fn fresh_session_draws_player_shields_and_swarm() {
    let canvas = record(&make_session());
    assert_eq!(canvas.sprites.len(), 1 + 4 + 55);
    assert!(canvas.glyphs.is_empty());

    let player = &canvas.sprites[0];
    assert_eq!((player.x, player.y), (38, 37));
    assert_eq!(player.rows, rows_of(PLAYER_SPRITE));
    assert_eq!(player.offset, 0);

    let shield = &canvas.sprites[1];
    assert_eq!((shield.x, shield.y), (11, 32));
    assert_eq!(shield.rows, rows_of(SHIELD_SPRITE));
}

#[test]
fn alien_rows_use_their_band_sprite() {
    let canvas = record(&make_session());
    let aliens = &canvas.sprites[5..];

    assert_eq!((aliens[0].x, aliens[0].y), (12, 13));
    assert_eq!(aliens[0].rows, rows_of(ALIEN30_SPRITE));
    assert_eq!(aliens[11].rows, rows_of(ALIEN20_SPRITE));
    assert_eq!(aliens[22].rows, rows_of(ALIEN20_SPRITE));
    assert_eq!(aliens[33].rows, rows_of(ALIEN10_SPRITE));
    assert_eq!(aliens[54].rows, rows_of(ALIEN10_SPRITE));
}

#[test]
fn swarm_animation_selects_second_frame() {
    let mut s = make_session();
    s.swarm.animation = 1;
    let canvas = record(&s);
    assert!(canvas.sprites[5..].iter().all(|call| call.offset == 2 && call.height == 2));
}

#[test]
fn exploding_and_dead_aliens() {
    let mut s = make_session();
    *s.swarm.cell_mut(0, 0).unwrap() = AlienState::Exploding;
    *s.swarm.cell_mut(0, 1).unwrap() = AlienState::Dead;
    let canvas = record(&s);

    assert_eq!(canvas.sprites.len(), 59);
    assert_eq!(canvas.sprites[5].rows, rows_of(ALIEN_EXPLOSION_SPRITE));
    // Column 1 is skipped, so the next call is column 2.
    assert_eq!(canvas.sprites[6].x, 22);
}

#[test]
fn missile_and_bombs_are_glyphs() {
    let mut s = make_session();
    s.player.missile = Some(Position::new(40, 20));
    s.swarm.bombs[1] = AlienBomb {
        position: Some(Position::new(7, 30)),
        animation: 2,
    };
    let canvas = record(&s);

    assert_eq!(
        canvas.glyphs,
        vec![(40, 20, PLAYER_MISSILE_GLYPH), (7, 30, ALIEN_BOMB_GLYPHS[2])]
    );
}

#[test]
fn dead_player_shows_explosion_frame() {
    let mut s = make_session();
    s.game.state = GameState::PlayerDead;
    s.player.animation = 1;
    let canvas = record(&s);

    let player = &canvas.sprites[0];
    assert_eq!(player.rows, rows_of(PLAYER_EXPLOSION_SPRITE));
    assert_eq!(player.offset, 2);
}

#[test]
fn wait_still_draws_the_field() {
    let mut s = make_session();
    s.game.state = GameState::Wait;
    assert_eq!(record(&s).sprites.len(), 60);
}

#[test]
fn game_over_draws_nothing() {
    let mut s = make_session();
    s.game.state = GameState::GameOver;
    let canvas = record(&s);
    assert!(canvas.sprites.is_empty());
    assert!(canvas.glyphs.is_empty());
}
