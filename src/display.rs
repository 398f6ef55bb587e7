//! Rendering layer — all terminal I/O lives here.
//!
//! The play field is drawn through `TerminalCanvas`, which maps the core's
//! grid onto the terminal below a one-row HUD and clips anything off
//! screen. HUD and overlays are drawn directly.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use text_invaders::entities::{GameState, Session};
use text_invaders::render::{draw_game, Canvas};

/// Terminal rows reserved above the play field.
pub const HUD_ROWS: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FIELD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_BANNER: Color = Color::Cyan;

// ── Canvas ────────────────────────────────────────────────────────────────────

struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    width: i32,
    height: i32,
}

impl<W: Write> TerminalCanvas<'_, W> {
    fn draw_row(&mut self, x: i32, y: i32, text: &str) -> std::io::Result<()> {
        if y < 0 || y >= self.height {
            return Ok(());
        }
        let chars: Vec<char> = text.chars().collect();
        let start = (-x).max(0) as usize;
        let end = (self.width - x).clamp(0, chars.len() as i32) as usize;
        if start >= end {
            return Ok(());
        }
        let visible: String = chars[start..end].iter().collect();
        self.out
            .queue(cursor::MoveTo((x + start as i32) as u16, y as u16 + HUD_ROWS))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char) -> std::io::Result<()> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(x as u16, y as u16 + HUD_ROWS))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        x: i32,
        y: i32,
        frames: &[&str],
        frame_height: usize,
        frame_offset: usize,
    ) -> std::io::Result<()> {
        for (i, row) in frames.iter().skip(frame_offset).take(frame_height).enumerate() {
            self.draw_row(x, y + i as i32, row)?;
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, session)?;

    out.queue(style::SetForegroundColor(C_FIELD))?;
    let mut canvas = TerminalCanvas {
        out: &mut *out,
        width: session.game.window.width,
        height: session.game.window.height,
    };
    draw_game(&mut canvas, session)?;

    match session.game.state {
        GameState::PlayerDead => draw_banner(out, session, "HIT!  SPACE - Continue")?,
        GameState::Wait => draw_banner(out, session, "GET READY")?,
        GameState::GameOver => draw_game_over(out, session)?,
        _ => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let width = session.game.window.width.max(0) as u16;

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", session.player.score)))?;

    // Level — centre
    let level_str = format!("[ LEVEL {} ]", session.game.level);
    let lx = (width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Lives — right
    let lives_str = format!("Lives:{}", "♥".repeat(session.player.lives as usize));
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    session: &Session,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let cx = (session.game.window.width.max(0) as u16) / 2;
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, session: &Session, text: &str) -> std::io::Result<()> {
    let row = (session.game.window.height.max(0) as u16) / 2 + HUD_ROWS;
    draw_centered(out, session, row, text, C_BANNER)
}

fn draw_game_over<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!("Final Score: {:>6}", session.player.score);
    let level_line = format!("Reached level {}", session.game.level);
    let hint = "SPACE - Play Again  Q - Quit";

    let total_rows = lines.len() as u16 + 3;
    let start_row = (session.game.window.height.max(0) as u16 / 2).saturating_sub(total_rows / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, session, start_row + i as u16, msg, *color)?;
    }
    let row = start_row + lines.len() as u16;
    draw_centered(out, session, row, &score_line, Color::Yellow)?;
    draw_centered(out, session, row + 1, &level_line, Color::DarkGrey)?;
    draw_centered(out, session, row + 2, hint, Color::White)?;

    Ok(())
}
