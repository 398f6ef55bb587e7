mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use text_invaders::compute::{handle_input, init_state, tick, FrameGate};
use text_invaders::config::GameConfig;
use text_invaders::entities::{GameState, Input, Session, Signal};

/// How long the loop idles between input polls when no frame is due.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

// ── Command line ──────────────────────────────────────────────────────────────

/// Defend the planet from a descending alien swarm, in your terminal.
#[derive(Parser, Debug)]
#[command(name = "text_invaders", version, about)]
struct Args {
    /// Rows of aliens in each wave.
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Columns of aliens in each wave.
    #[arg(long, default_value_t = 11)]
    cols: usize,

    /// Number of shields.
    #[arg(long, default_value_t = 4)]
    shields: usize,

    /// Most alien bombs in flight at once.
    #[arg(long, default_value_t = 3)]
    bombs: usize,

    /// Lives at the start of a game.
    #[arg(long, default_value_t = 3)]
    lives: u32,

    /// Simulation frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Level to start on.
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Seed for alien fire; omit for a random game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here instead of stderr (stderr is hidden while playing).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            alien_rows: self.rows,
            alien_cols: self.cols,
            num_shields: self.shields,
            max_bombs: self.bombs,
            max_lives: self.lives,
            fps: self.fps,
            start_level: self.level,
            ..GameConfig::default()
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Decode a terminal event into a game input. Key releases are ignored.
fn to_input(event: &Event) -> Option<Input> {
    let Event::Key(KeyEvent {
        code,
        kind,
        modifiers,
        ..
    }) = event
    else {
        return None;
    };
    if *kind == KeyEventKind::Release {
        return None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Input::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Input::Right),
        KeyCode::Char(' ') => Some(Input::Fire),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Input is drained every iteration; the simulation only advances when the
/// frame gate opens.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<LoopExit> {
    let mut gate = FrameGate::new(session.config.frame_interval(), Instant::now());
    log::debug!("ticking every {:?}", gate.interval());
    display::render(out, session)?;

    loop {
        while let Ok(event) = rx.try_recv() {
            let Some(input) = to_input(&event) else {
                continue;
            };
            if session.game.state == GameState::GameOver && input == Input::Fire {
                return Ok(LoopExit::Restart);
            }
            if handle_input(session, input) == Signal::Quit {
                return Ok(LoopExit::Quit);
            }
        }

        if gate.ready(Instant::now()) {
            tick(session, rng);
            display::render(out, session)?;
        } else {
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, args: &Args) -> Result<()> {
    let config = args.game_config();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        let (width, height) = terminal::size().context("failed to query terminal size")?;
        let field_height = height.saturating_sub(display::HUD_ROWS);
        let mut session = init_state(config.clone(), width, field_height)
            .context("cannot start a game in this terminal")?;

        match game_loop(out, &mut session, rx, &mut rng)? {
            LoopExit::Quit => break,
            LoopExit::Restart => log::info!("restarting after game over"),
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &args);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
