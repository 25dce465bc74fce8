mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use slay_the_dragon::compute::{init_session, restart, start, tick, tick_interval};
use slay_the_dragon::entities::{Direction, MoveIntent, Session};
use slay_the_dragon::summary::{append_record, read_records};
use slay_the_dragon::{GameConfig, GameError};

#[derive(Parser, Debug)]
#[command(name = "slay-the-dragon")]
#[command(about = "Dodge the dragon's fireballs and strike it until it falls")]
struct Args {
    /// Cells per side of the board
    #[arg(long)]
    size: Option<i32>,

    /// Starting HP of the dragon
    #[arg(long)]
    boss_hp: Option<u32>,

    /// Score at the start of each game
    #[arg(long)]
    initial_score: Option<i64>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Append a JSON line of statistics here after every game
    #[arg(long)]
    stats_file: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default `info`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> anyhow::Result<GameConfig> {
        let mut config = GameConfig::default();
        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(hp) = self.boss_hp {
            config.boss_hp = hp;
        }
        if let Some(score) = self.initial_score {
            config.initial_score = score;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

// ── Best score from the statistics file ───────────────────────────────────────

fn best_recorded_score(stats_file: Option<&Path>) -> Option<i64> {
    let path = stats_file?;
    match read_records(path) {
        Ok(records) => records.iter().map(|r| r.score).max(),
        Err(GameError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(%err, path = %path.display(), "could not read session statistics");
            None
        }
    }
}

// ── Intro ─────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_intro<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    state: &Session,
    best_score: Option<i64>,
) -> anyhow::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "~  SLAY  THE  DRAGON  ~";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkYellow))?;
    out.queue(Print(title))?;

    let mut lines: Vec<(String, Color)> = vec![
        (
            format!("The dragon has {} HP. Step on it to strike.", state.boss.hp),
            Color::White,
        ),
        ("It breathes fire harder as it weakens.".to_string(), Color::Red),
        ("Green <> grants a few seconds of invincibility.".to_string(), Color::Green),
        ("Arrows / WASD : Move   Q : Quit".to_string(), Color::DarkGrey),
        ("ENTER / SPACE : Start".to_string(), Color::Cyan),
    ];
    if let Some(best) = best_score {
        lines.push((format!("Best recorded score: {best}"), Color::Yellow));
    }
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) if kind != KeyEventKind::Release => {
                match code {
                    KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(MenuResult::Quit);
                    }
                    _ => {}
                }
            }
            Ok(_) => {}
            // Input thread is gone
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. The last direction key seen during a frame
/// becomes that tick's move; the frame then sleeps to the session's tick
/// interval, which shortens while the player is invincible.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
    stats_file: Option<&Path>,
) -> anyhow::Result<()> {
    let mut recorded = false;

    loop {
        let frame_start = Instant::now();
        let mut intent = MoveIntent::NONE;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') if state.phase.is_game_over() => {
                    *state = restart(state, Instant::now(), rng)?;
                    recorded = false;
                }
                other => {
                    if let Some(direction) = direction_for(other) {
                        intent = direction.into();
                    }
                }
            }
        }

        let now = Instant::now();
        *state = tick(state, intent, now, rng);

        if state.phase.is_game_over() && !recorded {
            recorded = true;
            if let (Some(path), Some(summary)) = (stats_file, state.summary(now)) {
                if let Err(err) = append_record(path, &summary) {
                    warn!(%err, path = %path.display(), "could not record session summary");
                }
            }
        }

        display::render(out, state)?;

        let period = tick_interval(state);
        let elapsed = frame_start.elapsed();
        if elapsed < period {
            thread::sleep(period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let config = args.config()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(?config, seed = ?args.seed, "configuration loaded");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events where the terminal supports it.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads happen on their own thread so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config, &mut rng, args.stats_file.as_deref());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
    stats_file: Option<&Path>,
) -> anyhow::Result<()> {
    let intro = init_session(config, rng);
    match show_intro(out, rx, &intro, best_recorded_score(stats_file))? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start => {
            let mut state = start(&intro, Instant::now())?;
            game_loop(out, &mut state, rx, rng, stats_file)
        }
    }
}
