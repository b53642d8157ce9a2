mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};

use river_crossing::compute::{new_game, reduce};
use river_crossing::entities::{Event, GameState};
use river_crossing::settings::Settings;

/// What a key press asks of the loop.
enum Action {
    Play(Event),
    Quit,
    Ignore,
}

/// Translate a raw key into an engine event.
fn action_for(settings: &Settings, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Play(settings.move_up()),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Action::Play(settings.move_down())
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Action::Play(settings.move_left())
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Action::Play(settings.move_right())
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Play(Event::Reset),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::Ignore,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fold key events and clock ticks into the state, strictly in arrival
/// order, redrawing after every tick.
fn game_loop<W: Write>(
    out: &mut W,
    settings: &Settings,
    mut state: GameState,
    rx: &mpsc::Receiver<TermEvent>,
) -> std::io::Result<GameState> {
    let interval = Duration::from_millis(settings.tick_interval_ms);
    let mut frame = None;
    let mut elapsed: u64 = 0;

    loop {
        let tick_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let TermEvent::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            match action_for(settings, code, modifiers) {
                Action::Play(event) => state = reduce(&state, &event),
                Action::Quit => return Ok(state),
                Action::Ignore => {}
            }
        }

        elapsed += 1;
        state = reduce(&state, &Event::Tick { elapsed });

        frame = Some(display::render(out, frame.as_ref(), &state)?);

        let spent = tick_start.elapsed();
        if spent < interval {
            thread::sleep(interval - spent);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::load().context("loading settings")?;
    log::info!("starting with {:?}", settings);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<TermEvent>();
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

    let result = game_loop(&mut out, &settings, new_game(settings.seed), &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = result.context("terminal I/O failed")?;
    println!(
        "Final score {}  High score {}  Level {}",
        state.score,
        state.high_score.max(state.score),
        state.level
    );
    Ok(())
}
