mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use display::Viewport;
use typing_shooter::compute::{init_state, tick};
use typing_shooter::config::{GameConfig, Rules};
use typing_shooter::entities::{FrameInput, GameStatus};
use typing_shooter::keymap::to_key;
use typing_shooter::words::WordBank;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A direction key counts as "held" if its last press/repeat event arrived
/// within this long.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so the window is refreshed before it
/// expires while the key is down.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

fn hold_window_frames(fps: u32) -> u64 {
    (HOLD_WINDOW.as_secs_f64() * fps as f64).ceil().max(1.0) as u64
}

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Typed characters are acted on once per press.  The arrow keys are
/// continuous: a `key_frame` map records the frame of the last press/repeat
/// for each, and every frame the keys that are still fresh become the
/// `left`/`right` flags of the frame's input.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    bank: &WordBank,
    rules: Rules,
) -> std::io::Result<u32> {
    let mut rng = thread_rng();
    let mut state = init_state(rules, bank, &mut rng);

    let frame_time = Duration::from_secs_f64(1.0 / rules.fps.max(1) as f64);
    let window = hold_window_frames(rules.fps);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut best: u32 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::default();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if matches!(code, KeyCode::Left | KeyCode::Right) {
                        key_frame.insert(code, frame);
                    } else if let Some(key) = to_key(code, modifiers) {
                        input.keys.push(key);
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }
        input.left = is_held(&key_frame, &KeyCode::Left, frame, window);
        input.right = is_held(&key_frame, &KeyCode::Right, frame, window);

        state = tick(&state, &input, bank, &mut rng);
        best = best.max(state.score);

        if state.status == GameStatus::Terminated {
            return Ok(best);
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &state, Viewport { cols, rows })?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the renderer, so tracing output goes to a file.
fn init_tracing(log_file: Option<&Path>) {
    let Some(path) = log_file else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = GameConfig::from_env().context("failed to load configuration")?;
    init_tracing(config.log_file.as_deref());

    let bank = WordBank::load(&config.word_list)
        .with_context(|| format!("failed to load word list {}", config.word_list.display()))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    tracing::info!(fps = config.rules.fps, cap = config.rules.enemy_cap, "game starting");
    let result = game_loop(&mut out, &rx, &bank, config.rules);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let best = result.context("terminal I/O failed")?;
    println!("Thanks for playing! Best score: {}", best);
    Ok(())
}
