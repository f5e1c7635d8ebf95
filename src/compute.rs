/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `EntireGameStateInfo` (and, where needed, an RNG handle and the word bank)
/// and returns a brand-new `EntireGameStateInfo`.  Side effects are limited
/// to the injected RNG and tracing events.

use rand::Rng;
use tracing::info;

use crate::config::Rules;
use crate::entities::{
    EntireGameStateInfo, FrameInput, GameStatus, Key, LaserOutcome, Player,
};
use crate::input::route_key;
use crate::spawner::spawn_wave;
use crate::words::WordBank;

// ── Constructors ─────────────────────────────────────────────────────────────

fn start_position(rules: &Rules) -> Player {
    Player {
        x: rules.width / 2.0,
        y: rules.height - rules.player_offset,
    }
}

/// A fresh game: player centred, one spawn wave already in the arena.
pub fn init_state(rules: Rules, bank: &WordBank, rng: &mut impl Rng) -> EntireGameStateInfo {
    let empty = EntireGameStateInfo {
        player: start_position(&rules),
        enemies: Vec::new(),
        lasers: Vec::new(),
        locked: None,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        next_enemy_id: 0,
        rules,
    };
    refill(&empty, bank, rng)
}

/// Reset score, arena, lasers, lock and player; keep counting enemy ids.
pub fn restart(state: &EntireGameStateInfo, bank: &WordBank, rng: &mut impl Rng) -> EntireGameStateInfo {
    info!(previous_score = state.score, "restart");
    let reset = EntireGameStateInfo {
        player: start_position(&state.rules),
        enemies: Vec::new(),
        lasers: Vec::new(),
        locked: None,
        score: 0,
        status: GameStatus::Playing,
        ..state.clone()
    };
    refill(&reset, bank, rng)
}

/// Run one spawn wave on top of whatever is alive.
pub fn refill(state: &EntireGameStateInfo, bank: &WordBank, rng: &mut impl Rng) -> EntireGameStateInfo {
    let mut next = state.clone();
    let wave = spawn_wave(
        bank,
        &next.enemies,
        &next.player,
        &next.rules,
        &mut next.next_enemy_id,
        rng,
    );
    next.enemies.extend(wave);
    next
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    let r = &state.rules;
    let new_x = (state.player.x - r.player_speed).max(r.player_half);
    EntireGameStateInfo {
        player: Player { x: new_x, ..state.player.clone() },
        ..state.clone()
    }
}

pub fn move_player_right(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    let r = &state.rules;
    let new_x = (state.player.x + r.player_speed).min(r.width - r.player_half);
    EntireGameStateInfo {
        player: Player { x: new_x, ..state.player.clone() },
        ..state.clone()
    }
}

pub fn pause(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    info!(frame = state.frame, "paused");
    EntireGameStateInfo { status: GameStatus::Paused, ..state.clone() }
}

pub fn resume(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    if state.status != GameStatus::Paused {
        return state.clone();
    }
    info!(frame = state.frame, "resumed");
    EntireGameStateInfo { status: GameStatus::Playing, ..state.clone() }
}

fn terminate(state: &EntireGameStateInfo) -> EntireGameStateInfo {
    info!(score = state.score, "quit");
    EntireGameStateInfo { status: GameStatus::Terminated, ..state.clone() }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &EntireGameStateInfo,
    input: &FrameInput,
    bank: &WordBank,
    rng: &mut impl Rng,
) -> EntireGameStateInfo {
    let mut s = EntireGameStateInfo { frame: state.frame + 1, ..state.clone() };

    if input.keys.contains(&Key::Interrupt) && s.status != GameStatus::Terminated {
        return terminate(&s);
    }

    match s.status {
        GameStatus::Playing => {}
        GameStatus::Paused => {
            for key in &input.keys {
                match key {
                    Key::Char('r') | Key::Char('R') => return resume(&s),
                    Key::Enter => return restart(&s, bank, rng),
                    Key::Char('q') | Key::Char('Q') => return terminate(&s),
                    _ => {}
                }
            }
            return s;
        }
        GameStatus::GameOver => {
            for key in &input.keys {
                match key {
                    Key::Enter => return restart(&s, bank, rng),
                    Key::Char('q') | Key::Char('Q') => return terminate(&s),
                    _ => {}
                }
            }
            return s;
        }
        GameStatus::Terminated => return s,
    }

    // ── 1. Held-direction movement ───────────────────────────────────────────
    if input.left {
        s = move_player_left(&s);
    }
    if input.right {
        s = move_player_right(&s);
    }

    // ── 2. Discrete keys ─────────────────────────────────────────────────────
    for key in &input.keys {
        match *key {
            Key::Escape => return pause(&s),
            Key::Char(c) => s = route_key(&s, c),
            Key::Enter | Key::Interrupt => {}
        }
    }

    // ── 3. Refill an empty arena ─────────────────────────────────────────────
    if s.enemies.is_empty() {
        s = refill(&s, bank, rng);
    }

    // ── 4. Enemies: move, then collide with the player ───────────────────────
    let rules = s.rules;
    for enemy in s.enemies.iter_mut() {
        enemy.update();
        if enemy.check_collision(&s.player, &rules) {
            s.status = GameStatus::GameOver;
            info!(score = s.score, word = %enemy.word, "game over");
            break;
        }
    }

    let (kept, past): (Vec<_>, Vec<_>) = s.enemies.into_iter().partition(|e| !e.is_past(&rules));
    s.enemies = kept;
    if s.locked.is_some_and(|id| past.iter().any(|e| e.id == id)) {
        s.locked = None;
    }

    // ── 5. Lasers: retire on hit or miss ─────────────────────────────────────
    let enemies = &s.enemies;
    s.lasers = s
        .lasers
        .into_iter()
        .filter_map(|mut laser| match laser.update(enemies, &rules) {
            LaserOutcome::InFlight => Some(laser),
            LaserOutcome::Hit | LaserOutcome::Miss => None,
        })
        .collect();

    s
}
