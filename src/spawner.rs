/// Spawn waves: refill the enemy arena with distinct words placed far enough
/// apart that their labels never overlap.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::Rules;
use crate::entities::{Enemy, EnemyId, Player};
use crate::words::WordBank;

/// Build up to `enemy_cap - alive.len()` new enemies.
///
/// Each slot draws a word that no alive enemy (and no earlier slot) uses, then
/// tries `spawn_attempts` random positions above the field.  A slot whose
/// word finds no clear spot is skipped, so a wave can come up short.
pub fn spawn_wave(
    bank: &WordBank,
    alive: &[Enemy],
    player: &Player,
    rules: &Rules,
    next_id: &mut u64,
    rng: &mut impl Rng,
) -> Vec<Enemy> {
    let taken: HashSet<&str> = alive.iter().map(|e| e.word.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pool: Vec<&str> = Vec::new();
    for word in bank.words() {
        let word = word.as_str();
        if !taken.contains(word) && seen.insert(word) {
            pool.push(word);
        }
    }

    let slots = rules.enemy_cap.saturating_sub(alive.len()).min(pool.len());
    let mut spawned: Vec<Enemy> = Vec::with_capacity(slots);

    for _ in 0..slots {
        let Some(&word) = pool.choose(rng) else {
            break;
        };
        pool.retain(|w| *w != word);

        let width = word.chars().count() as f32 * rules.glyph_width;
        let placed = (0..rules.spawn_attempts).find_map(|_| {
            let x = rng.gen_range(rules.spawn_margin_x..=rules.width as i32 - rules.spawn_margin_x) as f32;
            let y = -rng.gen_range(rules.spawn_band_top..=rules.spawn_band_bottom) as f32;
            let clear = alive.iter().chain(spawned.iter()).all(|other| {
                let needed = width.max(other.footprint(rules.glyph_width)) + rules.min_clearance;
                (x - other.x).hypot(y - other.y) >= needed
            });
            clear.then_some((x, y))
        });

        if let Some((x, y)) = placed {
            let id = EnemyId(*next_id);
            *next_id += 1;
            spawned.push(Enemy::new(id, word, x, y, player, rules.enemy_speed));
        }
    }

    debug!(requested = slots, placed = spawned.len(), "spawn wave");
    spawned
}
