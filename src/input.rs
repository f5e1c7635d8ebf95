/// Keystroke routing while playing.
///
/// Only one enemy is "locked" at a time.  While a lock exists every keystroke
/// is checked against that enemy's next character; without a lock the
/// keystroke picks the most advanced enemy whose word starts with it.

use tracing::debug;

use crate::entities::{EnemyId, EntireGameStateInfo, GameStatus, Laser};

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Apply one typed character to the game.  Misses are silently ignored.
pub fn route_key(state: &EntireGameStateInfo, ch: char) -> EntireGameStateInfo {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let key = fold(ch);

    let target = match state.locked_enemy() {
        Some(locked) => {
            match locked.next_char() {
                Some(expected) if fold(expected) == key => locked.id,
                _ => return state.clone(),
            }
        }
        None => match find_new_lock(state, key) {
            Some(id) => id,
            None => return state.clone(),
        },
    };

    advance(state, target)
}

/// The enemy with the greatest `y` whose word starts with `key`.
/// On ties the earliest in the arena wins.
pub fn find_new_lock(state: &EntireGameStateInfo, key: char) -> Option<EnemyId> {
    let mut best: Option<(EnemyId, f32)> = None;
    for enemy in &state.enemies {
        let starts = enemy.word.chars().next().map(fold) == Some(key);
        if !starts {
            continue;
        }
        if best.map_or(true, |(_, y)| enemy.y > y) {
            best = Some((enemy.id, enemy.y));
        }
    }
    best.map(|(id, _)| id)
}

/// Confirm one more character of `target`, fire a laser at it and resolve
/// the kill if the word is now finished.
fn advance(state: &EntireGameStateInfo, target: EnemyId) -> EntireGameStateInfo {
    let mut next = state.clone();
    let rules = next.rules;

    let Some(enemy) = next.enemies.iter_mut().find(|e| e.id == target) else {
        return next;
    };
    enemy.typed += 1;
    next.lasers.push(Laser::new(next.player.x, next.player.y, enemy, rules.laser_speed));

    if next.locked != Some(target) {
        debug!(word = %enemy.word, "lock acquired");
    }

    if enemy.is_complete() {
        let gained = enemy.word_len() as u32 * rules.points_per_char;
        debug!(word = %enemy.word, gained, "word completed");
        next.enemies.retain(|e| e.id != target);
        next.score += gained;
        next.locked = None;
    } else {
        next.locked = Some(target);
    }
    next
}
