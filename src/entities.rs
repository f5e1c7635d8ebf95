/// All game entity types, plus the small amount of geometry each one owns
/// (movement along a fixed heading and hitbox tests).

use crate::config::Rules;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    /// The player quit; the host loop should stop.
    Terminated,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A discrete key-down event, already stripped of terminal details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    /// Ctrl-C.  Quits from any screen.
    Interrupt,
}

/// Everything the player did during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Held-direction state.
    pub left: bool,
    pub right: bool,
    /// Key-down events in arrival order.
    pub keys: Vec<Key>,
}

// ── Hitboxes ──────────────────────────────────────────────────────────────────

/// Axis-aligned box stored as its centre and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub cx: f32,
    pub cy: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Hitbox {
    pub fn square(cx: f32, cy: f32, half: f32) -> Self {
        Hitbox { cx, cy, half_w: half, half_h: half }
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        (self.cx - other.cx).abs() < self.half_w + other.half_w
            && (self.cy - other.cy).abs() < self.half_h + other.half_h
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    pub fn hitbox(&self, rules: &Rules) -> Hitbox {
        Hitbox::square(self.x, self.y, rules.player_half)
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Handle into the enemy arena.  Never reused within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub word: String,
    /// Number of leading characters of `word` already typed.
    pub typed: usize,
    pub x: f32,
    pub y: f32,
    /// Radians, fixed at spawn.
    pub heading: f32,
    pub speed: f32,
}

impl Enemy {
    /// Create an enemy at `(x, y)` heading for `target` as it is right now.
    pub fn new(id: EnemyId, word: impl Into<String>, x: f32, y: f32, target: &Player, speed: f32) -> Self {
        Enemy {
            id,
            word: word.into(),
            typed: 0,
            x,
            y,
            heading: (target.y - y).atan2(target.x - x),
            speed,
        }
    }

    pub fn update(&mut self) {
        self.x += self.heading.cos() * self.speed;
        self.y += self.heading.sin() * self.speed;
    }

    pub fn hitbox(&self, rules: &Rules) -> Hitbox {
        Hitbox::square(self.x, self.y, rules.enemy_half)
    }

    pub fn check_collision(&self, player: &Player, rules: &Rules) -> bool {
        self.hitbox(rules).intersects(&player.hitbox(rules))
    }

    pub fn word_len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn typed_part(&self) -> &str {
        let end = self
            .word
            .char_indices()
            .nth(self.typed)
            .map(|(i, _)| i)
            .unwrap_or(self.word.len());
        &self.word[..end]
    }

    pub fn remaining_part(&self) -> &str {
        &self.word[self.typed_part().len()..]
    }

    /// The character the player must type next, if any.
    pub fn next_char(&self) -> Option<char> {
        self.word.chars().nth(self.typed)
    }

    pub fn is_complete(&self) -> bool {
        self.typed >= self.word_len()
    }

    /// Width the word's label takes up on screen.
    pub fn footprint(&self, glyph_width: f32) -> f32 {
        self.word_len() as f32 * glyph_width
    }

    /// True once the enemy has drifted below the bottom edge for good.
    pub fn is_past(&self, rules: &Rules) -> bool {
        self.y - rules.enemy_half > rules.height + rules.offscreen_margin
    }
}

// ── Laser ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaserOutcome {
    InFlight,
    Hit,
    /// Target gone or laser left the field.
    Miss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    pub target: EnemyId,
    pub dx: f32,
    pub dy: f32,
}

impl Laser {
    /// Fire from `(x, y)` toward where `target` is right now.
    pub fn new(x: f32, y: f32, target: &Enemy, speed: f32) -> Self {
        let angle = (target.y - y).atan2(target.x - x);
        Laser {
            x,
            y,
            target: target.id,
            dx: angle.cos() * speed,
            dy: angle.sin() * speed,
        }
    }

    pub fn hitbox(&self, rules: &Rules) -> Hitbox {
        Hitbox::square(self.x, self.y, rules.laser_half)
    }

    pub fn update(&mut self, enemies: &[Enemy], rules: &Rules) -> LaserOutcome {
        let Some(target) = enemies.iter().find(|e| e.id == self.target) else {
            return LaserOutcome::Miss;
        };

        self.x += self.dx;
        self.y += self.dy;

        if self.hitbox(rules).intersects(&target.hitbox(rules)) {
            return LaserOutcome::Hit;
        }

        let m = rules.offscreen_margin;
        if self.x < -m || self.x > rules.width + m || self.y < -m || self.y > rules.height + m {
            return LaserOutcome::Miss;
        }
        LaserOutcome::InFlight
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct EntireGameStateInfo {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub lasers: Vec<Laser>,
    /// The enemy currently receiving keystrokes.
    pub locked: Option<EnemyId>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub next_enemy_id: u64,
    pub rules: Rules,
}

impl EntireGameStateInfo {
    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn locked_enemy(&self) -> Option<&Enemy> {
        self.locked.and_then(|id| self.enemy(id))
    }
}
