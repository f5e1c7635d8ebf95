/// Tunable constants and resource paths.
///
/// Every field has a default equal to the shipped game's constants, so a
/// config file only needs to name what it changes:
///
/// ```ron
/// (
///     word_list: "words/animals.txt",
///     rules: (enemy_cap: 3, enemy_speed: 2.5),
/// )
/// ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ResourceError;

/// Environment variable naming an optional RON config file.
pub const CONFIG_ENV: &str = "TYPING_SHOOTER_CONFIG";

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Numbers the simulation reads every frame.  `Copy` so it rides along inside
/// the game state without borrowing.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Logical play-field size.
    pub width: f32,
    pub height: f32,
    pub fps: u32,

    pub player_speed: f32,
    /// Half the side of the player's square hitbox.
    pub player_half: f32,
    /// Distance of the player's row above the bottom edge.
    pub player_offset: f32,

    pub enemy_speed: f32,
    pub enemy_half: f32,
    pub enemy_cap: usize,

    pub laser_speed: f32,
    pub laser_half: f32,

    /// Placement retries per word in a spawn wave.
    pub spawn_attempts: u32,
    /// Extra gap added on top of the wider word's footprint.
    pub min_clearance: f32,
    /// Approximate on-screen width of one character of an enemy's label.
    pub glyph_width: f32,
    pub spawn_margin_x: i32,
    /// Enemies start between these distances above the top edge.
    pub spawn_band_top: i32,
    pub spawn_band_bottom: i32,

    /// How far outside the field something may drift before it is culled.
    pub offscreen_margin: f32,
    pub points_per_char: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            width: 800.0,
            height: 800.0,
            fps: 60,
            player_speed: 5.0,
            player_half: 20.0,
            player_offset: 50.0,
            enemy_speed: 1.5,
            enemy_half: 15.0,
            enemy_cap: 5,
            laser_speed: 10.0,
            laser_half: 2.0,
            spawn_attempts: 10,
            min_clearance: 100.0,
            glyph_width: 12.0,
            spawn_margin_x: 50,
            spawn_band_top: 50,
            spawn_band_bottom: 300,
            offscreen_margin: 50.0,
            points_per_char: 10,
        }
    }
}

impl Rules {
    /// Reject values the simulation cannot run with.  Every spawn range must
    /// be non-empty and every size strictly positive.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("player_half", self.player_half),
            ("enemy_half", self.enemy_half),
            ("laser_half", self.laser_half),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("laser_speed", self.laser_speed),
            ("min_clearance", self.min_clearance),
            ("glyph_width", self.glyph_width),
            ("offscreen_margin", self.offscreen_margin),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }

        if self.fps == 0 {
            return Err("fps must be at least 1".to_string());
        }
        if self.enemy_cap == 0 {
            return Err("enemy_cap must be at least 1".to_string());
        }
        if self.spawn_attempts == 0 {
            return Err("spawn_attempts must be at least 1".to_string());
        }
        if self.spawn_margin_x < 0 || self.spawn_margin_x > self.width as i32 - self.spawn_margin_x {
            return Err(format!(
                "spawn_margin_x {} leaves no room across width {}",
                self.spawn_margin_x, self.width
            ));
        }
        if self.spawn_band_top < 0 || self.spawn_band_top > self.spawn_band_bottom {
            return Err(format!(
                "spawn band {}..{} is empty",
                self.spawn_band_top, self.spawn_band_bottom
            ));
        }
        Ok(())
    }
}

// ── Whole config ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub word_list: PathBuf,
    /// Where tracing output goes.  `None` disables logging.
    pub log_file: Option<PathBuf>,
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            word_list: PathBuf::from("wordarray.txt"),
            log_file: Some(PathBuf::from("typing_shooter.log")),
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::from_io(path.to_path_buf(), e))?;
        Self::parse(&text).map_err(|message| ResourceError::InvalidConfig {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse and validate.  A config that deserializes but carries unusable
    /// rules is rejected here, before anything is spawned.
    pub fn parse(text: &str) -> Result<Self, String> {
        let config: GameConfig = ron::from_str(text).map_err(|e| e.to_string())?;
        config.rules.validate()?;
        Ok(config)
    }

    /// Load the file named by `TYPING_SHOOTER_CONFIG`, or fall back to the
    /// defaults when the variable is unset.
    pub fn from_env() -> Result<Self, ResourceError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }
}
