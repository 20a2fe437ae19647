//! LIFF Shooter - a tap-to-shoot arcade mini-game for LINE mini-apps
//!
//! Core modules:
//! - `sim`: Game state, update step, collisions and click handling
//! - `renderer`: Scene building and the Canvas 2D backend
//! - `audio`: Procedural sound effects (Web Audio)
//! - `persistence`: High score storage
//! - `platform`: Browser coordinate helpers
//! - `share`: LINE share card and share target picker
//! - `settings`: Player preferences

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod share;
pub mod sim;

pub use audio::{AudioManager, SoundEffect, SoundSink};
pub use persistence::ScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical play field size (canvas pixels)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player start position and hitbox
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Power level bounds (number of bullet pairs + center shot)
    pub const MIN_POWER_LEVEL: u8 = 1;
    pub const MAX_POWER_LEVEL: u8 = 3;

    /// Bullets
    pub const BULLET_SIZE: f32 = 4.0;
    /// Pixels per tick, upward
    pub const BULLET_SPEED: f32 = 7.0;
    /// Bullets spawn this far above the player
    pub const BULLET_SPAWN_OFFSET: f32 = 20.0;
    /// Horizontal spacing between side shots
    pub const BULLET_SPREAD: f32 = 10.0;

    /// Powerups
    pub const POWERUP_SIZE: f32 = 15.0;
    /// Pixels per tick, downward
    pub const POWERUP_SPEED: f32 = 1.0;
    /// Spawn lane margin (x is drawn from [0, FIELD_WIDTH - margin))
    pub const POWERUP_SPAWN_MARGIN: f32 = 20.0;

    /// Spawn timing (milliseconds)
    pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 1000.0;
    pub const POWERUP_SPAWN_INTERVAL_MS: f64 = 10_000.0;

    /// Difficulty: one level per this many points, capped
    pub const POINTS_PER_LEVEL: u64 = 1000;
    pub const MAX_DIFFICULTY: u32 = 5;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "shootingGameHighScore";
    pub const SETTINGS_KEY: &str = "shootingGameSettings";
}

/// Difficulty level for a score: `1 + score / 1000`, capped at 5
#[inline]
pub fn difficulty_for_score(score: u64) -> u32 {
    let level = 1 + score / consts::POINTS_PER_LEVEL;
    level.min(consts::MAX_DIFFICULTY as u64) as u32
}
