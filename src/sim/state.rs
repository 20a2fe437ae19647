//! Game state and core entity types
//!
//! Everything the renderer reads and the update step / click handler mutate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounded};
use crate::consts::*;
use crate::difficulty_for_score;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);
    pub const GREEN: Color = Color(0x00ff00);
    pub const CYAN: Color = Color(0x00ffff);
    pub const YELLOW: Color = Color(0xffff00);

    /// CSS hex form, e.g. `#8b0000`
    pub fn css(&self) -> String {
        format!("#{:06x}", self.0 & 0xff_ffff)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a click to restart
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Number of simultaneous shots tier, 1..=3
    pub power_level: u8,
    /// Absorbs one enemy collision
    pub shield: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            power_level: MIN_POWER_LEVEL,
            shield: false,
        }
    }
}

impl Player {
    /// Raise power level by one, capped at the maximum
    pub fn power_up(&mut self) {
        self.power_level = (self.power_level + 1).clamp(MIN_POWER_LEVEL, MAX_POWER_LEVEL);
    }
}

impl Bounded for Player {
    // Anchored at the position, like every other entity
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(PLAYER_SIZE))
    }
}

/// A player bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(BULLET_SIZE))
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
}

/// Per-kind enemy template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub color: Color,
    /// Pixels per tick, downward
    pub speed: f32,
    pub points: u64,
    pub hp: u8,
}

impl EnemyKind {
    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                size: Vec2::splat(20.0),
                color: Color(0xff0000),
                speed: 2.0,
                points: 100,
                hp: 1,
            },
            EnemyKind::Fast => EnemyStats {
                size: Vec2::splat(15.0),
                color: Color(0xff00ff),
                speed: 4.0,
                points: 150,
                hp: 1,
            },
            EnemyKind::Tank => EnemyStats {
                size: Vec2::splat(30.0),
                color: Color(0x8b0000),
                speed: 1.0,
                points: 200,
                hp: 3,
            },
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub speed: f32,
    pub points: u64,
    pub hp: u8,
}

impl Enemy {
    /// Spawn an enemy of the given kind at x, top of the field
    pub fn new(kind: EnemyKind, x: f32) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos: Vec2::new(x, 0.0),
            size: stats.size,
            color: stats.color,
            speed: stats.speed,
            points: stats.points,
            hp: stats.hp,
        }
    }

    /// Remaining hp as a fraction of the kind's full hp
    pub fn health_fraction(&self) -> f32 {
        self.hp as f32 / self.kind.stats().hp as f32
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Adds a pair of side shots, up to level 3
    Multishot,
    /// Has no gameplay effect
    Speedup,
    /// Absorbs one enemy collision
    Shield,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::Multishot,
        PowerupKind::Speedup,
        PowerupKind::Shield,
    ];

    pub fn color(&self) -> Color {
        match self {
            PowerupKind::Multishot => Color(0x00ffff),
            PowerupKind::Speedup => Color(0xffff00),
            PowerupKind::Shield => Color(0x0000ff),
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl Powerup {
    pub fn new(kind: PowerupKind, x: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, 0.0),
            size: Vec2::splat(POWERUP_SIZE),
            color: kind.color(),
        }
    }
}

impl Bounded for Powerup {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    pub score: u64,
    /// Best score across sessions, never decreases
    pub high_score: u64,
    /// 1..=5, drives enemy spawn rate
    pub difficulty: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Fresh run with a previously stored high score
    pub fn new(high_score: u64) -> Self {
        Self {
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            high_score,
            difficulty: difficulty_for_score(0),
            phase: GamePhase::Playing,
        }
    }

    /// Back to initial values, keeping the high score
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
