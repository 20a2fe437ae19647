//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and browser code:
//! - One `tick` per animation frame, fixed per-tick movement
//! - Seeded RNG owned by the `Spawner`
//! - Audio and high score storage injected as traits

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded, collides};
pub use input::{ClickOutcome, handle_click, volley_offsets};
pub use state::{
    Bullet, Color, Enemy, EnemyKind, EnemyStats, GamePhase, GameState, Player, Powerup,
    PowerupKind,
};
pub use tick::{Spawner, record_high_score, tick};
