//! Pointer click handling
//!
//! A click either restarts a finished run or moves the ship and fires.

use super::state::{Bullet, GameState};
use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Game was over; state reset to a fresh run
    Restarted,
    /// Player moved and fired this many bullets
    Fired(usize),
}

/// Horizontal offsets of a volley for a power level
pub fn volley_offsets(power_level: u8) -> &'static [f32] {
    const SINGLE: [f32; 1] = [0.0];
    const TRIPLE: [f32; 3] = [0.0, -BULLET_SPREAD, BULLET_SPREAD];
    const QUINTUPLE: [f32; 5] = [
        0.0,
        -BULLET_SPREAD,
        BULLET_SPREAD,
        -2.0 * BULLET_SPREAD,
        2.0 * BULLET_SPREAD,
    ];
    match power_level {
        0 | 1 => &SINGLE,
        2 => &TRIPLE,
        _ => &QUINTUPLE,
    }
}

/// Apply a click at field coordinate `field_x`
pub fn handle_click<A: SoundSink + ?Sized>(
    state: &mut GameState,
    field_x: f32,
    audio: &A,
) -> ClickOutcome {
    if state.is_game_over() {
        state.reset();
        log::info!("Restarted (high score {})", state.high_score);
        return ClickOutcome::Restarted;
    }

    audio.play(SoundEffect::Shoot);
    state.player.pos.x = field_x;

    let y = state.player.pos.y - BULLET_SPAWN_OFFSET;
    let offsets = volley_offsets(state.player.power_level);
    state
        .bullets
        .extend(offsets.iter().map(|dx| Bullet::new(field_x + dx, y)));

    ClickOutcome::Fired(offsets.len())
}
