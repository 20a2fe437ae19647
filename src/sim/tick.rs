//! Per-frame update step
//!
//! Spawns, movement, difficulty and collision resolution, in that order.
//! One call per animation frame; positions advance a fixed amount per call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::collides;
use super::state::{Enemy, EnemyKind, GamePhase, GameState, Powerup, PowerupKind};
use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::difficulty_for_score;
use crate::persistence::ScoreStore;

/// Spawn scheduler: last spawn timestamps plus the run's RNG
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Timestamp (ms) of the last enemy spawn
    pub last_enemy_ms: f64,
    /// Timestamp (ms) of the last power-up spawn
    pub last_powerup_ms: f64,
    rng: Pcg32,
}

impl Spawner {
    /// Create a scheduler whose timers start at `now_ms`
    pub fn new(seed: u64, now_ms: f64) -> Self {
        Self {
            last_enemy_ms: now_ms,
            last_powerup_ms: now_ms,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restart both timers (new run)
    pub fn rearm(&mut self, now_ms: f64) {
        self.last_enemy_ms = now_ms;
        self.last_powerup_ms = now_ms;
    }

    /// Milliseconds between enemy spawns at a difficulty level
    pub fn enemy_interval_ms(difficulty: u32) -> f64 {
        ENEMY_SPAWN_INTERVAL_MS / difficulty.max(1) as f64
    }

    /// 70% normal, otherwise fast or tank with equal odds
    fn roll_enemy_kind(&mut self) -> EnemyKind {
        if self.rng.random::<f32>() > 0.7 {
            if self.rng.random::<f32>() > 0.5 {
                EnemyKind::Fast
            } else {
                EnemyKind::Tank
            }
        } else {
            EnemyKind::Normal
        }
    }

    fn roll_powerup_kind(&mut self) -> PowerupKind {
        PowerupKind::ALL[self.rng.random_range(0..PowerupKind::ALL.len())]
    }

    /// Spawn whatever is due at `now_ms`
    pub fn spawn_due(&mut self, state: &mut GameState, now_ms: f64) {
        if now_ms - self.last_enemy_ms > Self::enemy_interval_ms(state.difficulty) {
            let kind = self.roll_enemy_kind();
            let lane = FIELD_WIDTH - kind.stats().size.x;
            let x = self.rng.random::<f32>() * lane;
            state.enemies.push(Enemy::new(kind, x));
            self.last_enemy_ms = now_ms;
            log::debug!("Spawned {:?} enemy at x={:.1}", kind, x);
        }

        if now_ms - self.last_powerup_ms > POWERUP_SPAWN_INTERVAL_MS {
            let kind = self.roll_powerup_kind();
            let x = self.rng.random::<f32>() * (FIELD_WIDTH - POWERUP_SPAWN_MARGIN);
            state.powerups.push(Powerup::new(kind, x));
            self.last_powerup_ms = now_ms;
            log::debug!("Spawned {:?} power-up at x={:.1}", kind, x);
        }
    }
}

/// Advance the game by one frame
///
/// `audio` receives hit/pickup/deflect/death sounds; `store` receives the
/// high score whenever it is beaten. Does nothing once the game is over.
pub fn tick<A, S>(
    state: &mut GameState,
    spawner: &mut Spawner,
    now_ms: f64,
    audio: &A,
    store: &mut S,
) where
    A: SoundSink + ?Sized,
    S: ScoreStore + ?Sized,
{
    if state.phase == GamePhase::GameOver {
        return;
    }

    spawner.spawn_due(state, now_ms);
    advance(state);
    state.difficulty = difficulty_for_score(state.score);

    resolve_bullet_hits(state, audio);
    resolve_pickups(state, audio);
    resolve_enemy_contact(state, audio, store);

    record_high_score(state, store);
}

/// Move everything and drop what left the field
fn advance(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.y > 0.0);

    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
    }
    state.enemies.retain(|e| e.pos.y < FIELD_HEIGHT);

    for powerup in &mut state.powerups {
        powerup.pos.y += POWERUP_SPEED;
    }
    state.powerups.retain(|p| p.pos.y < FIELD_HEIGHT);
}

/// Bullets and enemies, both scanned back-to-front. A bullet is spent on the
/// last enemy (in spawn order) it overlaps.
fn resolve_bullet_hits<A: SoundSink + ?Sized>(state: &mut GameState, audio: &A) {
    for i in (0..state.bullets.len()).rev() {
        let bullet = state.bullets[i];
        let Some(j) = state.enemies.iter().rposition(|e| collides(&bullet, e)) else {
            continue;
        };

        state.bullets.remove(i);
        let enemy = &mut state.enemies[j];
        enemy.hp = enemy.hp.saturating_sub(1);
        if enemy.hp == 0 {
            let enemy = state.enemies.remove(j);
            state.score += enemy.points;
            audio.play(SoundEffect::EnemyDestroyed);
            log::debug!("{:?} destroyed (+{})", enemy.kind, enemy.points);
        }
    }
}

fn resolve_pickups<A: SoundSink + ?Sized>(state: &mut GameState, audio: &A) {
    for i in (0..state.powerups.len()).rev() {
        if !collides(&state.player, &state.powerups[i]) {
            continue;
        }
        let powerup = state.powerups.remove(i);
        audio.play(SoundEffect::PowerupPickup);

        match powerup.kind {
            PowerupKind::Multishot => state.player.power_up(),
            PowerupKind::Shield => state.player.shield = true,
            PowerupKind::Speedup => {}
        }
        log::debug!("Picked up {:?}", powerup.kind);
    }
}

/// First overlapping enemy either pops the shield or ends the run. The enemy
/// itself is left in play.
fn resolve_enemy_contact<A, S>(state: &mut GameState, audio: &A, store: &mut S)
where
    A: SoundSink + ?Sized,
    S: ScoreStore + ?Sized,
{
    let player = &state.player;
    if !state.enemies.iter().any(|e| collides(player, e)) {
        return;
    }

    if state.player.shield {
        state.player.shield = false;
        audio.play(SoundEffect::ShieldDeflect);
        log::debug!("Shield absorbed a hit");
    } else {
        state.phase = GamePhase::GameOver;
        audio.play(SoundEffect::PlayerDeath);
        record_high_score(state, store);
        log::info!(
            "Game over: score {} (high score {})",
            state.score,
            state.high_score
        );
    }
}

/// Raise the high score to the current score and write it through.
/// Returns true when a new record was set.
pub fn record_high_score<S: ScoreStore + ?Sized>(state: &mut GameState, store: &mut S) -> bool {
    if state.score <= state.high_score {
        return false;
    }
    state.high_score = state.score;
    store.save_high_score(state.high_score);
    log::info!("New high score: {}", state.high_score);
    true
}
