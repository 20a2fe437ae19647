//! Audio system using Web Audio API
//!
//! Every effect is a single short decaying oscillator tone. The game logic
//! only sees the [`SoundSink`] trait; [`AudioManager`] is the browser sink.

#[cfg(target_arch = "wasm32")]
use std::cell::OnceCell;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

use crate::settings::Settings;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[cfg(target_arch = "wasm32")]
impl From<Waveform> for OscillatorType {
    fn from(wave: Waveform) -> Self {
        match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy hp reached zero
    EnemyDestroyed,
    /// Power-up collected
    PowerupPickup,
    /// Shield absorbed an enemy
    ShieldDeflect,
    /// Player hit without shield
    PlayerDeath,
}

impl SoundEffect {
    /// Frequency (Hz) and waveform of the effect's tone
    pub fn tone(&self) -> (f32, Waveform) {
        match self {
            SoundEffect::Shoot => (880.0, Waveform::Square),
            SoundEffect::EnemyDestroyed => (440.0, Waveform::Square),
            SoundEffect::PowerupPickup => (660.0, Waveform::Square),
            SoundEffect::ShieldDeflect => (220.0, Waveform::Square),
            SoundEffect::PlayerDeath => (110.0, Waveform::Square),
        }
    }
}

/// Fire-and-forget sound output
pub trait SoundSink {
    fn play(&self, effect: SoundEffect);
}

/// Silent sink
impl SoundSink for () {
    fn play(&self, _effect: SoundEffect) {}
}

/// Gain at tone start (before volume scaling)
pub const TONE_PEAK_GAIN: f32 = 0.1;
/// Gain the tone decays to
pub const TONE_FLOOR_GAIN: f32 = 0.01;
/// Tone length in seconds
pub const TONE_DURATION: f64 = 0.5;

/// Start and end gain of a tone at the given effective volume
///
/// Both ends scale with volume so the ramp always decays.
pub fn tone_envelope(vol: f32) -> (f32, f32) {
    (TONE_PEAK_GAIN * vol, TONE_FLOOR_GAIN * vol)
}

/// Audio manager for the game
///
/// The `AudioContext` is created on the first sound (browsers only allow it
/// after a user gesture anyway) and lives until the page goes away.
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: OnceCell<Option<AudioContext>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: OnceCell::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Build a manager with volumes taken from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn context(&self) -> Option<&AudioContext> {
        self.ctx
            .get_or_init(|| match AudioContext::new() {
                Ok(ctx) => Some(ctx),
                Err(e) => {
                    // May fail outside a secure context
                    log::warn!("Failed to create AudioContext - audio disabled: {:?}", e);
                    None
                }
            })
            .as_ref()
    }

    /// Single oscillator with an exponential gain decay
    #[cfg(target_arch = "wasm32")]
    fn play_tone(&self, ctx: &AudioContext, freq: f32, wave: Waveform, vol: f32) -> Option<()> {
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        let t = ctx.current_time();

        osc.set_type(wave.into());
        osc.frequency().set_value_at_time(freq, t).ok()?;
        let (start, end) = tone_envelope(vol);
        gain.gain().set_value_at_time(start, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(end, t + TONE_DURATION)
            .ok()?;

        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        osc.start().ok()?;
        osc.stop_with_when(t + TONE_DURATION).ok()
    }
}

impl SoundSink for AudioManager {
    #[cfg(target_arch = "wasm32")]
    fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.context() else { return };

        let (freq, wave) = effect.tone();
        if self.play_tone(ctx, freq, wave, vol).is_none() {
            log::warn!("Failed to play {:?}", effect);
        }
    }

    /// Native: no audio device, just trace
    #[cfg(not(target_arch = "wasm32"))]
    fn play(&self, effect: SoundEffect) {
        if self.effective_volume() > 0.0 {
            let (freq, _) = effect.tone();
            log::trace!("sound {:?} ({} Hz)", effect, freq);
        }
    }
}
