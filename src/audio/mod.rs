//! Procedural audio for the game's semantic events
//!
//! The simulation core never talks to an audio device; it emits
//! [`GameEvent`](crate::game::GameEvent)s and the front end forwards them
//! to a [`SoundEngine`]. Playback is fire-and-forget: every cue renders a
//! short sample buffer and detaches it onto the mixer, and any backend
//! failure is swallowed so audio can never stall the simulation.

pub mod synth;

pub use synth::SynthSound;

/// Semantic sound events, plus the global mute flag and volume scalar
pub trait SoundEngine {
    /// Turn intent accepted (short blip)
    fn on_move(&self);
    /// Pickup consumed (two-note arpeggio)
    fn on_eat(&self);
    /// Run ended (falling sweep)
    fn on_crash(&self);
    /// Dash engaged (rising sweep)
    fn on_dash_start(&self);
    /// Background-track step `step` in `0..16`; `dashing` shifts the
    /// melody up an octave
    fn on_step(&self, step: u32, dashing: bool);

    fn set_muted(&self, muted: bool);
    fn muted(&self) -> bool;
    /// Volume scalar, clamped to [0, 1]
    fn set_volume(&self, volume: f32);
    fn volume(&self) -> f32;
}

/// Silent engine used when no audio device is available
pub struct NullSound;

impl SoundEngine for NullSound {
    fn on_move(&self) {}
    fn on_eat(&self) {}
    fn on_crash(&self) {}
    fn on_dash_start(&self) {}
    fn on_step(&self, _step: u32, _dashing: bool) {}

    fn set_muted(&self, _muted: bool) {}
    fn muted(&self) -> bool {
        true
    }
    fn set_volume(&self, _volume: f32) {}
    fn volume(&self) -> f32 {
        0.0
    }
}
