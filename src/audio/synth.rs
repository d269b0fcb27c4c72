use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use fundsp::prelude as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

use super::SoundEngine;

const SAMPLE_RATE: u32 = 44_100;

/// Chiptune synthesizer on a real audio device
///
/// Timbres follow the original dark-synthwave design: triangle blip on
/// move, square arpeggio on eat, sawtooth shutdown slide on crash, and a
/// 16-step noise/triangle/square pattern for the background track.
pub struct SynthSound {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    muted: AtomicBool,
    /// f32 bits; atomics keep the setters `&self` like the cue calls
    volume: AtomicU32,
}

impl SynthSound {
    pub fn new(volume: f32, muted: bool) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            muted: AtomicBool::new(muted),
            volume: AtomicU32::new(volume.clamp(0.0, 1.0).to_bits()),
        })
    }

    fn play(&self, mut samples: Vec<f32>) {
        if self.muted.load(Ordering::Relaxed) {
            return;
        }
        let volume = self.volume();
        if volume <= 0.0 {
            return;
        }
        for s in &mut samples {
            *s *= volume;
        }
        // Best effort: a failed sink just drops the cue
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

impl SoundEngine for SynthSound {
    fn on_move(&self) {
        self.play(tone(Wave::Triangle, 800.0, 0.02, 0.02));
    }

    fn on_eat(&self) {
        // 1200Hz then 1800Hz, the second note 60ms late
        let mut mix = MixBuffer::new(0.16);
        mix.add(0.0, tone(Wave::Square, 1200.0, 0.08, 0.1));
        mix.add(0.06, tone(Wave::Square, 1800.0, 0.1, 0.1));
        self.play(mix.into_samples());
    }

    fn on_crash(&self) {
        self.play(slide(Wave::Saw, 150.0, 10.0, 1.0, 0.4));
    }

    fn on_dash_start(&self) {
        self.play(slide(Wave::Sine, 300.0, 900.0, 0.15, 0.12));
    }

    fn on_step(&self, step: u32, dashing: bool) {
        let s = step % 16;
        let mut mix = MixBuffer::new(0.2);

        // Percussion: kick on the quarter notes, accented snare on 4/12
        if s % 4 == 0 {
            mix.add(0.0, noise_hit(0.1, 0.2, None));
        }
        if s % 8 == 4 {
            mix.add(0.0, noise_hit(0.15, 0.15, Some(1200.0)));
        }

        // Walking bass on A2 and E3
        let root = 110.0;
        if s == 0 || s == 2 {
            mix.add(0.0, tone(Wave::Triangle, root, 0.1, 0.3));
        }
        if s == 8 || s == 10 {
            mix.add(0.0, tone(Wave::Triangle, root * 1.5, 0.1, 0.3));
        }

        // Melody, an octave up while dashing
        let lift = if dashing { 2.0 } else { 1.0 };
        match s {
            0 => mix.add(0.0, tone(Wave::Square, 440.0 * lift, 0.1, 0.05)),
            2 => mix.add(0.0, tone(Wave::Square, 554.0 * lift, 0.1, 0.05)),
            4 => mix.add(0.0, tone(Wave::Square, 659.0 * lift, 0.1, 0.05)),
            // Closing arpeggio
            14 => mix.add(0.0, tone(Wave::Square, 880.0 * lift, 0.05, 0.05)),
            15 => mix.add(0.0, tone(Wave::Square, 659.0 * lift, 0.05, 0.05)),
            _ => {}
        }

        self.play(mix.into_samples());
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    fn muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn set_volume(&self, volume: f32) {
        self.volume
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }
}

#[derive(Clone, Copy)]
enum Wave {
    Sine,
    Square,
    Triangle,
    Saw,
}

/// A fixed-pitch tone with a percussive exponential-decay envelope
fn tone(wave: Wave, freq: f32, duration: f32, vol: f32) -> Vec<f32> {
    let env = move |t: f32| dsp::xerp(vol, 0.001, (t / duration).min(1.0));
    let mut node: Box<dyn dsp::AudioUnit> = match wave {
        Wave::Sine => Box::new(dsp::sine_hz::<f32>(freq) * dsp::lfo(env)),
        Wave::Square => Box::new(dsp::square_hz(freq) * dsp::lfo(env)),
        Wave::Triangle => Box::new(dsp::triangle_hz(freq) * dsp::lfo(env)),
        Wave::Saw => Box::new(dsp::saw_hz(freq) * dsp::lfo(env)),
    };
    render_mono(node.as_mut(), duration)
}

/// A tone whose pitch sweeps exponentially from `from` to `to`
fn slide(wave: Wave, from: f32, to: f32, duration: f32, vol: f32) -> Vec<f32> {
    let pitch = dsp::lfo(move |t: f32| dsp::xerp(from, to, (t / duration).min(1.0)));
    let env = dsp::lfo(move |t: f32| dsp::xerp(vol, 0.001, (t / duration).min(1.0)));
    let mut node: Box<dyn dsp::AudioUnit> = match wave {
        Wave::Sine => Box::new((pitch >> dsp::sine::<f32>()) * env),
        Wave::Square => Box::new((pitch >> dsp::square()) * env),
        Wave::Triangle => Box::new((pitch >> dsp::triangle()) * env),
        Wave::Saw => Box::new((pitch >> dsp::saw()) * env),
    };
    render_mono(node.as_mut(), duration)
}

/// White-noise percussion hit, optionally bandpassed for a snare color
fn noise_hit(duration: f32, vol: f32, bandpass: Option<f32>) -> Vec<f32> {
    let env = dsp::lfo(move |t: f32| dsp::xerp(vol, 0.001, (t / duration).min(1.0)));
    let mut node: Box<dyn dsp::AudioUnit> = match bandpass {
        Some(center) => Box::new((dsp::noise() >> dsp::bandpass_hz(center, 0.7)) * env),
        None => Box::new(dsp::noise() * env),
    };
    render_mono(node.as_mut(), duration)
}

fn render_mono(node: &mut dyn dsp::AudioUnit, duration: f32) -> Vec<f32> {
    node.set_sample_rate(SAMPLE_RATE as f64);
    node.reset();

    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        samples.push(node.get_mono());
    }
    samples
}

/// Sums voices at sample offsets into one mono buffer
struct MixBuffer {
    samples: Vec<f32>,
}

impl MixBuffer {
    fn new(duration: f32) -> Self {
        Self {
            samples: vec![0.0; (SAMPLE_RATE as f32 * duration) as usize],
        }
    }

    fn add(&mut self, offset_secs: f32, voice: Vec<f32>) {
        let start = (offset_secs * SAMPLE_RATE as f32) as usize;
        for (i, s) in voice.into_iter().enumerate() {
            if let Some(slot) = self.samples.get_mut(start + i) {
                *slot += s;
            }
        }
    }

    fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_matches_duration() {
        let samples = tone(Wave::Triangle, 800.0, 0.02, 0.02);
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * 0.02) as usize);
    }

    #[test]
    fn test_envelope_decays() {
        let samples = tone(Wave::Square, 1200.0, 0.08, 0.1);
        let head: f32 = samples[..100].iter().map(|s| s.abs()).sum();
        let tail: f32 = samples[samples.len() - 100..].iter().map(|s| s.abs()).sum();
        assert!(head > tail);
    }

    #[test]
    fn test_mix_buffer_offsets() {
        let mut mix = MixBuffer::new(0.16);
        mix.add(0.0, vec![1.0; 10]);
        mix.add(0.06, vec![0.5; 10]);
        let samples = mix.into_samples();

        let offset = (0.06 * SAMPLE_RATE as f32) as usize;
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[offset], 0.5);

        // A voice running past the end is clipped, not panicking
        let mut mix = MixBuffer::new(0.01);
        mix.add(0.0, vec![1.0; SAMPLE_RATE as usize]);
    }
}
