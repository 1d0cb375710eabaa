//! Sound effects
//!
//! Procedurally generated beeps - no external files needed!
//!
//! Which tone plays for which event, and when each playing voice must stop,
//! is decided by [`ToneScheduler`] as plain state advanced once per frame.
//! The WebAudio backend (wasm32 only) just starts and stops oscillators when
//! told to, so no timer callbacks are involved.

use crate::sim::{GameEvent, Impact};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
    Sine,
}

/// A single beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_s: f32,
    pub waveform: Waveform,
    pub gain: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Plain droplet collected
    Droplet,
    /// Rewarding droplet collected
    RewardingDroplet,
    /// Hazard shredded in power mode
    ShieldedHazard,
    /// Hazard cost a life
    Hit,
}

impl SoundEffect {
    /// Effect to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Impact(Impact::Droplet) => Some(SoundEffect::Droplet),
            GameEvent::Impact(Impact::RewardingDroplet) => Some(SoundEffect::RewardingDroplet),
            GameEvent::Impact(Impact::ShieldedHazard) => Some(SoundEffect::ShieldedHazard),
            GameEvent::Impact(Impact::Hit) => Some(SoundEffect::Hit),
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::Droplet => Tone {
                frequency_hz: 660.0,
                duration_s: 0.07,
                waveform: Waveform::Square,
                gain: 0.035,
            },
            SoundEffect::RewardingDroplet => Tone {
                frequency_hz: 880.0,
                duration_s: 0.07,
                waveform: Waveform::Square,
                gain: 0.035,
            },
            SoundEffect::ShieldedHazard => Tone {
                frequency_hz: 240.0,
                duration_s: 0.06,
                waveform: Waveform::Sawtooth,
                gain: 0.03,
            },
            SoundEffect::Hit => Tone {
                frequency_hz: 140.0,
                duration_s: 0.12,
                waveform: Waveform::Sine,
                gain: 0.05,
            },
        }
    }
}

/// A tone that has been started and has a scheduled stop time
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub id: u32,
    pub effect: SoundEffect,
    pub tone: Tone,
    /// Output gain after volume settings
    pub gain: f32,
    pub started_at: f64,
    pub stop_at: f64,
}

/// Tracks playing voices and when each must stop
#[derive(Debug, Default)]
pub struct ToneScheduler {
    voices: Vec<Voice>,
    next_id: u32,
}

impl ToneScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a voice at `now` (seconds). Silent voices are not scheduled.
    pub fn schedule(&mut self, effect: SoundEffect, now: f64, volume: f32) -> Option<Voice> {
        let tone = effect.tone();
        let gain = tone.gain * volume;
        if gain <= 0.0 {
            return None;
        }
        let voice = Voice {
            id: self.next_id,
            effect,
            tone,
            gain,
            started_at: now,
            stop_at: now + tone.duration_s as f64,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.voices.push(voice.clone());
        Some(voice)
    }

    /// Remove and return every voice whose stop time has been reached
    pub fn advance(&mut self, now: f64) -> Vec<Voice> {
        let (expired, playing): (Vec<_>, Vec<_>) =
            self.voices.drain(..).partition(|v| v.stop_at <= now);
        self.voices = playing;
        expired
    }

    /// Voices still sounding
    pub fn active(&self) -> &[Voice] {
        &self.voices
    }

    /// Stop tracking everything (returns what was playing)
    pub fn clear(&mut self) -> Vec<Voice> {
        std::mem::take(&mut self.voices)
    }
}

/// WebAudio backend
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorNode, OscillatorType};

    use super::{SoundEffect, ToneScheduler, Waveform};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        scheduler: ToneScheduler,
        oscillators: Vec<(u32, OscillatorNode)>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                scheduler: ToneScheduler::new(),
                oscillators: Vec::new(),
                volume: settings.effective_sfx_gain(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_gain();
        }

        pub fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else {
                return;
            };
            let now = ctx.current_time();
            let Some(voice) = self.scheduler.schedule(effect, now, self.volume) else {
                return;
            };

            let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
                return;
            };
            osc.set_type(match voice.tone.waveform {
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Sine => OscillatorType::Sine,
            });
            osc.frequency().set_value(voice.tone.frequency_hz);
            gain.gain().set_value(voice.gain);

            let connected = osc
                .connect_with_audio_node(&gain)
                .and_then(|_| gain.connect_with_audio_node(&ctx.destination()));
            if connected.is_err() || osc.start().is_err() {
                return;
            }
            self.oscillators.push((voice.id, osc));
        }

        /// Stop any voice whose time is up. Call once per frame.
        pub fn update(&mut self) {
            let Some(ctx) = &self.ctx else {
                return;
            };
            for voice in self.scheduler.advance(ctx.current_time()) {
                if let Some(i) = self.oscillators.iter().position(|(id, _)| *id == voice.id) {
                    let (_, osc) = self.oscillators.swap_remove(i);
                    let _ = osc.stop();
                }
            }
        }

        /// Silence everything immediately (e.g. tab hidden)
        pub fn stop_all(&mut self) {
            self.scheduler.clear();
            for (_, osc) in self.oscillators.drain(..) {
                let _ = osc.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_map_to_effects() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Impact(Impact::Hit)),
            Some(SoundEffect::Hit)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::ScoreChanged(3)), None);
        assert_eq!(SoundEffect::RewardingDroplet.tone().frequency_hz, 880.0);
    }

    #[test]
    fn test_voice_stops_after_duration() {
        let mut scheduler = ToneScheduler::new();
        let voice = scheduler.schedule(SoundEffect::Hit, 10.0, 1.0).unwrap();
        assert!((voice.stop_at - 10.12).abs() < 1e-6);

        assert!(scheduler.advance(10.05).is_empty());
        assert_eq!(scheduler.active().len(), 1);

        let stopped = scheduler.advance(10.2);
        assert_eq!(stopped.len(), 1);
        assert_eq!(stopped[0].id, voice.id);
        assert!(scheduler.active().is_empty());
    }

    #[test]
    fn test_overlapping_voices_stop_independently() {
        let mut scheduler = ToneScheduler::new();
        scheduler.schedule(SoundEffect::Hit, 0.0, 1.0);
        scheduler.schedule(SoundEffect::Droplet, 0.03, 1.0);
        // Droplet ends at 0.10, hit at 0.12
        let first = scheduler.advance(0.11);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].effect, SoundEffect::Droplet);
        let second = scheduler.advance(0.13);
        assert_eq!(second[0].effect, SoundEffect::Hit);
    }

    #[test]
    fn test_muted_voices_not_scheduled() {
        let mut scheduler = ToneScheduler::new();
        assert!(scheduler.schedule(SoundEffect::Droplet, 0.0, 0.0).is_none());
        assert!(scheduler.active().is_empty());
    }

    #[test]
    fn test_volume_scales_gain() {
        let mut scheduler = ToneScheduler::new();
        let voice = scheduler.schedule(SoundEffect::Hit, 0.0, 0.5).unwrap();
        assert!((voice.gain - 0.025).abs() < 1e-6);
    }
}
