//! Sound cues for simulation events
//!
//! The simulation only emits [`GameEvent`]s. This module maps them to
//! procedural tone cues and forwards them to whatever [`AudioSink`] the
//! host provides. A sink that cannot play something just skips it.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player starts a swing
    Attack,
    /// A hit lands
    Hit,
}

/// A single sine tone, generated by the sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub freq_hz: f32,
    /// Seconds
    pub duration: f32,
    /// Peak amplitude, 0.0 - 1.0
    pub volume: f32,
}

impl ToneSpec {
    /// Number of samples at `sample_rate`
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (self.duration * sample_rate as f32) as usize
    }
}

impl SoundEffect {
    /// The cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerAttacked => Some(SoundEffect::Attack),
            GameEvent::DamageLanded => Some(SoundEffect::Hit),
            GameEvent::WaveStarted { .. } | GameEvent::MatchEnded { .. } => None,
        }
    }

    pub fn tone(&self) -> ToneSpec {
        match self {
            // Short high blip
            SoundEffect::Attack => ToneSpec {
                freq_hz: 760.0,
                duration: 0.10,
                volume: 0.35,
            },
            // Low thud
            SoundEffect::Hit => ToneSpec {
                freq_hz: 220.0,
                duration: 0.12,
                volume: 0.4,
            },
        }
    }
}

/// Plays cues. Implemented by the host's audio backend.
pub trait AudioSink {
    /// Play a tone at `gain` (0.0 - 1.0). Must not fail loudly.
    fn play(&mut self, effect: SoundEffect, gain: f32);
}

/// Sink that drops everything (no audio device)
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect, _gain: f32) {}
}

/// Volume and mute state in front of a sink
#[derive(Debug)]
pub struct AudioCues<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioCues<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward the cue for each event
    pub fn handle(&mut self, events: &[GameEvent]) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.sink.play(effect, vol);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Outcome;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, gain: f32) {
            self.0.push((effect, gain));
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerAttacked),
            Some(SoundEffect::Attack)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::DamageLanded),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::MatchEnded {
                outcome: Outcome::Won
            }),
            None
        );
    }

    #[test]
    fn test_tones() {
        assert_eq!(SoundEffect::Attack.tone().sample_count(44_100), 4410);
        assert_eq!(SoundEffect::Hit.tone().freq_hz, 220.0);
    }

    #[test]
    fn test_cues_respect_mute_and_volume() {
        let mut cues = AudioCues::new(Recorder::default());
        cues.set_master_volume(0.5);
        let events = [
            GameEvent::PlayerAttacked,
            GameEvent::WaveStarted { index: 1 },
            GameEvent::DamageLanded,
        ];
        cues.handle(&events);
        assert_eq!(
            cues.sink().0,
            vec![(SoundEffect::Attack, 0.5), (SoundEffect::Hit, 0.5)]
        );

        cues.set_muted(true);
        cues.handle(&events);
        assert_eq!(cues.sink().0.len(), 2);
    }
}
