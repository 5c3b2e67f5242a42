//! Synthesized cue and ambient tone tables.

use std::time::Duration;

use crate::gameplay::Cue;

/// Shortest step a glide is split into.
const GLIDE_STEP_SECS: f32 = 0.025;

/// A flat tone, ready for playback. Times in seconds; gain is relative to master volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub hz: f32,
    pub offset: f32,
    pub duration: f32,
    pub gain: f32,
}

/// A tone that may sweep exponentially from `from_hz` to `to_hz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub from_hz: f32,
    pub to_hz: f32,
    pub offset: f32,
    pub duration: f32,
    pub gain: f32,
}

impl Voice {
    pub const fn flat(hz: f32, offset: f32, duration: f32, gain: f32) -> Self {
        Self {
            from_hz: hz,
            to_hz: hz,
            offset,
            duration,
            gain,
        }
    }

    pub const fn glide(from_hz: f32, to_hz: f32, offset: f32, duration: f32, gain: f32) -> Self {
        Self {
            from_hz,
            to_hz,
            offset,
            duration,
            gain,
        }
    }

    pub fn is_glide(&self) -> bool {
        self.from_hz != self.to_hz
    }

    /// Flattens the voice; glides become consecutive steps sampled at their midpoints.
    pub fn steps(&self) -> Vec<Tone> {
        if !self.is_glide() || self.duration <= 0.0 {
            return vec![Tone {
                hz: self.from_hz,
                offset: self.offset,
                duration: self.duration.max(0.0),
                gain: self.gain,
            }];
        }
        let n = (self.duration / GLIDE_STEP_SECS - 1e-3).ceil().max(1.0) as usize;
        let step = self.duration / n as f32;
        let ratio = self.to_hz / self.from_hz;
        (0..n)
            .map(|k| {
                let t = (k as f32 + 0.5) / n as f32;
                Tone {
                    hz: self.from_hz * ratio.powf(t),
                    offset: self.offset + k as f32 * step,
                    duration: step,
                    gain: self.gain,
                }
            })
            .collect()
    }
}

const JUMP: [Voice; 2] = [
    Voice::glide(200.0, 400.0, 0.0, 0.1, 0.3),
    Voice::flat(400.0, 0.1, 0.05, 0.3),
];
const SLIDE: [Voice; 1] = [Voice::glide(300.0, 100.0, 0.0, 0.2, 0.2)];
const COIN: [Voice; 2] = [
    Voice::flat(800.0, 0.0, 0.1, 0.4),
    Voice::flat(1200.0, 0.0, 0.1, 0.4),
];
const LANE_SWITCH: [Voice; 1] = [Voice::flat(400.0, 0.0, 0.05, 0.2)];
const GAME_OVER: [Voice; 1] = [Voice::glide(400.0, 100.0, 0.0, 0.5, 0.4)];
const START: [Voice; 4] = [
    Voice::flat(262.0, 0.0, 0.2, 0.3),
    Voice::flat(330.0, 0.1, 0.2, 0.3),
    Voice::flat(392.0, 0.2, 0.2, 0.3),
    Voice::flat(523.0, 0.3, 0.2, 0.3),
];
const MILESTONE: [Voice; 2] = [
    Voice::flat(523.0, 0.0, 0.3, 0.3),
    Voice::flat(659.0, 0.0, 0.3, 0.3),
];

pub fn cue_voices(cue: Cue) -> &'static [Voice] {
    match cue {
        Cue::Jump => &JUMP,
        Cue::Slide => &SLIDE,
        Cue::Coin => &COIN,
        Cue::LaneSwitch => &LANE_SWITCH,
        Cue::GameOver => &GAME_OVER,
        Cue::Start => &START,
        Cue::Milestone => &MILESTONE,
    }
}

pub fn cue_tones(cue: Cue) -> Vec<Tone> {
    cue_voices(cue).iter().flat_map(Voice::steps).collect()
}

const NOTE_MS: u64 = 300;
const NOTE_SECS: f32 = NOTE_MS as f32 / 1000.0;
const MELODY_GAIN: f32 = 0.1;
const MELODY_HZ: [f32; 8] = [262.0, 294.0, 330.0, 349.0, 392.0, 349.0, 330.0, 294.0];

/// One bar of the ambient loop.
pub fn ambient_bar() -> Vec<Tone> {
    MELODY_HZ
        .iter()
        .enumerate()
        .map(|(i, &hz)| Tone {
            hz,
            offset: i as f32 * NOTE_SECS,
            duration: NOTE_SECS,
            gain: MELODY_GAIN,
        })
        .collect()
}

pub fn ambient_bar_length() -> Duration {
    Duration::from_millis(NOTE_MS * MELODY_HZ.len() as u64)
}
