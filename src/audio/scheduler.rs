//! Tone scheduling on a wall clock, plus the self-rescheduling ambient loop.

use std::time::Duration;

use crate::audio::settings::AudioSettings;
use crate::audio::tones::{ambient_bar, ambient_bar_length, cue_tones, Tone};
use crate::gameplay::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Effect,
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    pub at: Duration,
    pub tone: Tone,
    pub channel: Channel,
}

#[derive(Debug, Default)]
pub struct ToneQueue {
    pending: Vec<ScheduledTone>,
}

impl ToneQueue {
    pub fn schedule(&mut self, start: Duration, tones: &[Tone], channel: Channel) {
        for tone in tones {
            self.pending.push(ScheduledTone {
                at: start + Duration::from_secs_f32(tone.offset.max(0.0)),
                tone: *tone,
                channel,
            });
        }
    }

    /// Removes and returns every tone due at or before `now`, oldest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<ScheduledTone> {
        let mut due: Vec<ScheduledTone> = Vec::new();
        self.pending.retain(|t| {
            if t.at <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| t.at);
        due
    }

    pub fn cancel(&mut self, channel: Channel) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.channel != channel);
        before - self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Bar timer for the ambient melody. `None` means stopped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AmbientLoop {
    next_bar: Option<Duration>,
    bars: u64,
}

impl AmbientLoop {
    /// No-op if already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.next_bar.is_some() {
            return false;
        }
        self.next_bar = Some(now);
        true
    }

    /// Cancels the pending continuation.
    pub fn stop(&mut self) -> bool {
        self.next_bar.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.next_bar.is_some()
    }

    pub fn bars_played(&self) -> u64 {
        self.bars
    }

    /// Returns the start of the bar due by `now` and schedules the next one.
    /// After a stall the loop resyncs to `now` instead of replaying missed bars.
    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        let at = self.next_bar.filter(|at| *at <= now)?;
        let bar = ambient_bar_length();
        let next = at + bar;
        self.next_bar = Some(if next <= now { now + bar } else { next });
        self.bars += 1;
        Some(at)
    }
}

/// What the presentation side asked the audio layer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioRequest {
    Cue(Cue),
    StartAmbient,
    StopAmbient,
}

/// Turns requests into timed tones, honouring the sound and music switches.
#[derive(Debug, Default)]
pub struct AudioDirector {
    queue: ToneQueue,
    ambient: AmbientLoop,
}

impl AudioDirector {
    pub fn handle(&mut self, request: AudioRequest, now: Duration, settings: &AudioSettings) {
        match request {
            AudioRequest::Cue(cue) => {
                if settings.sound_enabled {
                    self.queue.schedule(now, &cue_tones(cue), Channel::Effect);
                }
            }
            AudioRequest::StartAmbient => {
                if settings.music_enabled {
                    self.ambient.start(now);
                }
            }
            AudioRequest::StopAmbient => self.stop_ambient(),
        }
    }

    pub fn stop_ambient(&mut self) {
        self.ambient.stop();
        self.queue.cancel(Channel::Ambient);
    }

    pub fn ambient_running(&self) -> bool {
        self.ambient.is_running()
    }

    /// Tones to start now.
    pub fn due(&mut self, now: Duration, settings: &AudioSettings) -> Vec<ScheduledTone> {
        if !settings.music_enabled {
            self.stop_ambient();
        }
        while let Some(bar) = self.ambient.poll(now) {
            self.queue.schedule(bar, &ambient_bar(), Channel::Ambient);
        }
        self.queue.drain_due(now)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
