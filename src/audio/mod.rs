//! Synthesized sound: cue tones, the ambient loop, and the bevy systems that
//! turn queued requests into `Pitch` playback.

pub mod scheduler;
pub mod settings;
pub mod tones;

use std::time::Duration;

use bevy::audio::{PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::app::outbox::HostOutbox;
use crate::core::config::RunnerConfig;
use crate::core::system::system_order::PresentationSet;
use crate::interaction::inputmap::types::{Action, FrameActions};
use scheduler::AudioDirector;
use settings::AudioSettings;

/// Owns the director; inserted as a resource.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct AudioState(pub AudioDirector);

pub struct RunnerAudioPlugin;

impl Plugin for RunnerAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioState>()
            .add_systems(Startup, init_audio_settings)
            .add_systems(
                Update,
                (toggle_audio, drain_audio_requests, play_due_tones)
                    .chain()
                    .in_set(PresentationSet),
            );
    }
}

fn init_audio_settings(mut commands: Commands, cfg: Option<Res<RunnerConfig>>) {
    let settings = cfg
        .map(|c| AudioSettings::from_config(&c.audio))
        .unwrap_or_default();
    info!(
        target: "audio",
        "audio: volume {:.2}, sound {}, music {}",
        settings.master_volume,
        settings.sound_enabled,
        settings.music_enabled
    );
    commands.insert_resource(settings);
}

fn toggle_audio(actions: Res<FrameActions>, mut settings: ResMut<AudioSettings>) {
    if actions.contains(Action::ToggleSound) {
        let on = settings.toggle_sound();
        info!(target: "audio", "sound {}", if on { "on" } else { "off" });
    }
    if actions.contains(Action::ToggleMusic) {
        let on = settings.toggle_music();
        info!(target: "audio", "music {}", if on { "on" } else { "off" });
    }
}

fn drain_audio_requests(
    time: Res<Time<Real>>,
    settings: Res<AudioSettings>,
    mut outbox: ResMut<HostOutbox>,
    mut state: ResMut<AudioState>,
) {
    let now = time.elapsed();
    for request in outbox.audio.drain(..) {
        state.handle(request, now, &settings);
    }
}

/// Without an audio backend (`Assets<Pitch>` missing) due tones are dropped silently.
fn play_due_tones(
    mut commands: Commands,
    time: Res<Time<Real>>,
    settings: Res<AudioSettings>,
    mut state: ResMut<AudioState>,
    pitches: Option<ResMut<Assets<Pitch>>>,
) {
    let due = state.due(time.elapsed(), &settings);
    let Some(mut pitches) = pitches else {
        return;
    };
    for scheduled in due {
        let gain = settings.gain(scheduled.tone.gain);
        if gain <= 0.0 || scheduled.tone.duration <= 0.0 {
            continue;
        }
        let pitch = Pitch::new(
            scheduled.tone.hz,
            Duration::from_secs_f32(scheduled.tone.duration),
        );
        commands.spawn((
            AudioPlayer(pitches.add(pitch)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(gain)),
        ));
    }
}
