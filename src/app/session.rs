//! Drives the [`GameSession`] from inside the schedule.

use bevy::prelude::*;

use crate::app::outbox::HostOutbox;
use crate::app::state::AppState;
use crate::core::clock::FixedInstant;
use crate::core::config::RunnerConfig;
use crate::core::system::system_order::{PresentationSet, SimulationSet};
use crate::gameplay::{FrameOutcome, GameSession, Screen};
use crate::interaction::inputmap::types::{Action, FrameActions};

#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSession(pub GameSession);

impl ActiveSession {
    pub fn from_config(cfg: &RunnerConfig) -> Self {
        Self(GameSession::new(cfg.clone()))
    }
}

/// Start, resume and menu transitions requested while no frame is simulating.
pub fn handle_lifecycle_actions(
    actions: Res<FrameActions>,
    state: Res<State<AppState>>,
    mut session: ResMut<ActiveSession>,
    mut outbox: ResMut<HostOutbox>,
) {
    if actions.is_empty() {
        return;
    }
    match state.get() {
        AppState::Menu => {
            if actions.contains(Action::Confirm) {
                session.start(&mut *outbox);
            }
        }
        AppState::GameOver => {
            if actions.contains(Action::Confirm) {
                session.start(&mut *outbox);
            } else if actions.contains(Action::Menu) {
                session.return_to_menu(&mut *outbox);
            }
        }
        AppState::Paused => {
            if actions.contains(Action::Confirm) || actions.contains(Action::Pause) {
                session.resume(&mut *outbox);
            } else if actions.contains(Action::Menu) {
                session.return_to_menu(&mut *outbox);
            }
        }
        AppState::Running => {}
    }
}

pub fn run_session_frame(
    actions: Res<FrameActions>,
    time: Res<Time<Real>>,
    mut session: ResMut<ActiveSession>,
    mut outbox: ResMut<HostOutbox>,
) {
    let clock = FixedInstant(time.elapsed());
    if let FrameOutcome::GameOver(summary) = session.tick(actions.commands(), &clock, &mut *outbox) {
        debug!(
            target: "session",
            "final frame {} speed {:.3} difficulty {}",
            summary.frames,
            summary.speed,
            summary.difficulty
        );
    }
}

/// Maps the session's screen requests onto [`AppState`].
pub fn apply_screen_requests(
    mut outbox: ResMut<HostOutbox>,
    state: Res<State<AppState>>,
    mut next: ResMut<NextState<AppState>>,
) {
    let Some(screen) = outbox.screen.take() else {
        return;
    };
    let target = match screen {
        Screen::Start => AppState::Menu,
        Screen::Pause => AppState::Paused,
        Screen::GameOver => AppState::GameOver,
        Screen::None => AppState::Running,
    };
    if *state.get() != target {
        next.set(target);
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_lifecycle_actions,
                run_session_frame.run_if(in_state(AppState::Running)),
            )
                .chain()
                .in_set(SimulationSet),
        )
        .add_systems(Update, apply_screen_requests.in_set(PresentationSet));
    }
}
