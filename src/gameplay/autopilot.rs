//! Rule-based driver for headless soak runs and attract mode.

use crate::core::components::{Lane, ObstacleKind};
use crate::gameplay::collaborators::{Command, FrameCommands};
use crate::gameplay::session::GameSession;

#[derive(Debug, Clone, PartialEq)]
pub struct Autopilot {
    /// How far ahead (world units) an obstacle counts as a threat.
    pub lookahead: f32,
    /// Frames of margin before an obstacle enters the hit window.
    pub lead_frames: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead: 14.0,
            lead_frames: 2.0,
        }
    }
}

impl Autopilot {
    /// Distance ahead of the player to the nearest live obstacle in `lane`.
    fn nearest_ahead(&self, session: &GameSession, lane: Lane) -> Option<(f32, ObstacleKind)> {
        let pz = session.player.z;
        session
            .obstacles
            .iter()
            .filter(|o| o.collidable && o.lane == lane)
            .map(|o| (pz - o.z, o.kind))
            .filter(|(ahead, _)| *ahead > -session.config().collision.obstacle_depth)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    fn lane_is_clear(&self, session: &GameSession, lane: Lane) -> bool {
        self.nearest_ahead(session, lane)
            .is_none_or(|(ahead, _)| ahead > self.lookahead)
    }

    pub fn decide(&self, session: &GameSession) -> FrameCommands {
        let mut cmds = FrameCommands::default();
        if !session.state.is_running() {
            return cmds;
        }
        let lanes = *session.lanes();
        let lane = session.player.lane;
        let Some((ahead, kind)) = self.nearest_ahead(session, lane) else {
            return cmds;
        };
        if ahead > self.lookahead {
            return cmds;
        }

        let trigger = session.config().collision.obstacle_depth + session.state.speed * self.lead_frames;
        let running = session.player.vertical.is_running();
        match kind {
            ObstacleKind::Train => {
                let left = lane.checked_sub(1).filter(|&l| self.lane_is_clear(session, l));
                let right = (lane < lanes.last())
                    .then_some(lane + 1)
                    .filter(|&l| self.lane_is_clear(session, l));
                match (left, right) {
                    (Some(_), _) => cmds.insert(Command::MoveLeft),
                    (None, Some(_)) => cmds.insert(Command::MoveRight),
                    (None, None) => {}
                }
            }
            ObstacleKind::Barrier if running && ahead <= trigger => cmds.insert(Command::Slide),
            ObstacleKind::Box | ObstacleKind::Cone if running && ahead <= trigger => {
                cmds.insert(Command::Jump)
            }
            _ => {}
        }
        cmds
    }
}
