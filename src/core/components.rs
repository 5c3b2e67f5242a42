use serde::Serialize;
use std::time::Duration;

use crate::core::config::TrackConfig;

/// Index of a lane, `0..lane_count`.
pub type Lane = usize;

/// Lane count and width; maps lanes to world x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneLayout {
    pub count: usize,
    pub width: f32,
}

impl LaneLayout {
    pub fn new(count: usize, width: f32) -> Self {
        Self {
            count: count.max(1),
            width,
        }
    }

    pub fn from_track(track: &TrackConfig) -> Self {
        Self::new(track.lanes, track.lane_width)
    }

    pub fn last(&self) -> Lane {
        self.count - 1
    }

    pub fn clamp(&self, lane: Lane) -> Lane {
        lane.min(self.last())
    }

    pub fn center_x(&self, lane: Lane) -> f32 {
        lane as f32 * self.width - (self.width * self.count as f32) / 2.0 + self.width / 2.0
    }

    /// x of the divider between `lane - 1` and `lane`.
    pub fn divider_x(&self, lane: Lane) -> f32 {
        self.center_x(lane) - self.width / 2.0
    }

    /// Half the corridor width.
    pub fn half_span(&self) -> f32 {
        self.width * self.count as f32 / 2.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Lane> {
        0..self.count
    }
}

/// Vertical state of the player. Jump and slide carry the clock time they began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalState {
    #[default]
    Running,
    Jumping { since: Duration },
    Sliding { since: Duration },
}

impl VerticalState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
    pub fn is_jumping(&self) -> bool {
        matches!(self, Self::Jumping { .. })
    }
    pub fn is_sliding(&self) -> bool {
        matches!(self, Self::Sliding { .. })
    }
    pub fn started_at(&self) -> Option<Duration> {
        match *self {
            Self::Running => None,
            Self::Jumping { since } | Self::Sliding { since } => Some(since),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObstacleKind {
    Box,
    Barrier,
    Cone,
    Train,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [Self::Box, Self::Barrier, Self::Cone, Self::Train];

    /// Whether touching this obstacle in the given vertical state ends the run.
    pub fn is_fatal_for(self, vertical: &VerticalState) -> bool {
        match self {
            Self::Train => true,
            Self::Barrier => !vertical.is_sliding(),
            Self::Box | Self::Cone => !vertical.is_jumping(),
        }
    }
}

/// Opaque id handed out by the presentation layer for a spawned visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: Lane,
    pub kind: ObstacleKind,
    pub z: f32,
    /// Cleared once the obstacle has passed through the player's fatal window.
    pub collidable: bool,
    pub visual: VisualHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub lane: Lane,
    pub z: f32,
    pub collected: bool,
    pub visual: VisualHandle,
}

/// A collected coin playing its shrink/rise animation before removal.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinBurst {
    pub lane: Lane,
    pub z: f32,
    /// 0.0 at collection, removed at 1.0.
    pub progress: f32,
    pub visual: VisualHandle,
}

/// Session-wide scoreboard and progression.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub is_playing: bool,
    pub is_paused: bool,
    pub score: f64,
    pub coins: u32,
    pub speed: f32,
    pub difficulty: u32,
}

impl GameState {
    pub fn new(base_speed: f32) -> Self {
        Self {
            is_playing: false,
            is_paused: false,
            score: 0.0,
            coins: 0,
            speed: base_speed,
            difficulty: 1,
        }
    }

    /// Playing and not paused: frames advance the simulation.
    pub fn is_running(&self) -> bool {
        self.is_playing && !self.is_paused
    }

    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_centers_are_symmetric() {
        let lanes = LaneLayout::new(3, 3.0);
        assert_eq!(lanes.center_x(0), -3.0);
        assert_eq!(lanes.center_x(1), 0.0);
        assert_eq!(lanes.center_x(2), 3.0);
        assert_eq!(lanes.divider_x(1), -1.5);
        assert_eq!(lanes.clamp(9), 2);
    }

    #[test]
    fn fatality_table() {
        let run = VerticalState::Running;
        let jump = VerticalState::Jumping { since: Duration::ZERO };
        let slide = VerticalState::Sliding { since: Duration::ZERO };
        assert!(ObstacleKind::Train.is_fatal_for(&jump));
        assert!(ObstacleKind::Train.is_fatal_for(&slide));
        assert!(!ObstacleKind::Barrier.is_fatal_for(&slide));
        assert!(ObstacleKind::Barrier.is_fatal_for(&jump));
        assert!(!ObstacleKind::Box.is_fatal_for(&jump));
        assert!(ObstacleKind::Cone.is_fatal_for(&slide));
        assert!(ObstacleKind::Cone.is_fatal_for(&run));
    }
}
