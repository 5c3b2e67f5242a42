//! Obstacle and coin movement, overlap tests, coin collection and the
//! collect animation that follows it.

use crate::core::components::{
    Coin, CoinBurst, GameState, Lane, LaneLayout, Obstacle, ObstacleKind, VerticalState,
};
use crate::core::config::CollisionConfig;
use crate::gameplay::collaborators::{Cue, Host, Presentation};
use crate::gameplay::player::Player;

/// The parts of the player the overlap tests read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub x: f32,
    pub z: f32,
    pub vertical: VerticalState,
}

impl Probe {
    pub fn of(player: &Player) -> Self {
        Self {
            x: player.x,
            z: player.z,
            vertical: player.vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub kind: ObstacleKind,
    pub lane: Lane,
    pub z: f32,
}

/// Strict on both axes: exactly `depth` or `lateral` apart is a miss.
pub fn overlaps(dz: f32, dx: f32, depth: f32, lateral: f32) -> bool {
    dz.abs() < depth && dx.abs() < lateral
}

/// Moves every obstacle toward the player, drops those left behind, and
/// returns the first fatal contact. Obstacles after a hit are not advanced.
pub fn update_obstacles<P: Presentation + ?Sized>(
    obstacles: &mut Vec<Obstacle>,
    speed: f32,
    probe: &Probe,
    lanes: &LaneLayout,
    limits: &CollisionConfig,
    despawn_margin: f32,
    presentation: &mut P,
) -> Option<Hit> {
    let mut i = 0;
    while i < obstacles.len() {
        let z = {
            let ob = &mut obstacles[i];
            ob.z += speed;
            ob.z
        };
        if z > probe.z + despawn_margin {
            let gone = obstacles.remove(i);
            presentation.remove_visual(gone.visual);
            continue;
        }

        let ob = &mut obstacles[i];
        if ob.collidable {
            let dz = ob.z - probe.z;
            let dx = lanes.center_x(ob.lane) - probe.x;
            if overlaps(dz, dx, limits.obstacle_depth, limits.obstacle_lateral) {
                if ob.kind.is_fatal_for(&probe.vertical) {
                    return Some(Hit {
                        kind: ob.kind,
                        lane: ob.lane,
                        z: ob.z,
                    });
                }
            } else if dz >= limits.obstacle_depth {
                ob.collidable = false;
            }
        }
        i += 1;
    }
    None
}

/// Credits an uncollected coin. Returns false if it was already taken.
pub fn try_collect(coin: &mut Coin, state: &mut GameState, coin_value: f64) -> bool {
    if coin.collected {
        return false;
    }
    coin.collected = true;
    state.coins += 1;
    state.score += coin_value;
    true
}

/// Moves coins, collects the ones the player overlaps, and drops those left
/// behind. Returns the collect animations started this frame.
#[allow(clippy::too_many_arguments)]
pub fn update_coins<H: Host + ?Sized>(
    coins: &mut Vec<Coin>,
    speed: f32,
    probe: &Probe,
    lanes: &LaneLayout,
    limits: &CollisionConfig,
    despawn_margin: f32,
    coin_value: f64,
    state: &mut GameState,
    host: &mut H,
) -> Vec<CoinBurst> {
    let mut bursts = Vec::new();
    let mut i = 0;
    while i < coins.len() {
        coins[i].z += speed;
        if coins[i].z > probe.z + despawn_margin {
            let gone = coins.remove(i);
            host.remove_visual(gone.visual);
            continue;
        }

        let coin = &mut coins[i];
        let dz = coin.z - probe.z;
        let dx = lanes.center_x(coin.lane) - probe.x;
        if overlaps(dz, dx, limits.coin_depth, limits.coin_lateral)
            && try_collect(coin, state, coin_value)
        {
            host.cue(Cue::Coin);
            host.play_collect_animation(coin.visual);
            bursts.push(CoinBurst {
                lane: coin.lane,
                z: coin.z,
                progress: 0.0,
                visual: coin.visual,
            });
            coins.remove(i);
            continue;
        }
        i += 1;
    }
    bursts
}

/// Advances collect animations; finished ones release their visual.
pub fn advance_bursts<P: Presentation + ?Sized>(
    bursts: &mut Vec<CoinBurst>,
    speed: f32,
    step: f32,
    presentation: &mut P,
) {
    bursts.retain_mut(|b| {
        b.z += speed;
        b.progress += step;
        if b.progress >= 1.0 || step <= 0.0 {
            presentation.remove_visual(b.visual);
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::VisualHandle;
    use crate::gameplay::collaborators::RecordingHost;
    use std::time::Duration;

    fn lanes() -> LaneLayout {
        LaneLayout::new(3, 3.0)
    }

    fn probe(vertical: VerticalState) -> Probe {
        Probe {
            x: 0.0,
            z: 5.0,
            vertical,
        }
    }

    fn obstacle(kind: ObstacleKind, lane: Lane, z: f32) -> Obstacle {
        Obstacle {
            lane,
            kind,
            z,
            collidable: true,
            visual: VisualHandle(1),
        }
    }

    #[test]
    fn window_edges_are_exclusive() {
        let e = 1e-4;
        assert!(overlaps(2.5 - e, 0.0, 2.5, 1.2));
        assert!(!overlaps(2.5, 0.0, 2.5, 1.2));
        assert!(!overlaps(-2.5, 0.0, 2.5, 1.2));
        assert!(overlaps(0.0, 1.2 - e, 2.5, 1.2));
        assert!(!overlaps(0.0, 1.2, 2.5, 1.2));
        assert!(!overlaps(0.0, -1.2 - e, 2.5, 1.2));
    }

    #[test]
    fn box_hits_runner_but_not_jumper() {
        let limits = CollisionConfig::default();
        let mut host = RecordingHost::new();
        let mut obs = vec![obstacle(ObstacleKind::Box, 1, 4.0)];
        let hit = update_obstacles(
            &mut obs,
            0.35,
            &probe(VerticalState::Running),
            &lanes(),
            &limits,
            5.0,
            &mut host,
        );
        assert_eq!(hit.map(|h| h.kind), Some(ObstacleKind::Box));

        let mut obs = vec![obstacle(ObstacleKind::Box, 1, 4.0)];
        let airborne = probe(VerticalState::Jumping {
            since: Duration::ZERO,
        });
        let hit = update_obstacles(&mut obs, 0.35, &airborne, &lanes(), &limits, 5.0, &mut host);
        assert!(hit.is_none());
    }

    #[test]
    fn barrier_only_spares_sliders_and_train_spares_nobody() {
        let limits = CollisionConfig::default();
        let mut host = RecordingHost::new();
        let slide = probe(VerticalState::Sliding {
            since: Duration::ZERO,
        });
        let jump = probe(VerticalState::Jumping {
            since: Duration::ZERO,
        });
        let mut obs = vec![obstacle(ObstacleKind::Barrier, 1, 5.0)];
        assert!(update_obstacles(&mut obs, 0.0, &slide, &lanes(), &limits, 5.0, &mut host).is_none());
        let mut obs = vec![obstacle(ObstacleKind::Barrier, 1, 5.0)];
        assert!(update_obstacles(&mut obs, 0.0, &jump, &lanes(), &limits, 5.0, &mut host).is_some());
        let mut obs = vec![obstacle(ObstacleKind::Train, 1, 5.0)];
        assert!(update_obstacles(&mut obs, 0.0, &slide, &lanes(), &limits, 5.0, &mut host).is_some());
    }

    #[test]
    fn other_lane_is_safe_and_passed_obstacles_despawn() {
        let limits = CollisionConfig::default();
        let mut host = RecordingHost::new();
        let run = probe(VerticalState::Running);
        let mut obs = vec![obstacle(ObstacleKind::Train, 0, 0.0)];
        for _ in 0..40 {
            assert!(update_obstacles(&mut obs, 0.35, &run, &lanes(), &limits, 5.0, &mut host).is_none());
        }
        assert!(obs.is_empty());
        assert_eq!(host.removed, vec![VisualHandle(1)]);
    }

    #[test]
    fn cleared_obstacle_stops_colliding() {
        let limits = CollisionConfig::default();
        let mut host = RecordingHost::new();
        let mut obs = vec![obstacle(ObstacleKind::Cone, 1, 7.4)];
        let jump = probe(VerticalState::Jumping {
            since: Duration::ZERO,
        });
        assert!(update_obstacles(&mut obs, 0.2, &jump, &lanes(), &limits, 5.0, &mut host).is_none());
        assert!(!obs[0].collidable);
        // landing while the cone is still near does not end the run
        let run = probe(VerticalState::Running);
        assert!(update_obstacles(&mut obs, 0.0, &run, &lanes(), &limits, 5.0, &mut host).is_none());
    }

    #[test]
    fn collect_is_idempotent() {
        let mut state = GameState::new(0.35);
        let mut coin = Coin {
            lane: 1,
            z: 5.0,
            collected: false,
            visual: VisualHandle(7),
        };
        assert!(try_collect(&mut coin, &mut state, 10.0));
        assert!(!try_collect(&mut coin, &mut state, 10.0));
        assert_eq!(state.coins, 1);
        assert_eq!(state.score, 10.0);
    }

    #[test]
    fn coins_collect_once_and_animate_out() {
        let limits = CollisionConfig::default();
        let mut host = RecordingHost::new();
        let mut state = GameState::new(0.35);
        let mut coins = vec![
            Coin {
                lane: 1,
                z: 4.0,
                collected: false,
                visual: VisualHandle(3),
            },
            Coin {
                lane: 2,
                z: 4.0,
                collected: false,
                visual: VisualHandle(4),
            },
        ];
        let run = probe(VerticalState::Running);
        let mut bursts = update_coins(
            &mut coins, 0.35, &run, &lanes(), &limits, 5.0, 10.0, &mut state, &mut host,
        );
        assert_eq!(bursts.len(), 1);
        assert_eq!(coins.len(), 1);
        assert_eq!(state.coins, 1);
        assert_eq!(host.cue_count(Cue::Coin), 1);
        assert_eq!(host.collect_animations, vec![VisualHandle(3)]);

        for _ in 0..9 {
            advance_bursts(&mut bursts, 0.35, 0.1, &mut host);
        }
        assert_eq!(bursts.len(), 1);
        advance_bursts(&mut bursts, 0.35, 0.1, &mut host);
        assert!(bursts.is_empty());
        assert!(host.removed.contains(&VisualHandle(3)));
    }

    fn coin_at(lane: Lane, z: f32) -> Coin {
        Coin {
            lane,
            z,
            collected: false,
            visual: VisualHandle(9),
        }
    }

    /// Runs one frame for a coin that ends `dz`/`dx` away from the runner
    /// and reports the coin count and cues.
    fn collect_at_offset(dz: f32, dx: f32) -> (u32, usize) {
        let limits = CollisionConfig::default();
        let speed = 0.35;
        let mut host = RecordingHost::new();
        let mut state = GameState::new(speed);
        let mut run = probe(VerticalState::Running);
        run.x = -dx;
        let mut coins = vec![coin_at(1, run.z + dz - speed)];
        update_coins(
            &mut coins, speed, &run, &lanes(), &limits, 5.0, 10.0, &mut state, &mut host,
        );
        (state.coins, host.cue_count(Cue::Coin))
    }

    #[test]
    fn coin_window_edges_follow_coin_limits() {
        let limits = CollisionConfig::default();
        let e = 1e-3;
        assert_eq!(collect_at_offset(0.0, limits.coin_lateral - e), (1, 1));
        assert_eq!(collect_at_offset(0.0, limits.coin_lateral + e), (0, 0));
        assert_eq!(collect_at_offset(0.0, -(limits.coin_lateral - e)), (1, 1));
        assert_eq!(collect_at_offset(0.0, -(limits.coin_lateral + e)), (0, 0));
        assert_eq!(collect_at_offset(-(limits.coin_depth - e), 0.0), (1, 1));
        assert_eq!(collect_at_offset(-(limits.coin_depth + e), 0.0), (0, 0));
        assert_eq!(collect_at_offset(limits.coin_depth - e, 0.0), (1, 1));
        assert_eq!(collect_at_offset(limits.coin_depth + e, 0.0), (0, 0));
    }

    #[test]
    fn coins_past_the_margin_despawn_before_collection() {
        let limits = CollisionConfig {
            coin_depth: 6.0,
            ..CollisionConfig::default()
        };
        let mut host = RecordingHost::new();
        let mut state = GameState::new(0.35);
        let run = probe(VerticalState::Running);
        // ends the frame 5.15 behind: inside the coin window, past the margin
        let mut coins = vec![coin_at(1, run.z + 4.8)];
        let bursts = update_coins(
            &mut coins, 0.35, &run, &lanes(), &limits, 5.0, 10.0, &mut state, &mut host,
        );
        assert!(bursts.is_empty());
        assert!(coins.is_empty());
        assert_eq!(state.coins, 0);
        assert_eq!(host.removed, vec![VisualHandle(9)]);
    }
}
