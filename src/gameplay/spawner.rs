use rand::Rng;

use crate::core::components::{Lane, LaneLayout, ObstacleKind};
use crate::core::config::{CoinRunConfig, SpawnConfig};

/// One obstacle plus the coin runs laid in every other lane.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnCluster {
    pub obstacle_lane: Lane,
    pub kind: ObstacleKind,
    pub z: f32,
    pub coins: Vec<(Lane, f32)>,
}

pub fn build_cluster<R: Rng>(
    rng: &mut R,
    lanes: &LaneLayout,
    z: f32,
    run: &CoinRunConfig,
) -> SpawnCluster {
    let obstacle_lane = rng.gen_range(0..lanes.count);
    let kind = ObstacleKind::ALL[rng.gen_range(0..ObstacleKind::ALL.len())];
    let coins = lanes
        .iter()
        .filter(|&lane| lane != obstacle_lane)
        .flat_map(|lane| {
            (0..run.count).map(move |i| (lane, z - run.offset - i as f32 * run.spacing))
        })
        .collect();
    SpawnCluster {
        obstacle_lane,
        kind,
        z,
        coins,
    }
}

/// Frame-counted spawn cadence.
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    timer: u32,
    fired: u64,
}

impl Spawner {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clusters produced since the last reset.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Counts one frame; fires a cluster ahead of the player when the
    /// interval elapses.
    pub fn tick<R: Rng>(
        &mut self,
        rng: &mut R,
        cfg: &SpawnConfig,
        lanes: &LaneLayout,
        player_z: f32,
    ) -> Option<SpawnCluster> {
        self.timer += 1;
        if self.timer < cfg.interval_frames.max(1) {
            return None;
        }
        self.timer = 0;
        self.fired += 1;
        Some(build_cluster(
            rng,
            lanes,
            player_z - cfg.distance_ahead,
            &cfg.coins,
        ))
    }

    /// Clusters laid down at session start, at fixed distances ahead of the origin.
    pub fn initial_clusters<R: Rng>(
        rng: &mut R,
        cfg: &SpawnConfig,
        lanes: &LaneLayout,
    ) -> Vec<SpawnCluster> {
        (0..cfg.initial_clusters)
            .map(|i| {
                let z = -(cfg.initial_first + i as f32 * cfg.initial_spacing);
                build_cluster(rng, lanes, z, &cfg.initial_coins)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn fires_on_interval() {
        let cfg = SpawnConfig::default();
        let lanes = LaneLayout::new(3, 3.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = Spawner::default();
        let frames: Vec<u32> = (1..=180)
            .filter(|_| s.tick(&mut rng, &cfg, &lanes, 5.0).is_some())
            .collect();
        assert_eq!(frames, vec![60, 120, 180]);
        assert_eq!(s.fired(), 3);
    }

    #[test]
    fn zero_interval_fires_every_frame() {
        let cfg = SpawnConfig {
            interval_frames: 0,
            ..Default::default()
        };
        let lanes = LaneLayout::new(3, 3.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = Spawner::default();
        for _ in 0..5 {
            assert!(s.tick(&mut rng, &cfg, &lanes, 5.0).is_some());
        }
    }

    #[test]
    fn coins_avoid_the_obstacle_lane() {
        let lanes = LaneLayout::new(3, 3.0);
        let run = CoinRunConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let c = build_cluster(&mut rng, &lanes, -35.0, &run);
            assert!(c.obstacle_lane < 3);
            assert_eq!(c.coins.len(), 2 * run.count);
            assert!(c.coins.iter().all(|&(lane, z)| lane != c.obstacle_lane && z < c.z));
        }
    }

    #[test]
    fn initial_clusters_use_fixed_offsets() {
        let cfg = SpawnConfig::default();
        let lanes = LaneLayout::new(3, 3.0);
        let mut rng = StdRng::seed_from_u64(5);
        let clusters = Spawner::initial_clusters(&mut rng, &cfg, &lanes);
        let zs: Vec<f32> = clusters.iter().map(|c| c.z).collect();
        assert_eq!(zs, vec![-15.0, -27.0, -39.0]);
        let first_run: Vec<f32> = clusters[0].coins.iter().take(3).map(|&(_, z)| z).collect();
        assert_eq!(first_run, vec![-18.0, -21.0, -24.0]);
    }

    #[test]
    fn single_lane_cluster_has_no_coins() {
        let lanes = LaneLayout::new(1, 3.0);
        let mut rng = StdRng::seed_from_u64(2);
        let c = build_cluster(&mut rng, &lanes, -10.0, &CoinRunConfig::default());
        assert_eq!(c.obstacle_lane, 0);
        assert!(c.coins.is_empty());
    }
}
