//! World geometry recycler: a fixed pool of ground, rail, wall and pillar
//! segments that wrap forward once they scroll behind the camera.

use rand::Rng;

use crate::core::components::LaneLayout;
use crate::core::config::TrackConfig;

const RAIL_OFFSET: f32 = 1.0;
const WALL_OFFSET: f32 = 2.0;
const PILLAR_OFFSET: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Ground,
    Rail,
    LaneLine,
    Wall(Side),
    Pillar(Side),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecycledSegment {
    pub kind: SegmentKind,
    pub x: f32,
    pub z: f32,
}

#[derive(Debug, Clone)]
pub struct TrackRecycler {
    segments: Vec<RecycledSegment>,
    tile_length: f32,
    tiled_length: f32,
    recycle_z: f32,
}

impl TrackRecycler {
    pub fn new<R: Rng>(track: &TrackConfig, lanes: &LaneLayout, rng: &mut R) -> Self {
        let tiles = track.tiles.max(1);
        let mut segments = Vec::new();
        let half = lanes.half_span();
        for i in 0..tiles {
            let z = -(i as f32) * track.tile_length;
            segments.push(RecycledSegment {
                kind: SegmentKind::Ground,
                x: 0.0,
                z,
            });
            for lane in lanes.iter() {
                let cx = lanes.center_x(lane);
                for x in [cx - RAIL_OFFSET, cx + RAIL_OFFSET] {
                    segments.push(RecycledSegment {
                        kind: SegmentKind::Rail,
                        x,
                        z,
                    });
                }
            }
            for lane in 1..lanes.count {
                segments.push(RecycledSegment {
                    kind: SegmentKind::LaneLine,
                    x: lanes.divider_x(lane),
                    z,
                });
            }
            for side in [Side::Left, Side::Right] {
                segments.push(RecycledSegment {
                    kind: SegmentKind::Wall(side),
                    x: side.sign() * (half + WALL_OFFSET),
                    z,
                });
            }
            for p in 0..track.pillars_per_tile {
                let side = if rng.gen_bool(0.5) { Side::Left } else { Side::Right };
                segments.push(RecycledSegment {
                    kind: SegmentKind::Pillar(side),
                    x: side.sign() * (half + PILLAR_OFFSET),
                    z: z - p as f32 * track.pillar_spacing,
                });
            }
        }
        Self {
            segments,
            tile_length: track.tile_length,
            tiled_length: tiles as f32 * track.tile_length,
            recycle_z: track.recycle_z,
        }
    }

    /// Scrolls every segment by `speed`; returns how many wrapped this frame.
    pub fn advance(&mut self, speed: f32) -> usize {
        let mut wrapped = 0;
        for seg in &mut self.segments {
            seg.z += speed;
            if seg.z > self.recycle_z {
                seg.z -= self.tiled_length;
                wrapped += 1;
            }
        }
        wrapped
    }

    pub fn segments(&self) -> &[RecycledSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn tile_length(&self) -> f32 {
        self.tile_length
    }

    pub fn tiled_length(&self) -> f32 {
        self.tiled_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn recycler() -> TrackRecycler {
        let cfg = TrackConfig::default();
        let lanes = LaneLayout::from_track(&cfg);
        TrackRecycler::new(&cfg, &lanes, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn pool_layout_matches_config() {
        let t = recycler();
        // per tile: ground + 6 rails + 2 lane lines + 2 walls + 10 pillars
        assert_eq!(t.len(), 3 * (1 + 6 + 2 + 2 + 10));
        assert_eq!(t.tiled_length(), 600.0);
        let pillars = t
            .segments()
            .iter()
            .filter(|s| matches!(s.kind, SegmentKind::Pillar(_)))
            .count();
        assert_eq!(pillars, 30);
    }

    #[test]
    fn segments_wrap_and_pool_never_changes() {
        let mut t = recycler();
        let kinds: Vec<_> = t.segments().iter().map(|s| s.kind).collect();
        let mut wrapped = 0;
        for _ in 0..5_000 {
            wrapped += t.advance(0.63);
            assert!(t.segments().iter().all(|s| s.z <= 50.0 && s.z > 50.0 - 600.0 - 1.0));
        }
        assert!(wrapped > 0);
        let after: Vec<_> = t.segments().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, after);
    }

    #[test]
    fn wrap_subtracts_total_length() {
        let mut t = recycler();
        let ground0 = t.segments()[0].z;
        assert_eq!(ground0, 0.0);
        // 51 units puts the first ground tile past the threshold
        t.advance(51.0);
        assert_eq!(t.segments()[0].z, 51.0 - 600.0);
    }
}
