use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Rail Runner".into(),
        }
    }
}

/// Corridor geometry: lane layout plus the recycled tile pool.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrackConfig {
    pub lanes: usize,
    pub lane_width: f32,
    /// Number of tiles in the pool; pool size never changes after startup.
    pub tiles: usize,
    pub tile_length: f32,
    /// A tile wraps forward once its z passes this value.
    pub recycle_z: f32,
    pub pillars_per_tile: usize,
    pub pillar_spacing: f32,
}
impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            lanes: 3,
            lane_width: 3.0,
            tiles: 3,
            tile_length: 200.0,
            recycle_z: 50.0,
            pillars_per_tile: 10,
            pillar_spacing: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_lane: usize,
    /// Fixed z of the player; the world scrolls past it.
    pub z: f32,
    pub base_height: f32,
    /// Fraction of the remaining lateral gap closed each frame.
    pub lateral_ease: f32,
    pub jump_height: f32,
    pub jump_duration_ms: u64,
    pub slide_duration_ms: u64,
    pub slide_height: f32,
    pub slide_scale: f32,
    pub bob_step: f32,
    pub bob_amplitude: f32,
    pub tilt_amplitude: f32,
    pub lean: f32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_lane: 1,
            z: 5.0,
            base_height: 1.0,
            lateral_ease: 0.15,
            jump_height: 3.0,
            jump_duration_ms: 600,
            slide_duration_ms: 500,
            slide_height: 0.5,
            slide_scale: 0.5,
            bob_step: 0.15,
            bob_amplitude: 0.05,
            tilt_amplitude: 0.05,
            lean: -0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpeedConfig {
    /// World units scrolled per frame at session start.
    pub base: f32,
    /// Cap expressed as a multiple of `base`.
    pub max_multiplier: f32,
    pub milestone_increment: f32,
    /// Score interval between milestones.
    pub milestone_score: f64,
}
impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base: 0.35,
            max_multiplier: 1.8,
            milestone_increment: 0.02,
            milestone_score: 500.0,
        }
    }
}
impl SpeedConfig {
    pub fn cap(&self) -> f32 {
        self.base * self.max_multiplier
    }

    /// Speed at session start, never above the cap.
    pub fn start_speed(&self) -> f32 {
        self.base.min(self.cap())
    }
}

/// Offsets of a coin run behind its obstacle: `z - offset - i * spacing`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CoinRunConfig {
    pub count: usize,
    pub offset: f32,
    pub spacing: f32,
}
impl Default for CoinRunConfig {
    fn default() -> Self {
        Self {
            count: 4,
            offset: 2.0,
            spacing: 3.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub interval_frames: u32,
    /// Distance ahead of the player at which timed clusters appear.
    pub distance_ahead: f32,
    pub coins: CoinRunConfig,
    pub initial_clusters: usize,
    /// Distance ahead of the origin for the first seeded cluster.
    pub initial_first: f32,
    pub initial_spacing: f32,
    pub initial_coins: CoinRunConfig,
    /// Entities further than this behind the player are dropped.
    pub despawn_margin: f32,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_frames: 60,
            distance_ahead: 40.0,
            coins: CoinRunConfig::default(),
            initial_clusters: 3,
            initial_first: 15.0,
            initial_spacing: 12.0,
            initial_coins: CoinRunConfig {
                count: 3,
                offset: 3.0,
                spacing: 3.0,
            },
            despawn_margin: 5.0,
        }
    }
}

/// Half-extents of the overlap windows (strict `<` comparisons).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    pub obstacle_depth: f32,
    pub obstacle_lateral: f32,
    pub coin_depth: f32,
    pub coin_lateral: f32,
}
impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            obstacle_depth: 2.5,
            obstacle_lateral: 1.2,
            coin_depth: 2.0,
            coin_lateral: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub per_frame: f64,
    pub coin_value: f64,
    /// Collect animation progress added per frame; the burst ends at 1.0.
    pub collect_anim_step: f32,
}
impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_frame: 1.0,
            coin_value: 10.0,
            collect_anim_step: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub master_volume: f32,
    pub sound_enabled: bool,
    pub music_enabled: bool,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.3,
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RunnerConfig {
    pub window: WindowConfig,
    pub track: TrackConfig,
    pub player: PlayerConfig,
    pub speed: SpeedConfig,
    pub spawn: SpawnConfig,
    pub collision: CollisionConfig,
    pub scoring: ScoringConfig,
    pub audio: AudioConfig,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl RunnerConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Deep-merges the RON files in order (later files win) and deserializes the result.
    /// Returns the config, the paths actually used, and any read/parse errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (RunnerConfig::default(), used, errors);
        };
        match val.into_rust::<RunnerConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (RunnerConfig::default(), used, errors)
            }
        }
    }

    /// Returns warnings for values that will misbehave at runtime. Never fails.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.track.lanes == 0 {
            w.push("track.lanes is 0; the player has nowhere to run".into());
        }
        if self.track.lanes == 1 {
            w.push("track.lanes is 1; every obstacle is unavoidable by lane change and no coins spawn".into());
        }
        if self.track.lane_width <= 0.0 {
            w.push("track.lane_width must be > 0".into());
        }
        if self.player.start_lane >= self.track.lanes.max(1) {
            w.push(format!(
                "player.start_lane {} outside 0..{} -> clamped",
                self.player.start_lane, self.track.lanes
            ));
        }
        if self.track.tiles == 0 || self.track.tile_length <= 0.0 {
            w.push("track.tiles and track.tile_length must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.player.lateral_ease) || self.player.lateral_ease == 0.0 {
            w.push(format!(
                "player.lateral_ease {} outside (0, 1]; lane changes will not converge",
                self.player.lateral_ease
            ));
        }
        if self.player.jump_duration_ms == 0 || self.player.slide_duration_ms == 0 {
            w.push("jump/slide durations of 0 ms end the move on the same frame".into());
        }
        if self.speed.base <= 0.0 {
            w.push(format!("speed.base {} must be > 0", self.speed.base));
        }
        if self.speed.max_multiplier < 1.0 {
            w.push(format!(
                "speed.max_multiplier {} < 1 caps speed below the base speed",
                self.speed.max_multiplier
            ));
        }
        if self.speed.milestone_score <= 0.0 {
            w.push("speed.milestone_score must be > 0; milestones disabled".into());
        }
        if self.spawn.interval_frames == 0 {
            w.push("spawn.interval_frames is 0 -> treated as 1".into());
        }
        let min_gap = self.spawn.interval_frames as f32 * self.speed.base;
        if min_gap < self.collision.obstacle_depth * 2.0 {
            w.push(format!(
                "spawn spacing {:.2} shorter than the fatal window {:.2}; obstacles may overlap in it",
                min_gap,
                self.collision.obstacle_depth * 2.0
            ));
        }
        if self.collision.obstacle_lateral * 2.0 >= self.track.lane_width {
            w.push(format!(
                "collision.obstacle_lateral {} reaches into neighbouring lanes (lane_width {})",
                self.collision.obstacle_lateral, self.track.lane_width
            ));
        }
        if self.collision.coin_depth > self.collision.obstacle_depth {
            w.push("collision.coin_depth larger than obstacle_depth".into());
        }
        if self.scoring.collect_anim_step <= 0.0 {
            w.push("scoring.collect_anim_step must be > 0; bursts would never finish".into());
        }
        if !(0.0..=1.0).contains(&self.audio.master_volume) {
            w.push(format!(
                "audio.master_volume {} outside 0..1 -> clamped",
                self.audio.master_volume
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let cfg = RunnerConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert!((cfg.speed.cap() - 0.63).abs() < 1e-6);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg: RunnerConfig = ron::from_str("(track: (lanes: 5), seed: Some(7))").unwrap();
        assert_eq!(cfg.track.lanes, 5);
        assert_eq!(cfg.track.lane_width, 3.0);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.player, PlayerConfig::default());
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = RunnerConfig::default();
        cfg.track.lanes = 0;
        cfg.speed.base = 0.0;
        cfg.audio.master_volume = 3.0;
        let w = cfg.validate();
        assert!(w.iter().any(|m| m.contains("track.lanes is 0")));
        assert!(w.iter().any(|m| m.contains("speed.base")));
        assert!(w.iter().any(|m| m.contains("master_volume")));
    }
}
