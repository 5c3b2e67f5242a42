use bevy::prelude::Resource;

use crate::core::config::AudioConfig;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AudioSettings {
    /// Clamped to `0.0..=1.0`.
    pub master_volume: f32,
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self::from_config(&AudioConfig::default())
    }
}

impl AudioSettings {
    pub fn from_config(cfg: &AudioConfig) -> Self {
        Self {
            master_volume: cfg.master_volume.clamp(0.0, 1.0),
            sound_enabled: cfg.sound_enabled,
            music_enabled: cfg.music_enabled,
        }
    }

    /// Returns the new state.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Returns the new state. Turning music off also stops the loop (see `AudioDirector::due`).
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.master_volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    /// Linear output gain for a tone's relative gain.
    pub fn gain(&self, relative: f32) -> f32 {
        self.master_volume * relative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        let mut s = AudioSettings::default();
        assert_eq!(s.master_volume, 0.3);
        s.set_volume(3.0);
        assert_eq!(s.master_volume, 1.0);
        s.set_volume(-1.0);
        assert_eq!(s.master_volume, 0.0);
        s.set_volume(f32::NAN);
        assert_eq!(s.master_volume, 0.0);
    }

    #[test]
    fn toggles_report_new_state() {
        let mut s = AudioSettings::default();
        assert!(!s.toggle_sound());
        assert!(s.toggle_sound());
        assert!(!s.toggle_music());
        assert!((s.gain(0.4) - 0.12).abs() < 1e-6);
    }
}
