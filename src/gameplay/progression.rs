use crate::core::components::GameState;
use crate::core::config::{ScoringConfig, SpeedConfig};

/// Score milestones and the speed/difficulty steps they trigger.
#[derive(Debug, Clone, Default)]
pub struct Progression {
    reached: u64,
}

impl Progression {
    pub fn reset(&mut self) {
        self.reached = 0;
    }

    pub fn milestones(&self) -> u64 {
        self.reached
    }

    /// Adds the per-frame score, then applies every milestone multiple the
    /// score has crossed since the last call. Returns how many were crossed.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        scoring: &ScoringConfig,
        speed: &SpeedConfig,
    ) -> u32 {
        state.score += scoring.per_frame;
        if speed.milestone_score <= 0.0 {
            return 0;
        }
        let target = (state.score / speed.milestone_score).floor().max(0.0) as u64;
        let mut crossed = 0;
        while self.reached < target {
            self.reached += 1;
            state.speed = (state.speed + speed.milestone_increment).min(speed.cap());
            state.difficulty += 1;
            crossed += 1;
        }
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_per_multiple() {
        let speed = SpeedConfig::default();
        let scoring = ScoringConfig::default();
        let mut state = GameState::new(speed.base);
        let mut p = Progression::default();
        let crossed: u32 = (0..499).map(|_| p.advance(&mut state, &scoring, &speed)).sum();
        assert_eq!(crossed, 0);
        assert_eq!(p.advance(&mut state, &scoring, &speed), 1);
        assert!((state.speed - (speed.base + speed.milestone_increment)).abs() < 1e-6);
        assert_eq!(state.difficulty, 2);
        assert_eq!(p.advance(&mut state, &scoring, &speed), 0);
    }

    #[test]
    fn coin_jump_past_a_multiple_still_counts() {
        let speed = SpeedConfig::default();
        let scoring = ScoringConfig::default();
        let mut state = GameState::new(speed.base);
        let mut p = Progression::default();
        state.score = 495.0;
        // a coin lands the score on 505 without passing through 500 exactly
        state.score += 10.0;
        assert_eq!(p.advance(&mut state, &scoring, &speed), 1);
        state.score = 1_600.0;
        assert_eq!(p.advance(&mut state, &scoring, &speed), 2);
        assert_eq!(p.milestones(), 3);
    }

    #[test]
    fn speed_never_exceeds_cap() {
        let speed = SpeedConfig::default();
        let scoring = ScoringConfig::default();
        let mut state = GameState::new(speed.base);
        let mut p = Progression::default();
        for _ in 0..100_000 {
            p.advance(&mut state, &scoring, &speed);
            assert!(state.speed <= speed.cap());
        }
        assert!((state.speed - speed.cap()).abs() < 1e-6);
    }
}
