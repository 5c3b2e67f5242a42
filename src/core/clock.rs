//! Time sources for the wall-clock timers (jump, slide, ambient loop).
//! Frame-counted logic never reads a clock.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Real time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand; used by tests and the headless runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// A frozen reading, e.g. a frame's `Time<Real>::elapsed()` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInstant(pub Duration);

impl Clock for FixedInstant {
    fn now(&self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let mut c = ManualClock::new();
        c.advance_ms(250);
        c.advance(Duration::from_millis(50));
        assert_eq!(c.now(), Duration::from_millis(300));
        c.set(Duration::from_secs(2));
        assert_eq!(c.now().as_millis(), 2000);
    }
}
