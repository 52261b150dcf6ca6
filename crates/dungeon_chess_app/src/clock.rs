// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame clocks.
//!
//! The escort is driven by an external monotonic clock read once per
//! rendered frame. Headless runs use [`FixedStepClock`].

/// A source of per-frame time readings in seconds
pub trait FrameClock {
    /// Advance one frame and return its reading
    fn tick(&mut self) -> f64;

    /// Reading of the most recent tick (0 before the first)
    fn elapsed(&self) -> f64;
}

/// Clock that steps by `1 / frame_rate` every tick, starting at zero.
///
/// Readings are computed from the frame index rather than accumulated,
/// so frame 240 at 60 Hz reads exactly 4.0.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    frame_rate: f64,
    frame_count: u64,
    elapsed_time: f64,
}

impl FixedStepClock {
    /// Create a clock running at `frame_rate` Hz
    pub fn new(frame_rate: f64) -> Self {
        Self {
            frame_rate,
            frame_count: 0,
            elapsed_time: 0.0,
        }
    }

    /// Seconds per frame
    pub fn step(&self) -> f64 {
        1.0 / self.frame_rate
    }

    /// Number of ticks delivered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl FrameClock for FixedStepClock {
    fn tick(&mut self) -> f64 {
        self.elapsed_time = self.frame_count as f64 / self.frame_rate;
        self.frame_count += 1;
        self.elapsed_time
    }

    fn elapsed(&self) -> f64 {
        self.elapsed_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_reads_zero() {
        let mut clock = FixedStepClock::new(30.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame_count(), 1);
        assert!((clock.tick() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_without_drift() {
        let mut clock = FixedStepClock::new(60.0);
        let mut last = -1.0;
        for _ in 0..=240 {
            let now = clock.tick();
            assert!(now > last);
            last = now;
        }
        assert_eq!(clock.elapsed(), 4.0);
        assert!((clock.step() - 1.0 / 60.0).abs() < 1e-12);
    }
}
