// SPDX-License-Identifier: MIT OR Apache-2.0
//! Escort phases and their timings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timing validation errors
#[derive(Debug, Error, PartialEq)]
pub enum TimingError {
    /// A duration is negative, NaN or infinite
    #[error("{name} must be a finite, non-negative number of seconds (got {value})")]
    InvalidDuration {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Every phase has zero length
    #[error("Escort sequence has zero total duration")]
    ZeroTotal,

    /// The door must finish opening before the return phase starts
    #[error("Door finishes opening at {opened_at}s, after the return phase starts at {return_start}s")]
    DoorOpensTooLate {
        /// Time the door reaches fully open
        opened_at: f32,
        /// Start of the return phase
        return_start: f32,
    },

    /// Hide fraction outside [0,1]
    #[error("Hide fraction must be within [0, 1] (got {0})")]
    InvalidHideFraction(f32),
}

/// Result type for timing validation
pub type Result<T> = std::result::Result<T, TimingError>;

/// Phase of the escort timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscortPhase {
    /// Guard walks from its post to the captured piece; the cell door opens
    Approach,
    /// Guard leads the piece to the cell
    Escort,
    /// Piece sinks into the cell
    Drop,
    /// Guard walks back; the cell door closes
    Return,
}

impl EscortPhase {
    /// All phases in timeline order
    pub fn all() -> &'static [EscortPhase] {
        &[
            EscortPhase::Approach,
            EscortPhase::Escort,
            EscortPhase::Drop,
            EscortPhase::Return,
        ]
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approach => "Approach",
            Self::Escort => "Escort",
            Self::Drop => "Drop",
            Self::Return => "Return",
        }
    }

    /// Band colour used by the timeline widget
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Approach => [100, 150, 255],
            Self::Escort => [150, 255, 100],
            Self::Drop => [255, 200, 100],
            Self::Return => [200, 100, 255],
        }
    }
}

/// Durations of the escort timeline, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscortTimings {
    /// Approach phase
    pub approach: f32,
    /// Escort phase
    pub escort: f32,
    /// Drop phase
    pub drop: f32,
    /// Return phase
    pub return_home: f32,
    /// Delay from activation until the door starts opening
    pub door_open_delay: f32,
    /// Time the door takes to open fully
    pub door_open_duration: f32,
}

impl Default for EscortTimings {
    fn default() -> Self {
        Self {
            approach: 0.7,
            escort: 1.4,
            drop: 0.7,
            return_home: 1.2,
            door_open_delay: 0.2,
            door_open_duration: 0.6,
        }
    }
}

impl EscortTimings {
    /// Total length of the sequence
    pub fn total(&self) -> f32 {
        self.approach + self.escort + self.drop + self.return_home
    }

    /// Duration of one phase
    pub fn duration(&self, phase: EscortPhase) -> f32 {
        match phase {
            EscortPhase::Approach => self.approach,
            EscortPhase::Escort => self.escort,
            EscortPhase::Drop => self.drop,
            EscortPhase::Return => self.return_home,
        }
    }

    /// Start time of a phase
    pub fn start(&self, phase: EscortPhase) -> f32 {
        EscortPhase::all()
            .iter()
            .take_while(|p| **p != phase)
            .map(|p| self.duration(*p))
            .sum()
    }

    /// End time of a phase
    pub fn end(&self, phase: EscortPhase) -> f32 {
        self.start(phase) + self.duration(phase)
    }

    /// Phase containing `t` and the normalized progress within it.
    ///
    /// Windows are half-open except the last, so `t == total` reports
    /// `(Return, 1.0)`. Times outside the timeline are clamped.
    pub fn phase_at(&self, t: f32) -> (EscortPhase, f32) {
        let t = t.clamp(0.0, self.total());
        let mut start = 0.0;
        for phase in EscortPhase::all() {
            let duration = self.duration(*phase);
            let end = start + duration;
            if t < end {
                return (*phase, (t - start) / duration);
            }
            start = end;
        }
        (EscortPhase::Return, 1.0)
    }

    /// Time at which the captured piece disappears into the cell
    pub fn hide_time(&self, fraction: f32) -> f32 {
        self.approach + self.escort + self.drop * fraction
    }

    /// Time at which the door is fully open
    pub fn door_opened_at(&self) -> f32 {
        self.door_open_delay + self.door_open_duration
    }

    /// Check every duration is usable
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("approach", self.approach),
            ("escort", self.escort),
            ("drop", self.drop),
            ("return_home", self.return_home),
            ("door_open_delay", self.door_open_delay),
            ("door_open_duration", self.door_open_duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TimingError::InvalidDuration { name, value });
            }
        }
        if self.total() <= 0.0 {
            return Err(TimingError::ZeroTotal);
        }
        let return_start = self.start(EscortPhase::Return);
        if self.door_opened_at() > return_start {
            return Err(TimingError::DoorOpensTooLate {
                opened_at: self.door_opened_at(),
                return_start,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_default_timings() {
        let timings = EscortTimings::default();
        assert!(close(timings.total(), 4.0));
        assert!(close(timings.start(EscortPhase::Escort), 0.7));
        assert!(close(timings.start(EscortPhase::Drop), 2.1));
        assert!(close(timings.start(EscortPhase::Return), 2.8));
        assert!(close(timings.end(EscortPhase::Return), 4.0));
        assert!(close(timings.hide_time(0.9), 2.73));
        assert!(timings.validate().is_ok());
    }

    #[test]
    fn test_phase_at() {
        let timings = EscortTimings::default();
        let (phase, local) = timings.phase_at(0.35);
        assert_eq!(phase, EscortPhase::Approach);
        assert!(close(local, 0.5));

        assert_eq!(timings.phase_at(0.7).0, EscortPhase::Escort);
        assert_eq!(timings.phase_at(2.5).0, EscortPhase::Drop);
        assert_eq!(timings.phase_at(4.0), (EscortPhase::Return, 1.0));
        assert_eq!(timings.phase_at(10.0), (EscortPhase::Return, 1.0));
        assert_eq!(timings.phase_at(-1.0), (EscortPhase::Approach, 0.0));
    }

    #[test]
    fn test_zero_length_phase_is_skipped() {
        let timings = EscortTimings {
            escort: 0.0,
            ..EscortTimings::default()
        };
        assert_eq!(timings.phase_at(0.7).0, EscortPhase::Drop);
        assert!(timings.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let negative = EscortTimings {
            drop: -0.1,
            ..EscortTimings::default()
        };
        assert_eq!(
            negative.validate(),
            Err(TimingError::InvalidDuration { name: "drop", value: -0.1 })
        );

        let zero = EscortTimings {
            approach: 0.0,
            escort: 0.0,
            drop: 0.0,
            return_home: 0.0,
            door_open_delay: 0.0,
            door_open_duration: 0.0,
        };
        assert_eq!(zero.validate(), Err(TimingError::ZeroTotal));

        let late_door = EscortTimings {
            door_open_delay: 3.0,
            ..EscortTimings::default()
        };
        assert!(matches!(late_door.validate(), Err(TimingError::DoorOpensTooLate { .. })));

        let nan = EscortTimings {
            approach: f32::NAN,
            ..EscortTimings::default()
        };
        assert!(matches!(nan.validate(), Err(TimingError::InvalidDuration { name: "approach", .. })));
    }
}
