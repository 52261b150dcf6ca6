// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe channels.
//!
//! A channel is a time-sorted list of keyframes for one animated quantity
//! (a position, a door angle). Each keyframe's interpolation mode governs
//! the segment that leaves it.

use crate::keyframe::{Keyframe, KeyframeValue};
use serde::{Deserialize, Serialize};

/// Keyframes closer together than this are treated as coincident
const COINCIDENT_EPSILON: f32 = 0.0001;

/// A single animated channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    keyframes: Vec<Keyframe>,
}

impl Channel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a channel from keyframes in any order
    pub fn from_keyframes(keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut channel = Self {
            keyframes: keyframes.into_iter().collect(),
        };
        channel.sort_keyframes();
        channel
    }

    /// Add a keyframe
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
        self.sort_keyframes();
    }

    /// Sort keyframes by time, keeping insertion order for equal times
    fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Get the duration (time of last keyframe)
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }

    /// Find keyframes surrounding a time
    fn find_keyframes(&self, time: f32) -> (Option<&Keyframe>, Option<&Keyframe>) {
        if self.keyframes.is_empty() {
            return (None, None);
        }

        // First keyframe at or after time
        let next_idx = self.keyframes.iter().position(|k| k.time >= time);

        match next_idx {
            None => (self.keyframes.last(), None),
            Some(0) => (None, self.keyframes.first()),
            Some(idx) => (Some(&self.keyframes[idx - 1]), Some(&self.keyframes[idx])),
        }
    }

    /// Evaluate the channel at a given time, holding the end values outside
    /// the keyed range
    pub fn evaluate(&self, time: f32) -> Option<KeyframeValue> {
        let (prev, next) = self.find_keyframes(time);

        match (prev, next) {
            (None, None) => None,
            (Some(kf), None) | (None, Some(kf)) => Some(kf.value),
            (Some(a), Some(b)) => {
                if (b.time - a.time).abs() < COINCIDENT_EPSILON {
                    return Some(b.value);
                }
                let t = (time - a.time) / (b.time - a.time);
                a.value.interpolate(&b.value, t, a.interpolation)
            }
        }
    }

    /// Evaluate as a float
    pub fn evaluate_float(&self, time: f32) -> Option<f32> {
        self.evaluate(time)?.as_float()
    }

    /// Evaluate as a Vec3
    pub fn evaluate_vec3(&self, time: f32) -> Option<[f32; 3]> {
        self.evaluate(time)?.as_vec3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::InterpolationMode;

    #[test]
    fn test_empty_channel() {
        let channel = Channel::new();
        assert_eq!(channel.evaluate(1.0), None);
        assert_eq!(channel.duration(), 0.0);
    }

    #[test]
    fn test_holds_outside_range() {
        let channel = Channel::from_keyframes([Keyframe::float(2.0, 5.0), Keyframe::float(1.0, 3.0)]);
        assert_eq!(channel.keyframes()[0].time, 1.0);
        assert_eq!(channel.evaluate_float(0.0), Some(3.0));
        assert_eq!(channel.evaluate_float(9.0), Some(5.0));
        assert_eq!(channel.evaluate_float(1.5), Some(4.0));
        assert_eq!(channel.duration(), 2.0);
    }

    #[test]
    fn test_segment_uses_leaving_keyframe_mode() {
        let mut channel = Channel::new();
        channel.add_keyframe(Keyframe::float(0.0, 0.0).with_interpolation(InterpolationMode::Constant));
        channel.add_keyframe(Keyframe::float(1.0, 1.0).with_interpolation(InterpolationMode::Smoothstep));
        channel.add_keyframe(Keyframe::float(2.0, 0.0));

        assert_eq!(channel.evaluate_float(0.99), Some(0.0));
        assert_eq!(channel.evaluate_float(1.0), Some(1.0));
        assert_eq!(channel.evaluate_float(1.5), Some(0.5));
        let early = channel.evaluate_float(1.1).unwrap();
        assert!(early > 0.95, "smoothstep leaves slowly: {early}");
    }

    #[test]
    fn test_coincident_keyframes_snap_to_later() {
        let channel = Channel::from_keyframes([
            Keyframe::vec3(0.0, [0.0; 3]),
            Keyframe::vec3(1.0, [1.0, 1.0, 1.0]),
            Keyframe::vec3(1.0, [2.0, 2.0, 2.0]),
        ]);
        assert_eq!(channel.evaluate_vec3(1.0), Some([1.0, 1.0, 1.0]));
        assert_eq!(channel.evaluate_vec3(1.5), Some([2.0, 2.0, 2.0]));
        assert_eq!(channel.evaluate_float(0.5), None);
    }
}
