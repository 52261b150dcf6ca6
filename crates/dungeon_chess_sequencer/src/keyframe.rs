// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and interpolation helpers.

use serde::{Deserialize, Serialize};

/// Interpolation mode between keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum InterpolationMode {
    /// Constant (step): hold the value until the next keyframe
    Constant,
    /// Linear interpolation
    #[default]
    Linear,
    /// Smoothstep easing, zero velocity at both keyframes
    Smoothstep,
}

impl InterpolationMode {
    /// Map segment-local progress in [0,1] through this mode
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            InterpolationMode::Constant => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            InterpolationMode::Linear => Interpolation::clamp01(t),
            InterpolationMode::Smoothstep => Interpolation::smoothstep(t),
        }
    }
}

/// Value stored in a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeyframeValue {
    /// Float value
    Float(f32),
    /// 3D vector
    Vec3([f32; 3]),
}

/// A keyframe in a channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds
    pub time: f32,
    /// Value at this keyframe
    pub value: KeyframeValue,
    /// Interpolation mode to next keyframe
    pub interpolation: InterpolationMode,
}

impl Keyframe {
    /// Create a new keyframe
    pub fn new(time: f32, value: KeyframeValue) -> Self {
        Self {
            time,
            value,
            interpolation: InterpolationMode::Linear,
        }
    }

    /// Float keyframe
    pub fn float(time: f32, value: f32) -> Self {
        Self::new(time, KeyframeValue::Float(value))
    }

    /// Vec3 keyframe
    pub fn vec3(time: f32, value: [f32; 3]) -> Self {
        Self::new(time, KeyframeValue::Vec3(value))
    }

    /// Set interpolation mode
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Clamp to [0,1]
    pub fn clamp01(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec3
    pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
        ]
    }

    /// Smoothstep `3t² - 2t³`, input clamped to [0,1]
    pub fn smoothstep(t: f32) -> f32 {
        let t = Self::clamp01(t);
        t * t * (3.0 - 2.0 * t)
    }

    /// Eased float blend
    pub fn ease(a: f32, b: f32, t: f32) -> f32 {
        Self::lerp(a, b, Self::smoothstep(t))
    }

    /// Eased Vec3 blend
    pub fn ease_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        Self::lerp_vec3(a, b, Self::smoothstep(t))
    }
}

impl KeyframeValue {
    /// Interpolate between two keyframe values
    pub fn interpolate(&self, other: &KeyframeValue, t: f32, mode: InterpolationMode) -> Option<KeyframeValue> {
        let k = mode.apply(t);
        match (self, other) {
            (KeyframeValue::Float(a), KeyframeValue::Float(b)) => {
                Some(KeyframeValue::Float(Interpolation::lerp(*a, *b, k)))
            }
            (KeyframeValue::Vec3(a), KeyframeValue::Vec3(b)) => {
                Some(KeyframeValue::Vec3(Interpolation::lerp_vec3(*a, *b, k)))
            }
            _ => None, // Mismatched types
        }
    }

    /// Get as float if possible
    pub fn as_float(&self) -> Option<f32> {
        match self {
            KeyframeValue::Float(v) => Some(*v),
            KeyframeValue::Vec3(_) => None,
        }
    }

    /// Get as Vec3 if possible
    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            KeyframeValue::Vec3(v) => Some(*v),
            KeyframeValue::Float(_) => None,
        }
    }
}
