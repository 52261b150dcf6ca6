// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transform sink: where the sequencer's output goes.
//!
//! The sequencer never touches scene nodes itself. It emits
//! [`TransformCommand`]s and a renderer-side [`TransformSink`] applies them.

use serde::{Deserialize, Serialize};

/// Scene handle the escort animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformTarget {
    /// The dungeon guard
    Guard,
    /// The piece being escorted
    CapturedPiece,
    /// Left leaf of the cell door
    DoorLeft,
    /// Right leaf of the cell door
    DoorRight,
}

impl TransformTarget {
    /// All targets
    pub fn all() -> &'static [TransformTarget] {
        &[
            TransformTarget::Guard,
            TransformTarget::CapturedPiece,
            TransformTarget::DoorLeft,
            TransformTarget::DoorRight,
        ]
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guard => "Guard",
            Self::CapturedPiece => "CapturedPiece",
            Self::DoorLeft => "DoorLeft",
            Self::DoorRight => "DoorRight",
        }
    }

    /// Whether the escort cannot run without this handle
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Guard | Self::CapturedPiece)
    }
}

/// A single write to a scene handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformCommand {
    /// Move to a world position
    SetPosition {
        /// Handle to write
        target: TransformTarget,
        /// World position
        position: [f32; 3],
    },
    /// Orient to face a world point
    LookAt {
        /// Handle to write
        target: TransformTarget,
        /// Point to face
        point: [f32; 3],
    },
    /// Rotate about the vertical hinge axis
    SetRotationY {
        /// Handle to write
        target: TransformTarget,
        /// Angle in radians
        radians: f32,
    },
    /// Show or hide
    SetVisible {
        /// Handle to write
        target: TransformTarget,
        /// Visibility
        visible: bool,
    },
}

impl TransformCommand {
    /// Handle this command writes to
    pub fn target(&self) -> TransformTarget {
        match self {
            Self::SetPosition { target, .. }
            | Self::LookAt { target, .. }
            | Self::SetRotationY { target, .. }
            | Self::SetVisible { target, .. } => *target,
        }
    }
}

/// Receiver of transform commands.
///
/// While an escort is running the driver holds the sink mutably for the
/// duration of each tick; nothing else should write the escort handles.
pub trait TransformSink {
    /// Whether the handle exists this tick
    fn is_bound(&self, target: TransformTarget) -> bool;

    /// Apply one command
    fn apply(&mut self, command: &TransformCommand);
}
