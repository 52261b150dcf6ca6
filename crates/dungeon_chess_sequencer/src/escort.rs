// SPDX-License-Identifier: MIT OR Apache-2.0
//! Capture-escort sequencer.
//!
//! When a piece is captured a guard walks out from beside the dungeon cell,
//! collects the piece, leads it to the cell, drops it through the floor and
//! walks back while the cell door closes. The whole sequence is a pure
//! function of time since activation; [`EscortSequencer`] only owns the
//! activation bookkeeping.
//!
//! ## Timeline
//!
//! | Phase    | Guard               | Piece                   | Door          |
//! |----------|---------------------|-------------------------|---------------|
//! | Approach | home -> piece       | at capture position     | opening ramp  |
//! | Escort   | piece -> cell       | capture -> carry height | open          |
//! | Drop     | at cell             | carry -> cell floor     | open          |
//! | Return   | cell -> home        | at cell floor (hidden)  | closing       |
//!
//! Every moving segment uses smoothstep easing so velocities are zero at
//! the phase seams.

use crate::capture::{CaptureEvent, CaptureId};
use crate::keyframe::{InterpolationMode, Keyframe};
use crate::phase::{EscortPhase, EscortTimings, TimingError};
use crate::sink::{TransformCommand, TransformTarget};
use crate::track::Channel;
use serde::{Deserialize, Serialize};

/// Spatial constants of the escort, relative to the dungeon anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscortLayout {
    /// Guard's post, as an offset in x/z from the anchor; y is absolute
    pub home_offset: [f32; 3],
    /// Height the piece is carried at when it reaches the cell
    pub carry_height: f32,
    /// Height of the cell floor the piece sinks to
    pub cell_floor: f32,
    /// Height of the point the guard faces, in x/z at the anchor; y is absolute
    pub look_height: f32,
    /// Opening angle of each door leaf
    pub door_swing_degrees: f32,
    /// Fraction of the drop phase after which the piece is hidden
    pub hide_fraction: f32,
}

impl Default for EscortLayout {
    fn default() -> Self {
        Self {
            home_offset: [2.2, 0.0, 2.0],
            carry_height: 0.4,
            cell_floor: -2.2,
            look_height: 1.2,
            door_swing_degrees: 45.0,
            hide_fraction: 0.9,
        }
    }
}

/// Full escort configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscortConfig {
    /// Phase durations
    pub timings: EscortTimings,
    /// Spatial constants
    pub layout: EscortLayout,
}

impl EscortConfig {
    /// Validate timings and layout
    pub fn validate(&self) -> Result<(), TimingError> {
        self.timings.validate()?;
        let fraction = self.layout.hide_fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(TimingError::InvalidHideFraction(fraction));
        }
        Ok(())
    }
}

/// Mutable state of the sequencer between ticks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SequencerState {
    /// Clock reading at which the current activation started
    pub activation_time: Option<f64>,
    /// Capture the current activation belongs to
    pub active_capture: Option<CaptureId>,
    /// Last computed door opening, in [0,1]
    pub door_open_progress: f32,
    /// Whether the piece has disappeared into the cell this activation
    pub piece_hidden: bool,
}

/// Keyframed channels for one activation
#[derive(Debug, Clone, PartialEq)]
pub struct EscortTracks {
    /// Guard position
    pub guard: Channel,
    /// Captured piece position
    pub piece: Channel,
    /// Door opening progress
    pub door: Channel,
}

impl EscortTracks {
    /// Build the channels for a piece captured at `capture_position`
    pub fn build(config: &EscortConfig, capture_position: [f32; 3], dungeon_anchor: [f32; 3]) -> Self {
        let timings = &config.timings;
        let layout = &config.layout;
        let ease = InterpolationMode::Smoothstep;

        let home = home_anchor(layout, dungeon_anchor);
        let grounded = [capture_position[0], 0.0, capture_position[2]];
        let carried = [dungeon_anchor[0], layout.carry_height, dungeon_anchor[2]];
        let dropped = [dungeon_anchor[0], layout.cell_floor, dungeon_anchor[2]];

        let escort_start = timings.start(EscortPhase::Escort);
        let drop_start = timings.start(EscortPhase::Drop);
        let return_start = timings.start(EscortPhase::Return);
        let total = timings.total();

        let guard = Channel::from_keyframes([
            Keyframe::vec3(0.0, home).with_interpolation(ease),
            Keyframe::vec3(escort_start, grounded).with_interpolation(ease),
            Keyframe::vec3(drop_start, dungeon_anchor).with_interpolation(InterpolationMode::Constant),
            Keyframe::vec3(return_start, dungeon_anchor).with_interpolation(ease),
            Keyframe::vec3(total, home),
        ]);

        let piece = Channel::from_keyframes([
            Keyframe::vec3(0.0, capture_position).with_interpolation(InterpolationMode::Constant),
            Keyframe::vec3(escort_start, capture_position).with_interpolation(ease),
            Keyframe::vec3(drop_start, carried).with_interpolation(ease),
            Keyframe::vec3(return_start, dropped).with_interpolation(InterpolationMode::Constant),
            Keyframe::vec3(total, dropped),
        ]);

        // The opening ramp is linear and may run past the end of Approach
        let door = Channel::from_keyframes([
            Keyframe::float(0.0, 0.0).with_interpolation(InterpolationMode::Constant),
            Keyframe::float(timings.door_open_delay, 0.0),
            Keyframe::float(timings.door_opened_at(), 1.0).with_interpolation(InterpolationMode::Constant),
            Keyframe::float(return_start, 1.0).with_interpolation(ease),
            Keyframe::float(total, 0.0),
        ]);

        Self { guard, piece, door }
    }
}

/// Guard's post beside the cell
pub fn home_anchor(layout: &EscortLayout, dungeon_anchor: [f32; 3]) -> [f32; 3] {
    [
        dungeon_anchor[0] + layout.home_offset[0],
        layout.home_offset[1],
        dungeon_anchor[2] + layout.home_offset[2],
    ]
}

/// Everything the escort shows at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscortPose {
    /// Time since activation, clamped to the timeline
    pub t: f32,
    /// Phase containing `t`
    pub phase: EscortPhase,
    /// Progress within the phase, in [0,1]
    pub phase_progress: f32,
    /// Guard position
    pub guard_position: [f32; 3],
    /// Point the guard faces
    pub guard_look_at: [f32; 3],
    /// Captured piece position
    pub piece_position: [f32; 3],
    /// Whether the captured piece is drawn
    pub piece_visible: bool,
    /// Door opening in [0,1]
    pub door_progress: f32,
}

impl EscortPose {
    /// Angle of the left door leaf; the right leaf mirrors it
    pub fn door_angle(&self, layout: &EscortLayout) -> f32 {
        self.door_progress * layout.door_swing_degrees.to_radians()
    }

    /// Commands that put the scene into this pose
    pub fn commands(&self, layout: &EscortLayout) -> Vec<TransformCommand> {
        let angle = self.door_angle(layout);
        vec![
            TransformCommand::SetPosition {
                target: TransformTarget::Guard,
                position: self.guard_position,
            },
            TransformCommand::LookAt {
                target: TransformTarget::Guard,
                point: self.guard_look_at,
            },
            TransformCommand::SetPosition {
                target: TransformTarget::CapturedPiece,
                position: self.piece_position,
            },
            TransformCommand::SetVisible {
                target: TransformTarget::CapturedPiece,
                visible: self.piece_visible,
            },
            TransformCommand::SetRotationY {
                target: TransformTarget::DoorLeft,
                radians: angle,
            },
            TransformCommand::SetRotationY {
                target: TransformTarget::DoorRight,
                radians: -angle,
            },
        ]
    }
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct EscortFrame {
    /// Capture being animated
    pub capture: CaptureId,
    /// Pose at this tick
    pub pose: EscortPose,
    /// Writes for the transform sink
    pub commands: Vec<TransformCommand>,
    /// This tick began a new activation
    pub started: bool,
    /// This tick finished the activation
    pub completed: bool,
}

/// Drives one escort at a time off an external clock.
///
/// Activation starts lazily on the first tick that presents a capture and
/// ends on the tick where the elapsed time reaches the timeline length.
/// Completion clears the activation but not the caller's capture: a caller
/// that keeps presenting the same capture afterwards starts it over from
/// `t = 0`, so the caller must drop its capture once `completed` is seen.
#[derive(Debug, Clone)]
pub struct EscortSequencer {
    config: EscortConfig,
    dungeon_anchor: [f32; 3],
    state: SequencerState,
}

impl EscortSequencer {
    /// Create a sequencer for the cell at `dungeon_anchor`
    pub fn new(config: EscortConfig, dungeon_anchor: [f32; 3]) -> Self {
        Self {
            config,
            dungeon_anchor,
            state: SequencerState::default(),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &EscortConfig {
        &self.config
    }

    /// Cell anchor
    pub fn dungeon_anchor(&self) -> [f32; 3] {
        self.dungeon_anchor
    }

    /// Guard's post
    pub fn home_anchor(&self) -> [f32; 3] {
        home_anchor(&self.config.layout, self.dungeon_anchor)
    }

    /// Fixed point the guard faces
    pub fn look_target(&self) -> [f32; 3] {
        [
            self.dungeon_anchor[0],
            self.config.layout.look_height,
            self.dungeon_anchor[2],
        ]
    }

    /// Current state
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Last computed door opening
    pub fn door_open_progress(&self) -> f32 {
        self.state.door_open_progress
    }

    /// Whether an activation is in progress
    pub fn is_active(&self) -> bool {
        self.state.activation_time.is_some()
    }

    /// Timeline position at clock reading `now`, if active
    pub fn time_in_sequence(&self, now: f64) -> Option<f32> {
        let start = self.state.activation_time?;
        Some((now - start).clamp(0.0, self.config.timings.total() as f64) as f32)
    }

    /// Channels for a capture
    pub fn tracks(&self, capture: &CaptureEvent) -> EscortTracks {
        EscortTracks::build(&self.config, capture.position(), self.dungeon_anchor)
    }

    /// Pose at timeline position `t`; pure
    pub fn sample(&self, capture: &CaptureEvent, t: f32) -> EscortPose {
        let timings = &self.config.timings;
        let t = t.clamp(0.0, timings.total());
        let tracks = self.tracks(capture);
        let (phase, phase_progress) = timings.phase_at(t);

        EscortPose {
            t,
            phase,
            phase_progress,
            guard_position: tracks.guard.evaluate_vec3(t).unwrap_or_else(|| self.home_anchor()),
            guard_look_at: self.look_target(),
            piece_position: tracks.piece.evaluate_vec3(t).unwrap_or_else(|| capture.position()),
            piece_visible: t < timings.hide_time(self.config.layout.hide_fraction),
            door_progress: tracks.door.evaluate_float(t).unwrap_or(0.0).clamp(0.0, 1.0),
        }
    }

    /// Abandon the current activation without completing it
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            tracing::debug!("Escort cancelled");
        }
        self.state.activation_time = None;
        self.state.active_capture = None;
        was_active
    }

    /// Advance to clock reading `now`.
    ///
    /// With no capture any activation is cancelled and nothing is produced.
    /// A capture different from the one being animated replaces it and
    /// starts from the beginning.
    pub fn advance(&mut self, capture: Option<&CaptureEvent>, now: f64) -> Option<EscortFrame> {
        let Some(capture) = capture else {
            self.cancel();
            return None;
        };

        if self.is_active() && self.state.active_capture != Some(capture.id()) {
            tracing::debug!("Escort superseded by capture {}", capture.id());
            self.cancel();
        }

        let started = match self.state.activation_time {
            Some(_) => false,
            None => {
                self.state.activation_time = Some(now);
                self.state.active_capture = Some(capture.id());
                self.state.piece_hidden = false;
                tracing::debug!("Escort started for {} ({})", capture.piece(), capture.id());
                true
            }
        };

        let activation = self.state.activation_time.unwrap_or(now);
        let total = self.config.timings.total();
        let elapsed = now - activation;
        let t = elapsed.clamp(0.0, total as f64) as f32;

        let mut pose = self.sample(capture, t);
        if !pose.piece_visible {
            self.state.piece_hidden = true;
        }
        pose.piece_visible = !self.state.piece_hidden;
        self.state.door_open_progress = pose.door_progress;

        let completed = elapsed >= total as f64;
        if completed {
            self.state.activation_time = None;
            self.state.active_capture = None;
            tracing::debug!("Escort completed for {}", capture.id());
        }

        Some(EscortFrame {
            capture: capture.id(),
            commands: pose.commands(&self.config.layout),
            pose,
            started,
            completed,
        })
    }
}
