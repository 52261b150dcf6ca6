// SPDX-License-Identifier: MIT OR Apache-2.0
//! Capture-escort sequencer for Dungeon Chess.
//!
//! When a piece is captured, a dungeon guard escorts it off the board and
//! into a cell. This crate provides:
//! - Keyframe channels with smoothstep easing
//! - The four-phase escort timeline and its configuration
//! - The sequencer state machine
//! - A transform-sink abstraction and per-tick driver
//! - A timeline debug widget
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - Pure pose sampling as a function of time since activation
//! - Explicit activation state, advanced by an external clock
//! - Transform commands applied through an injected sink

pub mod keyframe;
pub mod track;
pub mod phase;
pub mod capture;
pub mod sink;
pub mod escort;
pub mod driver;
pub mod ui;

pub use keyframe::{Interpolation, InterpolationMode, Keyframe, KeyframeValue};
pub use track::Channel;
pub use phase::{EscortPhase, EscortTimings, TimingError};
pub use capture::{CaptureEvent, CaptureId};
pub use sink::{TransformCommand, TransformSink, TransformTarget};
pub use escort::{EscortConfig, EscortFrame, EscortLayout, EscortPose, EscortSequencer, EscortTracks, SequencerState};
pub use driver::{CompletionCallback, EscortDriver};
pub use ui::EscortTimelinePanel;
