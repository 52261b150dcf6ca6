// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dungeon Chess application layer.
//!
//! Wires the board crate and the escort sequencer together:
//! - RON configuration
//! - Frame clocks
//! - An in-memory scene graph that receives escort transforms
//! - The game session that owns the active capture
//! - Headless replay of a single escort

pub mod clock;
pub mod config;
pub mod error;
pub mod replay;
pub mod scene;
pub mod session;

pub use clock::{FixedStepClock, FrameClock};
pub use config::{AppConfig, ConfigError, ReplaySettings, CONFIG_FILE_NAME, CONFIG_FORMAT_VERSION};
pub use error::AppError;
pub use replay::{run_replay, ReplaySummary};
pub use scene::{SceneGraph, SceneNode};
pub use session::GameSession;
