// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless replay of a single capture escort.

use crate::clock::{FixedStepClock, FrameClock};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::scene::SceneGraph;
use dungeon_chess_sequencer::{CaptureEvent, EscortDriver, EscortPhase, EscortSequencer, TransformTarget};

/// Outcome of a replay run
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Frames simulated
    pub frames: u64,
    /// Clock reading of the completing frame
    pub completed_at: Option<f64>,
    /// Phase entered and the clock reading it was first seen at
    pub phase_changes: Vec<(EscortPhase, f64)>,
    /// Guard position after the last frame
    pub final_guard: [f32; 3],
    /// Piece position after the last frame
    pub final_piece: [f32; 3],
    /// Piece visibility after the last frame
    pub piece_visible: bool,
    /// Door progress after the last frame
    pub door_progress: f32,
}

/// Drive one escort from the configured capture until it completes or
/// `max_seconds` pass
pub fn run_replay(config: &AppConfig) -> Result<ReplaySummary, AppError> {
    config.validate()?;

    let settings = &config.replay;
    let position = config.board.square_center(settings.capture_square);
    let mut capture = Some(CaptureEvent::new(settings.captured_piece, position));
    tracing::info!(
        "Replaying capture of {} on {} at {:.0} fps",
        settings.captured_piece,
        settings.capture_square,
        settings.frame_rate
    );

    let mut driver = EscortDriver::new(EscortSequencer::new(config.escort, config.dungeon_anchor));
    let mut scene = SceneGraph::with_escort_nodes();
    let mut clock = FixedStepClock::new(settings.frame_rate);

    let mut completed_at = None;
    let mut phase_changes: Vec<(EscortPhase, f64)> = Vec::new();

    while capture.is_some() {
        let now = clock.tick();
        if now > settings.max_seconds {
            tracing::warn!("Replay stopped after {:.2}s without completing", settings.max_seconds);
            break;
        }

        let Some(frame) = driver.frame(capture.as_ref(), now, &mut scene) else {
            continue;
        };

        if phase_changes.last().map(|(phase, _)| *phase) != Some(frame.pose.phase) {
            tracing::info!("{:>8} at {:.3}s", frame.pose.phase.name(), now);
            phase_changes.push((frame.pose.phase, now));
        }

        if frame.completed {
            tracing::info!("Escort completed at {:.3}s", now);
            completed_at = Some(now);
            capture = None;
        }
    }

    let guard = scene.node_for(TransformTarget::Guard).copied().unwrap_or_default();
    let piece = scene.node_for(TransformTarget::CapturedPiece).copied().unwrap_or_default();

    Ok(ReplaySummary {
        frames: clock.frame_count(),
        completed_at,
        phase_changes,
        final_guard: guard.position,
        final_piece: piece.position,
        piece_visible: piece.visible,
        door_progress: driver.sequencer().door_open_progress(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for i in 0..3 {
            assert!((actual[i] - expected[i]).abs() < 1e-4, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_default_replay_completes() {
        let summary = run_replay(&AppConfig::default()).unwrap();

        assert_eq!(summary.completed_at, Some(4.0));
        assert_eq!(summary.frames, 241);
        assert_close(summary.final_guard, [2.2, 0.0, -7.0]);
        assert_close(summary.final_piece, [0.0, -2.2, -9.0]);
        assert!(!summary.piece_visible);
        assert!(summary.door_progress.abs() < 1e-4);

        let phases: Vec<EscortPhase> = summary.phase_changes.iter().map(|(phase, _)| *phase).collect();
        assert_eq!(phases, EscortPhase::all());
        assert_eq!(summary.phase_changes[0].1, 0.0);
    }

    #[test]
    fn test_replay_stops_at_max_seconds() {
        let mut config = AppConfig::default();
        config.replay.max_seconds = 2.0;
        let summary = run_replay(&config).unwrap();

        assert_eq!(summary.completed_at, None);
        assert_eq!(summary.frames, 122);
        assert!(summary.piece_visible);
        assert!(summary.door_progress > 0.99);
    }

    #[test]
    fn test_replay_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.replay.frame_rate = -1.0;
        assert!(matches!(
            run_replay(&config),
            Err(AppError::Config(ConfigError::InvalidFrameRate(_)))
        ));
    }
}
