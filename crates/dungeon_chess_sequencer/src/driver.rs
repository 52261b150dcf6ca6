// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-tick glue between the escort sequencer and a transform sink.

use crate::capture::CaptureEvent;
use crate::escort::{EscortFrame, EscortSequencer};
use crate::sink::{TransformSink, TransformTarget};

/// Callback invoked once per completed activation
pub type CompletionCallback = Box<dyn FnMut(&CaptureEvent)>;

/// Runs an [`EscortSequencer`] against a sink once per rendered frame
pub struct EscortDriver {
    sequencer: EscortSequencer,
    on_complete: Option<CompletionCallback>,
    completed: u64,
}

impl EscortDriver {
    /// Wrap a sequencer
    pub fn new(sequencer: EscortSequencer) -> Self {
        Self {
            sequencer,
            on_complete: None,
            completed: 0,
        }
    }

    /// Set the completion callback
    pub fn with_on_complete(mut self, callback: impl FnMut(&CaptureEvent) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// The wrapped sequencer
    pub fn sequencer(&self) -> &EscortSequencer {
        &self.sequencer
    }

    /// Number of activations that ran to completion
    pub fn completed_count(&self) -> u64 {
        self.completed
    }

    /// Advance one tick and write the result into `sink`.
    ///
    /// An absent capture cancels any running activation. If the guard or
    /// the captured piece has no handle this tick, the tick is skipped
    /// entirely: no state changes and no writes. Door leaves without a
    /// handle are simply not written.
    pub fn frame(
        &mut self,
        capture: Option<&CaptureEvent>,
        now: f64,
        sink: &mut dyn TransformSink,
    ) -> Option<EscortFrame> {
        let Some(capture) = capture else {
            self.sequencer.cancel();
            return None;
        };

        let ready = TransformTarget::all()
            .iter()
            .filter(|target| target.is_required())
            .all(|target| sink.is_bound(*target));
        if !ready {
            tracing::trace!("Escort handles not bound, skipping tick at {now:.3}");
            return None;
        }

        let frame = self.sequencer.advance(Some(capture), now)?;
        for command in &frame.commands {
            if sink.is_bound(command.target()) {
                sink.apply(command);
            }
        }

        if frame.completed {
            self.completed += 1;
            if let Some(callback) = self.on_complete.as_mut() {
                callback(capture);
            }
        }

        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escort::EscortConfig;
    use crate::sink::TransformCommand;
    use dungeon_chess_board::{Piece, PieceColor, PieceKind};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSink {
        bound: HashSet<TransformTarget>,
        applied: Vec<TransformCommand>,
    }

    impl RecordingSink {
        fn with(targets: &[TransformTarget]) -> Self {
            Self {
                bound: targets.iter().copied().collect(),
                applied: Vec::new(),
            }
        }
    }

    impl TransformSink for RecordingSink {
        fn is_bound(&self, target: TransformTarget) -> bool {
            self.bound.contains(&target)
        }

        fn apply(&mut self, command: &TransformCommand) {
            self.applied.push(*command);
        }
    }

    fn capture() -> CaptureEvent {
        CaptureEvent::new(Piece::new(PieceKind::Pawn, PieceColor::White), [2.0, 0.0, 3.0])
    }

    fn driver_with_log() -> (EscortDriver, Rc<RefCell<Vec<CaptureEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = Rc::clone(&log);
        let driver = EscortDriver::new(EscortSequencer::new(EscortConfig::default(), [0.0, 0.0, -9.0]))
            .with_on_complete(move |capture| sink_log.borrow_mut().push(*capture));
        (driver, log)
    }

    #[test]
    fn test_callback_fires_once_per_activation() {
        let (mut driver, log) = driver_with_log();
        let mut sink = RecordingSink::with(TransformTarget::all());
        let mut capture = Some(capture());

        let mut now = 0.0;
        while now < 6.0 {
            if let Some(frame) = driver.frame(capture.as_ref(), now, &mut sink) {
                if frame.completed {
                    // Caller clears its capture on completion
                    capture = None;
                }
            }
            now += 1.0 / 30.0;
        }

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(driver.completed_count(), 1);
        assert!(!driver.sequencer().is_active());
    }

    #[test]
    fn test_cancel_does_not_complete() {
        let (mut driver, log) = driver_with_log();
        let mut sink = RecordingSink::with(TransformTarget::all());
        let capture = capture();

        driver.frame(Some(&capture), 0.0, &mut sink);
        driver.frame(Some(&capture), 2.0, &mut sink);
        let writes = sink.applied.len();
        assert!(driver.frame(None, 2.1, &mut sink).is_none());
        assert_eq!(sink.applied.len(), writes);
        driver.frame(None, 5.0, &mut sink);

        assert!(log.borrow().is_empty());
        assert_eq!(driver.completed_count(), 0);
    }

    #[test]
    fn test_skips_tick_without_required_handles() {
        let (mut driver, _log) = driver_with_log();
        let mut sink = RecordingSink::with(&[TransformTarget::Guard, TransformTarget::DoorLeft]);
        let capture = capture();

        assert!(driver.frame(Some(&capture), 0.0, &mut sink).is_none());
        assert!(sink.applied.is_empty());
        assert!(!driver.sequencer().is_active());

        // Once the piece is mounted the activation starts on that tick
        sink.bound.insert(TransformTarget::CapturedPiece);
        let frame = driver.frame(Some(&capture), 1.0, &mut sink).unwrap();
        assert!(frame.started);
        assert_eq!(driver.sequencer().state().activation_time, Some(1.0));
    }

    #[test]
    fn test_unbound_door_leaf_not_written() {
        let (mut driver, _log) = driver_with_log();
        let mut sink = RecordingSink::with(&[
            TransformTarget::Guard,
            TransformTarget::CapturedPiece,
            TransformTarget::DoorLeft,
        ]);
        driver.frame(Some(&capture()), 0.0, &mut sink);
        assert!(sink.applied.iter().any(|c| c.target() == TransformTarget::DoorLeft));
        assert!(sink.applied.iter().all(|c| c.target() != TransformTarget::DoorRight));
    }
}
