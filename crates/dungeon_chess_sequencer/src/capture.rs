// SPDX-License-Identifier: MIT OR Apache-2.0
//! Capture events that start an escort.

use dungeon_chess_board::{BoardLayout, MoveOutcome, Piece};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a capture event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureId(pub Uuid);

impl CaptureId {
    /// Create a new random capture ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CaptureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A piece leaving the board, immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    id: CaptureId,
    piece: Piece,
    position: [f32; 3],
}

impl CaptureEvent {
    /// Create a capture of `piece` last standing at `position`
    pub fn new(piece: Piece, position: [f32; 3]) -> Self {
        Self {
            id: CaptureId::new(),
            piece,
            position,
        }
    }

    /// Build the capture for a move, if it took a piece
    pub fn from_move(layout: &BoardLayout, outcome: &MoveOutcome) -> Option<Self> {
        let piece = outcome.captured?;
        let square = outcome.captured_on.unwrap_or(outcome.to);
        Some(Self::new(piece, layout.square_center(square)))
    }

    /// Event identity
    pub fn id(&self) -> CaptureId {
        self.id
    }

    /// Captured piece
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// World position of the piece at the moment of capture
    pub fn position(&self) -> [f32; 3] {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_chess_board::{PieceColor, PieceKind, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_capturing_move() {
        let layout = BoardLayout::default();
        let pawn = Piece::new(PieceKind::Pawn, PieceColor::Black);
        let outcome = MoveOutcome {
            from: sq("e4"),
            to: sq("d5"),
            piece: Piece::new(PieceKind::Pawn, PieceColor::White),
            captured: Some(pawn),
            captured_on: Some(sq("d5")),
            promotion: None,
        };
        let event = CaptureEvent::from_move(&layout, &outcome).unwrap();
        assert_eq!(event.piece(), pawn);
        assert_eq!(event.position(), layout.square_center(sq("d5")));
    }

    #[test]
    fn test_en_passant_uses_captured_square() {
        let layout = BoardLayout::default();
        let outcome = MoveOutcome {
            from: sq("e5"),
            to: sq("d6"),
            piece: Piece::new(PieceKind::Pawn, PieceColor::White),
            captured: Some(Piece::new(PieceKind::Pawn, PieceColor::Black)),
            captured_on: Some(sq("d5")),
            promotion: None,
        };
        let event = CaptureEvent::from_move(&layout, &outcome).unwrap();
        assert_eq!(event.position(), layout.square_center(sq("d5")));
    }

    #[test]
    fn test_quiet_move_has_no_capture() {
        let outcome = MoveOutcome {
            from: sq("e2"),
            to: sq("e4"),
            piece: Piece::new(PieceKind::Pawn, PieceColor::White),
            captured: None,
            captured_on: None,
            promotion: None,
        };
        assert!(CaptureEvent::from_move(&BoardLayout::default(), &outcome).is_none());
    }

    #[test]
    fn test_each_capture_is_distinct() {
        let piece = Piece::new(PieceKind::Rook, PieceColor::White);
        let a = CaptureEvent::new(piece, [0.0; 3]);
        let b = CaptureEvent::new(piece, [0.0; 3]);
        assert_ne!(a.id(), b.id());
    }
}
