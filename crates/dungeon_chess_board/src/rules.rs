// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rules engine capability.
//!
//! Move legality is owned by an external chess library. This module only
//! describes the surface the rest of the workspace depends on.

use crate::board::{BoardSnapshot, Piece, PieceColor, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// Result of a successfully applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Origin square
    pub from: Square,
    /// Destination square
    pub to: Square,
    /// The piece that moved (before promotion)
    pub piece: Piece,
    /// Piece removed from the board by this move, if any
    pub captured: Option<Piece>,
    /// Square the captured piece stood on (differs from `to` for en passant)
    pub captured_on: Option<Square>,
    /// Promotion piece, if the move promoted
    pub promotion: Option<PieceKind>,
}

impl MoveOutcome {
    /// Whether this move removed an enemy piece
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Capability provided by the chess rules library.
///
/// Implementations auto-promote pawns to a queen and return `None` for
/// illegal requests instead of failing.
pub trait ChessRules {
    /// Current board, rank 8 first
    fn board(&self) -> BoardSnapshot;

    /// Legal destination squares for the piece on `from` (empty if none)
    fn legal_moves(&self, from: Square) -> Vec<Square>;

    /// Apply a move, or `None` if it is illegal
    fn apply_move(&mut self, from: Square, to: Square) -> Option<MoveOutcome>;

    /// Side to move
    fn turn(&self) -> PieceColor;

    /// Take back the last move
    fn undo(&mut self) -> Option<MoveOutcome>;

    /// Position in Forsyth-Edwards notation
    fn fen(&self) -> String;
}
