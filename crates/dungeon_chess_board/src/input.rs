// SPDX-License-Identifier: MIT OR Apache-2.0
//! Translation of square clicks into moves.

use crate::board::Square;
use crate::rules::{ChessRules, MoveOutcome};

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing selectable and nothing selected
    Ignored,
    /// A piece was selected; carries its legal targets
    Selected {
        /// Selected square
        square: Square,
        /// Legal destinations
        targets: Vec<Square>,
    },
    /// Selection cleared without moving
    Deselected,
    /// A move was applied
    Moved(MoveOutcome),
    /// The rules engine refused the move
    Rejected {
        /// Origin square
        from: Square,
        /// Requested destination
        to: Square,
    },
}

/// Tracks the selected square and its highlighted targets
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<Square>,
    targets: Vec<Square>,
}

impl SelectionController {
    /// Create a controller with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected square
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal targets of the selected piece
    pub fn targets(&self) -> &[Square] {
        &self.targets
    }

    /// Whether a square should be highlighted as a move target
    pub fn is_target(&self, square: Square) -> bool {
        self.targets.contains(&square)
    }

    /// Drop the current selection
    pub fn clear(&mut self) {
        self.selected = None;
        self.targets.clear();
    }

    /// Handle a click on `square`
    pub fn click<R: ChessRules + ?Sized>(&mut self, rules: &mut R, square: Square) -> ClickOutcome {
        if let Some(from) = self.selected {
            if self.is_target(square) {
                self.clear();
                return match rules.apply_move(from, square) {
                    Some(outcome) => {
                        tracing::debug!("Moved {} {} -> {}", outcome.piece, from, square);
                        ClickOutcome::Moved(outcome)
                    }
                    None => {
                        tracing::warn!("Rules engine rejected {} -> {}", from, square);
                        ClickOutcome::Rejected { from, to: square }
                    }
                };
            }

            if square != from {
                if let Some(outcome) = self.try_select(rules, square) {
                    return outcome;
                }
            }

            self.clear();
            return ClickOutcome::Deselected;
        }

        self.try_select(rules, square).unwrap_or(ClickOutcome::Ignored)
    }

    fn try_select<R: ChessRules + ?Sized>(&mut self, rules: &R, square: Square) -> Option<ClickOutcome> {
        let piece = rules.board().get(square)?;
        if piece.color != rules.turn() {
            return None;
        }
        let targets = rules.legal_moves(square);
        if targets.is_empty() {
            return None;
        }
        self.selected = Some(square);
        self.targets = targets.clone();
        Some(ClickOutcome::Selected { square, targets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSnapshot, Piece, PieceColor, PieceKind};
    use std::collections::HashMap;

    /// Rules stub with a fixed legal-move table
    struct TableRules {
        board: BoardSnapshot,
        moves: HashMap<Square, Vec<Square>>,
        turn: PieceColor,
        refuse: bool,
    }

    impl ChessRules for TableRules {
        fn board(&self) -> BoardSnapshot {
            self.board.clone()
        }

        fn legal_moves(&self, from: Square) -> Vec<Square> {
            self.moves.get(&from).cloned().unwrap_or_default()
        }

        fn apply_move(&mut self, from: Square, to: Square) -> Option<MoveOutcome> {
            if self.refuse {
                return None;
            }
            let piece = self.board.get(from)?;
            let captured = self.board.get(to);
            self.board.set(from, None);
            self.board.set(to, Some(piece));
            self.turn = self.turn.opponent();
            Some(MoveOutcome {
                from,
                to,
                piece,
                captured,
                captured_on: captured.map(|_| to),
                promotion: None,
            })
        }

        fn turn(&self) -> PieceColor {
            self.turn
        }

        fn undo(&mut self) -> Option<MoveOutcome> {
            None
        }

        fn fen(&self) -> String {
            self.board.placement_fen()
        }
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn rules() -> TableRules {
        let mut board = BoardSnapshot::empty();
        board.set(sq("e4"), Some(Piece::new(PieceKind::Pawn, PieceColor::White)));
        board.set(sq("b1"), Some(Piece::new(PieceKind::Knight, PieceColor::White)));
        board.set(sq("d5"), Some(Piece::new(PieceKind::Pawn, PieceColor::Black)));
        let mut moves = HashMap::new();
        moves.insert(sq("e4"), vec![sq("e5"), sq("d5")]);
        moves.insert(sq("b1"), vec![sq("c3")]);
        moves.insert(sq("d5"), vec![sq("e4")]);
        TableRules {
            board,
            moves,
            turn: PieceColor::White,
            refuse: false,
        }
    }

    #[test]
    fn test_select_and_capture() {
        let mut rules = rules();
        let mut input = SelectionController::new();

        let outcome = input.click(&mut rules, sq("e4"));
        assert_eq!(
            outcome,
            ClickOutcome::Selected {
                square: sq("e4"),
                targets: vec![sq("e5"), sq("d5")],
            }
        );
        assert!(input.is_target(sq("d5")));

        match input.click(&mut rules, sq("d5")) {
            ClickOutcome::Moved(mv) => {
                assert!(mv.is_capture());
                assert_eq!(mv.captured, Some(Piece::new(PieceKind::Pawn, PieceColor::Black)));
            }
            other => panic!("expected a move, got {other:?}"),
        }
        assert_eq!(input.selected(), None);
        assert_eq!(rules.turn(), PieceColor::Black);
    }

    #[test]
    fn test_ignores_opponent_and_empty_squares() {
        let mut rules = rules();
        let mut input = SelectionController::new();
        assert_eq!(input.click(&mut rules, sq("d5")), ClickOutcome::Ignored);
        assert_eq!(input.click(&mut rules, sq("a8")), ClickOutcome::Ignored);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_reselect_and_deselect() {
        let mut rules = rules();
        let mut input = SelectionController::new();
        input.click(&mut rules, sq("e4"));

        let outcome = input.click(&mut rules, sq("b1"));
        assert!(matches!(outcome, ClickOutcome::Selected { square, .. } if square == sq("b1")));

        assert_eq!(input.click(&mut rules, sq("h8")), ClickOutcome::Deselected);
        assert!(input.targets().is_empty());

        input.click(&mut rules, sq("b1"));
        assert_eq!(input.click(&mut rules, sq("b1")), ClickOutcome::Deselected);
    }

    #[test]
    fn test_rejected_move_clears_selection() {
        let mut rules = rules();
        rules.refuse = true;
        let mut input = SelectionController::new();
        input.click(&mut rules, sq("e4"));
        assert_eq!(
            input.click(&mut rules, sq("e5")),
            ClickOutcome::Rejected { from: sq("e4"), to: sq("e5") }
        );
        assert_eq!(input.selected(), None);
    }
}
