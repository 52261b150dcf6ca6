// SPDX-License-Identifier: MIT OR Apache-2.0
//! Board side of Dungeon Chess.
//!
//! This crate provides everything between the player's clicks and the
//! escort animation:
//! - Board model (squares, pieces, snapshots)
//! - The rules-engine capability the game delegates legality to
//! - Board-to-world layout
//! - Click-to-move translation
//! - Board colour themes
//!
//! ## Architecture
//!
//! Legal-move generation is never done here. A chess library is plugged in
//! through [`ChessRules`] and this crate only turns its answers into
//! selections, highlights and move outcomes.

pub mod board;
pub mod rules;
pub mod layout;
pub mod input;
pub mod theme;

pub use board::{BoardSnapshot, Piece, PieceColor, PieceKind, Square, SquareError, BOARD_SIZE};
pub use rules::{ChessRules, MoveOutcome};
pub use layout::BoardLayout;
pub use input::{ClickOutcome, SelectionController};
pub use theme::{BoardTheme, ThemeCycle, ThemePreset};
