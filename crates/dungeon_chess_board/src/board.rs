// SPDX-License-Identifier: MIT OR Apache-2.0
//! Board model: squares, pieces and board snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of files (and ranks) on the board
pub const BOARD_SIZE: u8 = 8;

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Pawn
    Pawn,
    /// Knight
    Knight,
    /// Bishop
    Bishop,
    /// Rook
    Rook,
    /// Queen
    Queen,
    /// King
    King,
}

impl PieceKind {
    /// Get all piece kinds
    pub fn all() -> &'static [PieceKind] {
        &[
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ]
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }

    /// Lowercase FEN letter for this kind
    pub fn fen_char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Parse a FEN letter (either case)
    pub fn from_fen_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

/// Side a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PieceColor {
    /// White moves first
    #[default]
    White,
    /// Black
    Black,
}

impl PieceColor {
    /// The other side
    pub fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Piece kind
    pub kind: PieceKind,
    /// Owning side
    pub color: PieceColor,
}

impl Piece {
    /// Create a new piece
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn fen_char(&self) -> char {
        let c = self.kind.fen_char();
        match self.color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.name(), self.kind.name())
    }
}

/// Square parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    /// Not two characters like `e4`
    #[error("Invalid square notation: {0:?}")]
    InvalidNotation(String),

    /// File or rank outside the board
    #[error("Square out of range: file {file}, rank {rank}")]
    OutOfRange {
        /// 0-based file
        file: u8,
        /// 0-based rank
        rank: u8,
    },
}

/// A board square, 0-based (`a1` is file 0, rank 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square, checking bounds
    pub fn new(file: u8, rank: u8) -> Result<Self, SquareError> {
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return Err(SquareError::OutOfRange { file, rank });
        }
        Ok(Self { file, rank })
    }

    /// Square nearest to the given coordinates
    pub fn clamped(file: u8, rank: u8) -> Self {
        Self {
            file: file.min(BOARD_SIZE - 1),
            rank: rank.min(BOARD_SIZE - 1),
        }
    }

    /// 0-based file (a = 0)
    pub fn file(&self) -> u8 {
        self.file
    }

    /// 0-based rank (1 = 0)
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// All 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square { file, rank }))
    }

    /// Whether this is a dark square (a1 is dark)
    pub fn is_dark(&self) -> bool {
        (self.file + self.rank) % 2 == 0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SquareError::InvalidNotation(s.to_string()));
        }
        Square::new(file - b'a', rank - b'1')
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

/// 8x8 board contents, rank-major from the far rank (8) to the near rank (1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    rows: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl BoardSnapshot {
    /// Empty board
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from rows ordered rank 8 first
    pub fn from_rows(rows: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        Self { rows }
    }

    /// Standard starting position
    pub fn starting_position() -> Self {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for (file, kind) in back.iter().enumerate() {
            let file = file as u8;
            board.set(Square { file, rank: 0 }, Some(Piece::new(*kind, PieceColor::White)));
            board.set(Square { file, rank: 1 }, Some(Piece::new(PieceKind::Pawn, PieceColor::White)));
            board.set(Square { file, rank: 6 }, Some(Piece::new(PieceKind::Pawn, PieceColor::Black)));
            board.set(Square { file, rank: 7 }, Some(Piece::new(*kind, PieceColor::Black)));
        }
        board
    }

    fn row_index(square: Square) -> usize {
        (BOARD_SIZE - 1 - square.rank) as usize
    }

    /// Piece on a square
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.rows[Self::row_index(square)][square.file as usize]
    }

    /// Place or clear a square
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.rows[Self::row_index(square)][square.file as usize] = piece;
    }

    /// Rows as delivered by the rules engine, rank 8 first
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        &self.rows
    }

    /// Occupied squares with their pieces
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Piece placement field of a FEN string
    pub fn placement_fen(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            let mut empty = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if i + 1 < self.rows.len() {
                out.push('/');
            }
        }
        out
    }
}
