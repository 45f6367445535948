//! # Core Types - Colors, Pieces, Squares and Castling Rights
//!
//! ## Overview
//!
//! This module defines the small value types every other module of the classifier
//! speaks in. All of them are `Copy`, so the classifier can hand them around freely
//! while it builds scratch boards for check simulation.
//!
//! ## Coordinate System
//!
//! Squares are addressed the way a FEN string is read: **row 0 is rank 8**, row 7
//! is rank 1, and column 0 is the a-file. This keeps FEN decoding a straight
//! left-to-right, top-to-bottom walk, and SAN coordinates translate with a single
//! subtraction:
//!
//! ```text
//! row = 8 - rank        col = file - 'a'
//! ```
//!
//! ### Pawn Direction
//!
//! Because rank 8 is at the top, white pawns move toward **decreasing** rows and
//! black pawns toward increasing rows. [`Color::forward`] returns that row delta so
//! pawn arithmetic never has to branch on color.
//!
//! ## Castling Rights
//!
//! [`CastlingRights`] packs the four FEN flags (`KQkq`) into a `u8`. The FEN field
//! order is preserved when formatting.

use std::fmt;

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step for this color
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this color's king and rooks at the start of the game
    #[inline]
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row this color's pawns start on (rank 2 for white, rank 7 for black)
    #[inline]
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this color promotes on
    #[inline]
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row a pawn of this color lands on after its double advance
    #[inline]
    pub fn double_advance_row(self) -> u8 {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Kind of chess piece, independent of color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Parse the uppercase SAN letter of a non-pawn piece
    pub fn from_san_letter(letter: u8) -> Option<Self> {
        match letter {
            b'N' => Some(PieceKind::Knight),
            b'B' => Some(PieceKind::Bishop),
            b'R' => Some(PieceKind::Rook),
            b'Q' => Some(PieceKind::Queen),
            b'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Parse a promotion letter (`=Q`, `=R`, `=B`, `=N`)
    pub fn from_promotion_letter(letter: u8) -> Option<Self> {
        match letter {
            b'N' => Some(PieceKind::Knight),
            b'B' => Some(PieceKind::Bishop),
            b'R' => Some(PieceKind::Rook),
            b'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Uppercase letter used by SAN and by white pieces in FEN
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A colored piece occupying a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Decode a FEN piece symbol (`PNBRQK` white, `pnbrqk` black)
    pub fn from_fen_char(symbol: char) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match symbol.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { kind, color })
    }

    /// Encode as a FEN piece symbol
    pub fn to_fen_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }
}

/// A board square in matrix coordinates (row 0 = rank 8, col 0 = a-file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Build a square from matrix coordinates
    ///
    /// Both coordinates must be below 8.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square { row, col }
    }

    /// Build a square from signed coordinates, returning `None` off the board
    #[inline]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Build a square from SAN bytes such as `b'e'` and `b'4'`
    pub fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square::new(b'8' - rank, file - b'a'))
    }

    /// Parse algebraic coordinates such as `"e4"`
    pub fn parse(text: &str) -> Option<Self> {
        match text.as_bytes() {
            [file, rank] => Square::from_file_rank(*file, *rank),
            _ => None,
        }
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Rank number, 1 through 8
    #[inline]
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// File letter, `'a'` through `'h'`
    #[inline]
    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Step by a row/column delta, returning `None` when leaving the board
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Square::try_new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// Iterate all 64 squares in FEN order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank())
    }
}

/// Which wing a castle goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastleSide {
    /// `O-O`
    Kingside,
    /// `O-O-O`
    Queenside,
}

/// The FEN castling field as a bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => 0b0001,
            (Color::White, CastleSide::Queenside) => 0b0010,
            (Color::Black, CastleSide::Kingside) => 0b0100,
            (Color::Black, CastleSide::Queenside) => 0b1000,
        }
    }

    /// Whether `color` may still castle toward `side`
    #[inline]
    pub fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    #[inline]
    pub fn insert(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit(color, side);
    }

    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit(color, side);
    }

    /// Drop both rights of one color (after a king move)
    pub fn clear_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let flags = [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ];
        for (color, side, symbol) in flags {
            if self.has(color, side) {
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
