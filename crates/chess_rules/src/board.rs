//! Board and position representation
//!
//! Provides the 8x8 occupancy matrix the classifier reasons over, plus the
//! [`Position`] wrapper that adds side to move, castling rights, the en-passant
//! target and the move counters.
//!
//! A position is never mutated while it is being classified. Check simulation
//! clones the [`Board`] (64 small cells) and edits the clone.

use crate::types::*;

/// 8x8 matrix of square contents, indexed `[row][col]` with row 0 = rank 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces on it
    pub fn empty() -> Self {
        Board::default()
    }

    /// Get the piece on a square
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    /// Place (or clear, with `None`) a square
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row() as usize][square.col() as usize] = piece;
    }

    /// Remove and return the piece on a square
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Check if the square holds a piece of `color`
    #[inline]
    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color == color)
    }

    /// Check if the square holds a piece of the opponent of `color`
    #[inline]
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color != color)
    }

    /// Check if the square holds exactly this kind and color
    #[inline]
    pub fn holds(&self, square: Square, kind: PieceKind, color: Color) -> bool {
        self.get(square) == Some(Piece::new(kind, color))
    }

    /// Locate the king of `color`
    ///
    /// Positions are trusted to carry one king per side. With no king on the board
    /// this returns `None` and the side is treated as never in check.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.holds(sq, PieceKind::King, color))
    }

    /// Iterate the pieces of one color with their squares
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Rows from rank 8 down to rank 1
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }
}

/// A decoded FEN: board plus the game-state fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Assemble a position from its parts, with counters at `0` and `1`
    pub fn new(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Self {
        Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
}
