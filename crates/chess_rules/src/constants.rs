//! # Rule Constants - Directions, Offsets and Castling Geometry
//!
//! ## Direction Vectors
//!
//! Movement is encoded as `(row delta, column delta)` pairs in the matrix
//! coordinates of [`Square`](crate::types::Square), where row 0 is rank 8:
//!
//! - **North**: `(-1, 0)` (toward rank 8)
//! - **South**: `(1, 0)` (toward rank 1)
//! - **East**: `(0, 1)` (toward the h-file)
//! - **West**: `(0, -1)` (toward the a-file)
//! - **Diagonals**: combinations of the above
//!
//! Sliding pieces repeat a direction until the board edge, which is never more than
//! [`MAX_RAY_STEPS`] steps away. Knights and kings apply each offset once.
//!
//! ## Castling Geometry
//!
//! Castling squares are expressed as columns on the mover's home row, so the same
//! table serves both colors.

pub type Direction = (i8, i8);

pub const N: Direction = (-1, 0);
pub const S: Direction = (1, 0);
pub const O: Direction = (0, 1);
pub const W: Direction = (0, -1);
pub const NO: Direction = (-1, 1);
pub const NW: Direction = (-1, -1);
pub const SO: Direction = (1, 1);
pub const SW: Direction = (1, -1);

pub const ROOK_DIRS: [Direction; 4] = [N, O, S, W];
pub const BISHOP_DIRS: [Direction; 4] = [NO, SO, NW, SW];
pub const QUEEN_DIRS: [Direction; 8] = [N, O, S, W, NO, SO, NW, SW];
pub const KING_DIRS: [Direction; 8] = QUEEN_DIRS;
pub const KNIGHT_DIRS: [Direction; 8] = [
    (-2, 1), (-2, -1), (2, 1), (2, -1),
    (-1, 2), (1, 2), (-1, -2), (1, -2),
];

/// Longest possible ray on an 8x8 board
pub const MAX_RAY_STEPS: i8 = 7;

/// Column the king starts on
pub const KING_HOME_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Column the king lands on after `O-O` / `O-O-O`
pub const KINGSIDE_KING_DST_COL: u8 = 6;
pub const QUEENSIDE_KING_DST_COL: u8 = 2;

/// Column the rook lands on after `O-O` / `O-O-O`
pub const KINGSIDE_ROOK_DST_COL: u8 = 5;
pub const QUEENSIDE_ROOK_DST_COL: u8 = 3;

/// Squares that must be empty between king and rook
pub const KINGSIDE_BETWEEN_COLS: [u8; 2] = [5, 6];
pub const QUEENSIDE_BETWEEN_COLS: [u8; 3] = [1, 2, 3];

/// Squares the king occupies in turn while castling, starting square included
pub const KINGSIDE_TRANSIT_COLS: [u8; 3] = [4, 5, 6];
pub const QUEENSIDE_TRANSIT_COLS: [u8; 3] = [2, 3, 4];

/// The standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
