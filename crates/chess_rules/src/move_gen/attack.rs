//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! The classifier uses these on scratch boards to find moves that expose the king
//! and castling paths that cross attacked squares.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all opponent pieces
//! and verify if any can reach the target square. This is cheaper than
//! generating all moves and checking if any target the square.

use crate::board::Board;
use crate::types::*;

/// Check if a square is under attack by pieces of the specified color
///
/// This function determines if any piece of `by_color` can attack the target
/// square. It's used for:
/// - Check detection (is the king attacked?)
/// - Move legality (does this move leave the king in check?)
/// - Castling transit (does the king pass over an attacked square?)
///
/// # Arguments
///
/// * `board` - The board to inspect
/// * `square` - Target square
/// * `by_color` - Color of pieces that might attack
///
/// # Examples
///
/// ```rust,ignore
/// // Check if e4 is attacked by black pieces
/// let attacked = is_square_attacked(&board, Square::parse("e4").unwrap(), Color::Black);
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board.pieces(by_color).any(|(from, piece)| {
        if from == square {
            return false;
        }
        match piece.kind {
            PieceKind::Pawn => can_pawn_attack(from, square, by_color),
            PieceKind::Knight => can_knight_attack(from, square),
            PieceKind::Bishop => can_bishop_attack(board, from, square),
            PieceKind::Rook => can_rook_attack(board, from, square),
            PieceKind::Queen => can_queen_attack(board, from, square),
            PieceKind::King => can_king_attack(from, square),
        }
    })
}

/// Check if the king of `color` is attacked
///
/// A board without that king is never in check.
pub fn king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}

/// Row and column distance from `from` to `to`
#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// Pawns attack one square diagonally forward
fn can_pawn_attack(from: Square, to: Square, color: Color) -> bool {
    let (d_row, d_col) = deltas(from, to);
    d_row == color.forward() && d_col.abs() == 1
}

/// Knights attack in an L-shape and ignore occupancy
fn can_knight_attack(from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    let (d_row, d_col) = (d_row.abs(), d_col.abs());

    // Valid L-shape: exactly 2+1 or 1+2 squares
    (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
}

/// Bishops attack along an unblocked diagonal
fn can_bishop_attack(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);

    // Must be on same diagonal (equal column and row distance)
    d_row.abs() == d_col.abs() && is_path_clear(board, from, to)
}

/// Rooks attack along an unblocked rank or file
fn can_rook_attack(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    (d_row == 0 || d_col == 0) && is_path_clear(board, from, to)
}

/// Queens combine rook and bishop movement
fn can_queen_attack(board: &Board, from: Square, to: Square) -> bool {
    can_rook_attack(board, from, to) || can_bishop_attack(board, from, to)
}

/// Kings attack the 8 adjacent squares
fn can_king_attack(from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    d_row.abs() <= 1 && d_col.abs() <= 1
}

/// Check that every square strictly between `from` and `to` is empty
///
/// Only meaningful for squares on a shared rank, file or diagonal.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    let distance = d_row.abs().max(d_col.abs());

    (1..distance).all(|step| {
        from.offset(step_row * step, step_col * step)
            .is_some_and(|between| board.is_empty(between))
    })
}
