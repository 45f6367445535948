//! Knight reachability
//!
//! Knights move in an L-shape pattern: 2 squares in one direction, then 1 square
//! perpendicular (or vice versa).
//!
//! ## Knight Movement Rules
//!
//! - Knights jump over pieces, so a knight on a matching offset always reaches
//!   the destination (aligned and valid are the same list)
//! - 8 possible offsets from most squares (fewer near edges)
//! - Cannot move to squares occupied by own pieces

use crate::board::Board;
use crate::constants::*;
use crate::types::*;

use super::{leaper_sources, PieceStep, Reachability, SourceQuery};

/// Knights that could land on the query destination
pub(crate) fn knight_sources(board: &Board, query: &SourceQuery) -> Reachability {
    leaper_sources(board, query, &KNIGHT_DIRS)
}

/// Generate knight steps from a given square
///
/// # Arguments
///
/// * `board` - The board
/// * `from` - Square the knight stands on
/// * `color` - Color of the knight
/// * `steps` - Output vector to append steps to
///
/// # Examples
///
/// ```rust,ignore
/// let mut steps = Vec::new();
/// generate_knight_steps(&board, Square::parse("b1").unwrap(), Color::White, &mut steps);
/// ```
pub(crate) fn generate_knight_steps(board: &Board, from: Square, color: Color, steps: &mut Vec<PieceStep>) {
    for &(d_row, d_col) in &KNIGHT_DIRS {
        if let Some(to) = from.offset(d_row, d_col) {
            // Valid if destination is empty or contains opponent piece
            if !board.is_friendly(to, color) {
                steps.push(PieceStep::new(from, to));
            }
        }
    }
}
