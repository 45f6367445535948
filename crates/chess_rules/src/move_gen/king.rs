//! King reachability
//!
//! The king steps one square in any of the 8 directions. Castling never goes
//! through here: it is a separate move kind with its own board checks.

use crate::board::Board;
use crate::constants::*;
use crate::types::*;

use super::{leaper_sources, PieceStep, Reachability, SourceQuery};

/// Kings adjacent to the query destination
pub(crate) fn king_sources(board: &Board, query: &SourceQuery) -> Reachability {
    leaper_sources(board, query, &KING_DIRS)
}

/// Generate single-square king steps, skipping own pieces
pub(crate) fn generate_king_steps(board: &Board, from: Square, color: Color, steps: &mut Vec<PieceStep>) {
    for &(d_row, d_col) in &KING_DIRS {
        if let Some(to) = from.offset(d_row, d_col) {
            if !board.is_friendly(to, color) {
                steps.push(PieceStep::new(from, to));
            }
        }
    }
}
