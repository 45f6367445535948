//! Pawn reachability
//!
//! Pawns are the one piece whose source the notation already pins down. The parser
//! derives the exact origin from the move kind (one step back, two steps back, or
//! one step back on the named file for captures), so resolving a pawn move only
//! confirms that a friendly pawn stands there.
//!
//! ## Pawn Movement Rules
//!
//! - **Forward**: one square if empty
//! - **Double step**: two squares from the starting row, both squares empty
//! - **Capture**: one square diagonally forward onto an enemy piece
//! - **En passant**: diagonal capture onto the en-passant target
//!
//! A double step whose intermediate square is occupied is aligned but blocked.

use crate::board::Board;
use crate::notation::{MoveDescriptor, MoveKind};
use crate::types::*;

use super::{PieceStep, Reachability};

/// Confirm the exact pawn source named by `descriptor`
pub(crate) fn pawn_sources(board: &Board, side: Color, descriptor: &MoveDescriptor) -> Reachability {
    let mut found = Reachability::default();
    let Some(source) = descriptor.source.exact_square() else {
        return found;
    };
    if !board.holds(source, PieceKind::Pawn, side) {
        return found;
    }

    let unobstructed = match descriptor.kind {
        MoveKind::PawnDoubleMove => source
            .offset(side.forward(), 0)
            .is_some_and(|middle| board.is_empty(middle)),
        _ => true,
    };
    found.record(source, unobstructed);
    found
}

/// Generate pawn steps from a given square
///
/// Promotions are emitted once per destination; the promoted piece does not
/// matter for king safety.
pub(crate) fn generate_pawn_steps(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    steps: &mut Vec<PieceStep>,
) {
    let forward = color.forward();

    if let Some(one) = from.offset(forward, 0) {
        if board.is_empty(one) {
            steps.push(PieceStep::new(from, one));
            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(forward, 0) {
                    if board.is_empty(two) {
                        steps.push(PieceStep::new(from, two));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(forward, d_col) else {
            continue;
        };
        if board.is_enemy(to, color) {
            steps.push(PieceStep::new(from, to));
        } else if en_passant == Some(to) && board.is_empty(to) {
            steps.push(PieceStep {
                from,
                to,
                en_passant_victim: to.offset(-forward, 0),
            });
        }
    }
}
