//! Public API for the rules crate
//!
//! Provides the string-in, verdict-out entry points plus move application for
//! callers that want to keep playing from the resulting position.

use crate::board::Position;
use crate::classify::{classify_position, judge, IllegalReason, LegalMove, Verdict};
use crate::error::{FenResult, PlayError};
use crate::notation::MoveKind;
use crate::types::*;

/// Classify a SAN move against a FEN position
///
/// Malformed FEN input is an error; an illegal move is not, it is a
/// [`Verdict::Illegal`].
///
/// # Examples
///
/// ```rust,ignore
/// let verdict = classify("4k3/8/8/8/P7/8/8/R3K3 w - - 0 1", "Ra8")?;
/// assert_eq!(verdict, Verdict::Illegal(IllegalReason::AttemptingToMoveBlockedPiece));
/// ```
pub fn classify(fen: &str, san: &str) -> FenResult<Verdict> {
    let position = Position::from_fen(fen)?;
    Ok(classify_position(&position, san))
}

/// Play a legal move and return the resulting position
pub fn play_position(position: &Position, san: &str) -> Result<Position, IllegalReason> {
    let legal = judge(position, san)?;
    Ok(position.apply(&legal))
}

/// Play a SAN move on a FEN position and return the resulting FEN
pub fn play(fen: &str, san: &str) -> Result<String, PlayError> {
    let position = Position::from_fen(fen)?;
    let next = play_position(&position, san)?;
    Ok(next.to_fen())
}

impl Position {
    /// Apply a move that passed classification
    ///
    /// Updates the board, castling rights, en-passant target, both counters and
    /// the side to move.
    pub fn apply(&self, legal: &LegalMove) -> Position {
        let side = self.side_to_move;

        let mut castling = self.castling;
        revoke_castling(&mut castling, legal.from);
        revoke_castling(&mut castling, legal.to);

        let en_passant = match legal.descriptor.kind {
            MoveKind::PawnDoubleMove => legal.from.offset(side.forward(), 0),
            _ => None,
        };

        let halfmove_clock = if legal.piece.kind == PieceKind::Pawn || legal.captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        let fullmove_number = match side {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number.saturating_add(1),
        };

        Position {
            board: legal.apply_to(&self.board),
            side_to_move: side.opponent(),
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }
}

/// Drop the rights tied to a king or rook home square once anything leaves or
/// lands on it
fn revoke_castling(rights: &mut CastlingRights, square: Square) {
    for color in [Color::White, Color::Black] {
        if square.row() != color.home_row() {
            continue;
        }
        match square.col() {
            4 => rights.clear_color(color),
            0 => rights.remove(color, CastleSide::Queenside),
            7 => rights.remove(color, CastleSide::Kingside),
            _ => {}
        }
    }
}
