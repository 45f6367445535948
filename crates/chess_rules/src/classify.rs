//! # Legality Classifier - SAN Move Verdicts
//!
//! ## Overview
//!
//! Given a [`Position`] and a SAN token, the classifier answers "is this move
//! legal here, and if not, why?". The answer is a [`Verdict`]: either `Valid`, or
//! `Illegal` with exactly one [`IllegalReason`].
//!
//! ## Check Order
//!
//! Checks run in a fixed order and the first failure wins, so the same input
//! always reports the same reason:
//!
//! 1. The token must match a known notation shape
//! 2. Castles need the matching castling right
//! 3. The destination may not hold a friendly piece
//! 4. En passant needs the en-passant target and a capturable pawn behind it
//! 5. Captures need an enemy piece, plain moves need an empty square
//! 6. Castles need king and rook at home, empty squares between them, and a king
//!    path that is never attacked
//! 7. Some matching piece must be aligned, and one of those must have a clear path
//! 8. The move may not leave the mover's king attacked
//! 9. Exactly one piece may qualify
//! 10. A `+` or `#` suffix must be true of the resulting position
//!
//! The check suffix is judged last, on the position the move produces, so a move
//! that fails any earlier check reports that failure instead.
//!
//! ## King Safety
//!
//! Steps 6 and 8 never mutate the caller's position. They copy the [`Board`],
//! play the move (or place the castling king) on the copy, and ask
//! [`king_in_check`] about the copy.

use thiserror::Error;

use crate::board::{Board, Position};
use crate::constants::*;
use crate::move_gen::{self, king_in_check};
use crate::notation::{parse_san, CheckSuffix, MoveDescriptor, MoveKind};
use crate::types::*;

/// Why a move was rejected
///
/// The display strings are stable and safe to show to users.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalReason {
    #[error("Incorrect check indication")]
    IncorrectCheckIndication,
    #[error("Incorrect checkmate indication")]
    IncorrectCheckmateIndication,
    #[error("Unknown move type")]
    UnknownMoveType,
    #[error("No castling rights")]
    NoCastlingRights,
    #[error("Self capture")]
    SelfCapture,
    #[error("Illegal en passant capture")]
    IllegalEnPassantCapture,
    #[error("No piece to be captured")]
    NoPieceToBeCaptured,
    #[error("Empty square is not empty")]
    EmptySquareIsNotEmpty,
    #[error("Illegal castling")]
    IllegalCastling,
    #[error("Castling through blocked squares")]
    CastlingThroughBlockedSquares,
    #[error("Castling through check")]
    CastlingThroughCheck,
    #[error("No piece reaches destination")]
    NoPieceReachesDestination,
    #[error("Attempting to move blocked piece")]
    AttemptingToMoveBlockedPiece,
    #[error("Move keeps king in check")]
    MoveKeepsKingInCheck,
    #[error("Attempting to move pinned piece")]
    AttemptingToMovePinnedPiece,
    #[error("Ambiguous move")]
    AmbiguousMove,
}

/// Outcome of classifying one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Valid,
    Illegal(IllegalReason),
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn reason(self) -> Option<IllegalReason> {
        match self {
            Verdict::Valid => None,
            Verdict::Illegal(reason) => Some(reason),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Valid => write!(f, "Valid move"),
            Verdict::Illegal(reason) => write!(f, "{reason}"),
        }
    }
}

impl From<Result<LegalMove, IllegalReason>> for Verdict {
    fn from(result: Result<LegalMove, IllegalReason>) -> Self {
        match result {
            Ok(_) => Verdict::Valid,
            Err(reason) => Verdict::Illegal(reason),
        }
    }
}

/// A move that passed every check, with its squares resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub descriptor: MoveDescriptor,
    /// The moving piece (the king, for castles)
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Square of the captured piece; differs from `to` for en passant
    pub captured: Option<Square>,
    /// Rook relocation of a castle
    pub rook: Option<(Square, Square)>,
}

impl LegalMove {
    /// Board after the move, including captures, promotion and the castling rook
    pub fn apply_to(&self, board: &Board) -> Board {
        let mut next = *board;
        if let Some(victim) = self.captured {
            next.set(victim, None);
        }
        next.set(self.from, None);
        let placed = self
            .descriptor
            .promotion
            .map_or(self.piece, |kind| Piece::new(kind, self.piece.color));
        next.set(self.to, Some(placed));
        if let Some((rook_from, rook_to)) = self.rook {
            let rook = next.take(rook_from);
            next.set(rook_to, rook);
        }
        next
    }
}

/// Classify `san` against an already-decoded position
///
/// # Examples
///
/// ```rust,ignore
/// let position = Position::from_fen(START_FEN)?;
/// assert_eq!(classify_position(&position, "e4"), Verdict::Valid);
/// ```
pub fn classify_position(position: &Position, san: &str) -> Verdict {
    let verdict = Verdict::from(judge(position, san));
    tracing::trace!(san, side = %position.side_to_move(), %verdict, "classified move");
    verdict
}

/// Run the full check chain and return the resolved move when it is legal
pub fn judge(position: &Position, san: &str) -> Result<LegalMove, IllegalReason> {
    let parsed = parse_san(san, position.side_to_move(), position.board());
    let descriptor = parsed.descriptor.ok_or(IllegalReason::UnknownMoveType)?;
    let legal = resolve_move(position, descriptor)?;
    check_suffix(position, &legal, parsed.suffix)?;
    Ok(legal)
}

fn resolve_move(position: &Position, mut descriptor: MoveDescriptor) -> Result<LegalMove, IllegalReason> {
    let side = position.side_to_move();
    let board = position.board();
    let destination = descriptor.destination;

    if let Some(wing) = descriptor.kind.castle_side() {
        if !position.castling().has(side, wing) {
            return Err(IllegalReason::NoCastlingRights);
        }
        return castle(position, descriptor, wing);
    }

    if board.is_friendly(destination, side) {
        return Err(IllegalReason::SelfCapture);
    }

    // A plain capture onto the en-passant target is en passant
    if descriptor.kind == MoveKind::PawnCapture
        && board.is_empty(destination)
        && position.en_passant() == Some(destination)
    {
        descriptor.kind = MoveKind::PawnEnPassant;
    }

    let captured = if descriptor.kind == MoveKind::PawnEnPassant {
        Some(en_passant_victim(position, destination)?)
    } else if descriptor.kind.is_capture() {
        if !board.is_enemy(destination, side) {
            return Err(IllegalReason::NoPieceToBeCaptured);
        }
        Some(destination)
    } else {
        if !board.is_empty(destination) {
            return Err(IllegalReason::EmptySquareIsNotEmpty);
        }
        None
    };

    let reach = move_gen::resolve(board, side, &descriptor);
    if reach.aligned.is_empty() {
        return Err(IllegalReason::NoPieceReachesDestination);
    }
    let Some(&from) = reach.valid.first() else {
        return Err(IllegalReason::AttemptingToMoveBlockedPiece);
    };

    let legal = LegalMove {
        descriptor,
        piece: Piece::new(descriptor.piece, side),
        from,
        to: destination,
        captured,
        rook: None,
    };

    // Only the first candidate is simulated; several candidates end as ambiguous anyway
    if king_in_check(&legal.apply_to(board), side) {
        return Err(if position.is_in_check(side) {
            IllegalReason::MoveKeepsKingInCheck
        } else {
            IllegalReason::AttemptingToMovePinnedPiece
        });
    }

    if reach.valid.len() > 1 {
        return Err(IllegalReason::AmbiguousMove);
    }

    Ok(legal)
}

/// The pawn an en-passant capture onto `destination` would remove
fn en_passant_victim(position: &Position, destination: Square) -> Result<Square, IllegalReason> {
    let side = position.side_to_move();
    if position.en_passant() != Some(destination) {
        return Err(IllegalReason::IllegalEnPassantCapture);
    }
    destination
        .offset(-side.forward(), 0)
        .filter(|&victim| position.board().holds(victim, PieceKind::Pawn, side.opponent()))
        .ok_or(IllegalReason::IllegalEnPassantCapture)
}

fn castle(position: &Position, descriptor: MoveDescriptor, wing: CastleSide) -> Result<LegalMove, IllegalReason> {
    let side = position.side_to_move();
    let board = position.board();
    let row = side.home_row();

    let (rook_col, rook_dst_col, between, transit): (u8, u8, &[u8], &[u8]) = match wing {
        CastleSide::Kingside => (
            KINGSIDE_ROOK_COL,
            KINGSIDE_ROOK_DST_COL,
            &KINGSIDE_BETWEEN_COLS[..],
            &KINGSIDE_TRANSIT_COLS[..],
        ),
        CastleSide::Queenside => (
            QUEENSIDE_ROOK_COL,
            QUEENSIDE_ROOK_DST_COL,
            &QUEENSIDE_BETWEEN_COLS[..],
            &QUEENSIDE_TRANSIT_COLS[..],
        ),
    };

    let king_from = Square::new(row, KING_HOME_COL);
    let rook_from = Square::new(row, rook_col);
    if !board.holds(king_from, PieceKind::King, side) || !board.holds(rook_from, PieceKind::Rook, side) {
        return Err(IllegalReason::IllegalCastling);
    }

    if between.iter().any(|&col| !board.is_empty(Square::new(row, col))) {
        return Err(IllegalReason::CastlingThroughBlockedSquares);
    }

    // Lift king and rook, then stand the king on each transit square in turn
    let mut cleared = *board;
    cleared.set(king_from, None);
    cleared.set(rook_from, None);
    let king = Piece::new(PieceKind::King, side);
    for &col in transit {
        let mut scratch = cleared;
        scratch.set(Square::new(row, col), Some(king));
        if king_in_check(&scratch, side) {
            return Err(IllegalReason::CastlingThroughCheck);
        }
    }

    Ok(LegalMove {
        descriptor,
        piece: king,
        from: king_from,
        to: descriptor.destination,
        captured: None,
        rook: Some((rook_from, Square::new(row, rook_dst_col))),
    })
}

/// Judge a `+` or `#` suffix against the position the move produces
///
/// `+` on a mating move is accepted.
fn check_suffix(position: &Position, legal: &LegalMove, suffix: CheckSuffix) -> Result<(), IllegalReason> {
    if suffix == CheckSuffix::None {
        return Ok(());
    }

    let next = position.apply(legal);
    let gives_check = next.is_in_check(next.side_to_move());
    match suffix {
        CheckSuffix::Check if !gives_check => Err(IllegalReason::IncorrectCheckIndication),
        CheckSuffix::Checkmate if !gives_check || next.has_legal_reply() => {
            Err(IllegalReason::IncorrectCheckmateIndication)
        }
        _ => Ok(()),
    }
}
