//! # Reachability Resolver - Which Pieces Can Reach a Square
//!
//! ## Overview
//!
//! Move generation usually runs forward: start from a piece and list its targets.
//! Classifying a SAN move needs the opposite question. The notation names a piece
//! kind and a destination, so the resolver works **backwards from the destination**
//! and reports which squares hold a friendly piece of that kind that could have made
//! the move.
//!
//! The answer is a [`Reachability`] with two lists:
//!
//! - **aligned**: the piece stands on a geometrically consistent line or offset,
//!   whether or not something is in the way.
//! - **valid**: the subset of aligned squares whose path is unobstructed.
//!
//! Keeping both lets the classifier tell "a rook is there but a pawn is in the way"
//! (`AttemptingToMoveBlockedPiece`) apart from "no rook could ever get there"
//! (`NoPieceReachesDestination`).
//!
//! ## Per-Piece Rules
//!
//! | Piece                | Module        | Strategy                                       |
//! |----------------------|---------------|------------------------------------------------|
//! | Rook, bishop, queen  | `sliding`     | Rays cast outward from the destination         |
//! | Knight               | `knight`      | Fixed offsets, no blocking                     |
//! | King                 | `king`        | Fixed offsets, no blocking                     |
//! | Pawn                 | `pawn`        | Single source computed from the move kind      |
//!
//! ## Reply Generation
//!
//! Judging a `#` suffix needs to know whether the opponent has any legal reply. Each
//! piece module therefore also generates forward steps for one piece, and
//! [`Position::has_legal_reply`] tries them on scratch boards. This is the only
//! forward generation in the crate and it is never used to pick moves.

pub mod attack;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod sliding;

use crate::board::{Board, Position};
use crate::constants::*;
use crate::notation::{MoveDescriptor, SourceConstraint};
use crate::types::*;

pub use attack::{is_square_attacked, king_in_check};

/// Candidate source squares for a parsed move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    /// Squares with a matching piece on a consistent line, blocked or not
    pub aligned: Vec<Square>,
    /// Aligned squares whose path to the destination is clear
    pub valid: Vec<Square>,
}

impl Reachability {
    #[inline]
    pub(crate) fn record(&mut self, square: Square, unobstructed: bool) {
        self.aligned.push(square);
        if unobstructed {
            self.valid.push(square);
        }
    }
}

/// What the resolver is looking for: this piece, landing here, from squares
/// admitted by the constraint
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceQuery {
    pub piece: Piece,
    pub destination: Square,
    pub constraint: SourceConstraint,
}

/// Resolve the candidate sources of `descriptor` for `side`
///
/// # Arguments
///
/// * `board` - Board to search
/// * `side` - Color of the moving piece
/// * `descriptor` - Parsed move (piece kind, destination, source constraint)
///
/// # Examples
///
/// ```rust,ignore
/// // Rook a1, own pawn a4: "Ra8" finds the rook but cannot use it
/// let reach = resolve(position.board(), Color::White, &descriptor);
/// assert_eq!(reach.aligned.len(), 1);
/// assert!(reach.valid.is_empty());
/// ```
pub fn resolve(board: &Board, side: Color, descriptor: &MoveDescriptor) -> Reachability {
    let query = SourceQuery {
        piece: Piece::new(descriptor.piece, side),
        destination: descriptor.destination,
        constraint: descriptor.source,
    };

    match descriptor.piece {
        PieceKind::Rook => sliding::slider_sources(board, &query, &ROOK_DIRS),
        PieceKind::Bishop => sliding::slider_sources(board, &query, &BISHOP_DIRS),
        PieceKind::Queen => sliding::slider_sources(board, &query, &QUEEN_DIRS),
        PieceKind::Knight => knight::knight_sources(board, &query),
        PieceKind::King => king::king_sources(board, &query),
        PieceKind::Pawn => pawn::pawn_sources(board, side, descriptor),
    }
}

/// Sources for pieces that jump by fixed offsets and cannot be blocked
pub(crate) fn leaper_sources(board: &Board, query: &SourceQuery, offsets: &[Direction]) -> Reachability {
    let mut found = Reachability::default();
    for &(d_row, d_col) in offsets {
        let Some(square) = query.destination.offset(d_row, d_col) else {
            continue;
        };
        if board.get(square) == Some(query.piece) && query.constraint.admits(square) {
            found.record(square, true);
        }
    }
    found
}

/// A single forward step of one piece, used for reply detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceStep {
    pub from: Square,
    pub to: Square,
    /// Square of the pawn removed by an en-passant capture
    pub en_passant_victim: Option<Square>,
}

impl PieceStep {
    pub(crate) fn new(from: Square, to: Square) -> Self {
        PieceStep {
            from,
            to,
            en_passant_victim: None,
        }
    }

    /// Board after the step (promotion is irrelevant to king safety)
    pub(crate) fn apply_to(&self, board: &Board) -> Board {
        let mut next = *board;
        if let Some(victim) = self.en_passant_victim {
            next.set(victim, None);
        }
        let piece = next.take(self.from);
        next.set(self.to, piece);
        next
    }
}

/// Generate every geometric step for the pieces of `side`
///
/// Steps never land on a friendly piece; whether they leave the king in check is
/// not considered here.
pub fn generate_steps(board: &Board, side: Color, en_passant: Option<Square>) -> Vec<PieceStep> {
    let mut steps = Vec::with_capacity(64);
    for (from, piece) in board.pieces(side) {
        match piece.kind {
            PieceKind::Pawn => pawn::generate_pawn_steps(board, from, side, en_passant, &mut steps),
            PieceKind::Knight => knight::generate_knight_steps(board, from, side, &mut steps),
            PieceKind::Bishop => sliding::generate_sliding_steps(board, from, side, &BISHOP_DIRS, &mut steps),
            PieceKind::Rook => sliding::generate_sliding_steps(board, from, side, &ROOK_DIRS, &mut steps),
            PieceKind::Queen => sliding::generate_sliding_steps(board, from, side, &QUEEN_DIRS, &mut steps),
            PieceKind::King => king::generate_king_steps(board, from, side, &mut steps),
        }
    }
    steps
}

impl Position {
    /// Check if `color`'s king is attacked on this position's board
    pub fn is_in_check(&self, color: Color) -> bool {
        king_in_check(&self.board, color)
    }

    /// Whether the side to move has at least one move that leaves its king safe
    ///
    /// Castling is not tried: it can never resolve a check, and this is only asked
    /// about positions where the side to move is in check.
    pub fn has_legal_reply(&self) -> bool {
        let side = self.side_to_move;
        generate_steps(&self.board, side, self.en_passant)
            .iter()
            .any(|step| !king_in_check(&step.apply_to(&self.board), side))
    }
}
