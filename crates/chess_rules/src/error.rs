//! Error types for the rules crate
//!
//! Illegal moves are not errors here: they are reported as a
//! [`Verdict`](crate::classify::Verdict). The types below cover input that cannot
//! be decoded at all, and the one operation that refuses illegal moves
//! ([`play`](crate::api::play)).

use thiserror::Error;

use crate::classify::IllegalReason;

/// Errors raised while decoding a FEN string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Wrong number of space-separated fields
    #[error("Malformed FEN: expected 4 to 6 fields, found {found}")]
    FieldCount { found: usize },

    /// Board layout does not have 8 ranks
    #[error("Malformed FEN: expected 8 ranks, found {found}")]
    RankCount { found: usize },

    /// A rank expands to more or fewer than 8 cells
    #[error("Malformed FEN: rank {rank} covers {cells} squares instead of 8")]
    RankLength { rank: u8, cells: usize },

    /// Character that is neither a piece symbol nor a 1-8 run length
    #[error("Malformed FEN: unrecognized symbol '{symbol}' in board layout")]
    UnknownSymbol { symbol: char },

    /// Side to move is not `w` or `b`
    #[error("Malformed FEN: invalid side to move '{value}'")]
    SideToMove { value: String },

    /// Castling field is not `-` or a subset of `KQkq`
    #[error("Malformed FEN: invalid castling rights '{value}'")]
    CastlingRights { value: String },

    /// En-passant field is not `-` or a rank 3/6 square
    #[error("Malformed FEN: invalid en passant square '{value}'")]
    EnPassant { value: String },

    /// Halfmove or fullmove counter is not a number
    #[error("Malformed FEN: invalid move counter '{value}'")]
    Counter { value: String },
}

/// Result type alias for FEN decoding
pub type FenResult<T> = Result<T, FenError>;

/// Errors raised by [`play`](crate::api::play)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error(transparent)]
    Fen(#[from] FenError),

    /// The move was classified as illegal
    #[error("Illegal move: {0}")]
    Illegal(#[from] IllegalReason),
}
