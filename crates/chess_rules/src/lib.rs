//! SAN move legality classification against FEN positions
//!
//! ```rust,ignore
//! use chess_rules::{classify, IllegalReason, Verdict};
//!
//! let verdict = classify("4k3/8/8/8/P7/8/8/R3K3 w - - 0 1", "Ra8")?;
//! assert_eq!(verdict, Verdict::Illegal(IllegalReason::AttemptingToMoveBlockedPiece));
//! ```

pub mod api;
pub mod board;
pub mod classify;
pub mod constants;
pub mod error;
pub mod fen;
pub mod move_gen;
pub mod notation;
pub mod types;

pub use api::{classify, play, play_position};
pub use board::{Board, Position};
pub use classify::{classify_position, judge, IllegalReason, LegalMove, Verdict};
pub use constants::START_FEN;
pub use error::{FenError, FenResult, PlayError};
pub use notation::{parse_san, CheckSuffix, MoveDescriptor, MoveKind, ParsedSan};
pub use types::{CastleSide, CastlingRights, Color, Piece, PieceKind, Square};
