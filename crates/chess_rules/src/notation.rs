//! # Notation Parser - SAN Tokens to Move Descriptors
//!
//! ## Overview
//!
//! A SAN token is read in two passes:
//!
//! 1. **Shape matching** ([`SanShape`]): the token body (after the `+`/`#` suffix is
//!    stripped) is matched byte-by-byte against a closed table of notation shapes.
//!    Each shape captures the raw file/rank/piece bytes it saw.
//! 2. **Description**: the shape is turned into a [`MoveDescriptor`] for the side to
//!    move. Coordinates are translated into matrix rows (`row = 8 - rank`), pawn
//!    sources are derived from pawn geometry, and promotion ranks are enforced.
//!
//! Both passes are exhaustive matches, so a new shape cannot be added without the
//! compiler pointing at every place that has to handle it.
//!
//! ## Shape Table
//!
//! | Shape                         | Example      | Move kind                          |
//! |-------------------------------|--------------|------------------------------------|
//! | `O-O` / `O-O-O`               | `O-O`        | short / long castle                |
//! | `f r`                         | `e4`         | pawn move or double move           |
//! | `f r = P`                     | `e8=Q`       | pawn promotion                     |
//! | `f x f r`                     | `exd5`       | pawn capture                       |
//! | `f x f r e.p.`                | `exd6 e.p.`  | pawn en passant                    |
//! | `f x f r = P`                 | `exd8=N`     | pawn capture and promotion         |
//! | `P f r` / `P x f r`           | `Nf3`        | piece move / capture               |
//! | `P f f r` / `P f x f r`       | `Nbd7`       | column-disambiguated move / capture |
//! | `P r f r` / `P r x f r`       | `R1a3`       | row-disambiguated move / capture   |
//! | `P f r f r` / `P f r x f r`   | `Qh4e1`      | square-disambiguated move / capture |
//!
//! ## Position Dependence
//!
//! Exactly one decision looks at the board: a pawn advance onto the fourth rank
//! from the mover's side is a **double move** unless a friendly pawn stands
//! directly behind the destination (then it is a single step from the third rank).
//!
//! ## Promotion Ranks
//!
//! Promotion ranks are enforced here rather than in the classifier: `=X` is only
//! accepted on rank 8 for white and rank 1 for black, and a pawn advance or capture
//! onto that rank without `=X` does not parse.

use crate::board::Board;
use crate::constants::*;
use crate::types::*;

/// Trailing check marker of a SAN token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckSuffix {
    #[default]
    None,
    /// `+`
    Check,
    /// `#`
    Checkmate,
}

/// Every move kind the parser can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    ShortCastle,
    LongCastle,
    PawnMove,
    PawnDoubleMove,
    PawnCapture,
    PawnEnPassant,
    PawnPromotion,
    PawnCapturePromotion,
    PieceMove,
    PieceCapture,
    RowDisambiguatedMove,
    RowDisambiguatedCapture,
    ColumnDisambiguatedMove,
    ColumnDisambiguatedCapture,
    SquareDisambiguatedMove,
    SquareDisambiguatedCapture,
}

impl MoveKind {
    /// Whether the notation claims a capture (`x`)
    pub fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::PawnCapture
                | MoveKind::PawnEnPassant
                | MoveKind::PawnCapturePromotion
                | MoveKind::PieceCapture
                | MoveKind::RowDisambiguatedCapture
                | MoveKind::ColumnDisambiguatedCapture
                | MoveKind::SquareDisambiguatedCapture
        )
    }

    /// Wing of a castle, `None` for every other kind
    pub fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveKind::ShortCastle => Some(CastleSide::Kingside),
            MoveKind::LongCastle => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    #[inline]
    pub fn is_castle(self) -> bool {
        self.castle_side().is_some()
    }
}

/// What the notation says about the source square
///
/// `None` in a coordinate means "any square consistent with the movement rules".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceConstraint {
    pub row: Option<u8>,
    pub col: Option<u8>,
}

impl SourceConstraint {
    pub const ANY: SourceConstraint = SourceConstraint { row: None, col: None };

    pub fn exact(square: Square) -> Self {
        SourceConstraint {
            row: Some(square.row()),
            col: Some(square.col()),
        }
    }

    /// Whether `square` is allowed as a source
    #[inline]
    pub fn admits(self, square: Square) -> bool {
        self.row.map_or(true, |row| row == square.row())
            && self.col.map_or(true, |col| col == square.col())
    }

    /// The source square when both coordinates are known
    pub fn exact_square(self) -> Option<Square> {
        match (self.row, self.col) {
            (Some(row), Some(col)) => Some(Square::new(row, col)),
            _ => None,
        }
    }
}

/// A parsed move, before any legality check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDescriptor {
    pub kind: MoveKind,
    pub piece: PieceKind,
    pub source: SourceConstraint,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

/// Result of parsing one SAN token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedSan {
    pub suffix: CheckSuffix,
    /// `None` when no shape matched (an unknown move type)
    pub descriptor: Option<MoveDescriptor>,
}

/// Parse a SAN token for `side`
///
/// `board` is only consulted to tell a pawn double advance from a single step.
///
/// # Examples
///
/// ```rust,ignore
/// let parsed = parse_san("Nbd7+", Color::Black, position.board());
/// assert_eq!(parsed.suffix, CheckSuffix::Check);
/// assert_eq!(parsed.descriptor.unwrap().kind, MoveKind::ColumnDisambiguatedMove);
/// ```
pub fn parse_san(san: &str, side: Color, board: &Board) -> ParsedSan {
    let (body, suffix) = split_suffix(san.trim());
    let descriptor = SanShape::match_bytes(body.as_bytes())
        .and_then(|shape| shape.describe(side, board));
    ParsedSan { suffix, descriptor }
}

fn split_suffix(token: &str) -> (&str, CheckSuffix) {
    if let Some(body) = token.strip_suffix('#') {
        (body, CheckSuffix::Checkmate)
    } else if let Some(body) = token.strip_suffix('+') {
        (body, CheckSuffix::Check)
    } else {
        (token, CheckSuffix::None)
    }
}

/// The notation shapes, holding the raw ASCII bytes they matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanShape {
    ShortCastle,
    LongCastle,
    PawnAdvance { file: u8, rank: u8 },
    PawnPromotion { file: u8, rank: u8, promotion: u8 },
    PawnCapture { from_file: u8, file: u8, rank: u8 },
    PawnEnPassant { from_file: u8, file: u8, rank: u8 },
    PawnCapturePromotion { from_file: u8, file: u8, rank: u8, promotion: u8 },
    PieceMove { letter: u8, file: u8, rank: u8 },
    PieceCapture { letter: u8, file: u8, rank: u8 },
    ColumnDisambiguated { letter: u8, from_file: u8, file: u8, rank: u8 },
    ColumnDisambiguatedCapture { letter: u8, from_file: u8, file: u8, rank: u8 },
    RowDisambiguated { letter: u8, from_rank: u8, file: u8, rank: u8 },
    RowDisambiguatedCapture { letter: u8, from_rank: u8, file: u8, rank: u8 },
    SquareDisambiguated { letter: u8, from_file: u8, from_rank: u8, file: u8, rank: u8 },
    SquareDisambiguatedCapture { letter: u8, from_file: u8, from_rank: u8, file: u8, rank: u8 },
}

#[inline]
fn is_file(byte: u8) -> bool {
    (b'a'..=b'h').contains(&byte)
}

#[inline]
fn is_rank(byte: u8) -> bool {
    (b'1'..=b'8').contains(&byte)
}

#[inline]
fn is_piece_letter(byte: u8) -> bool {
    PieceKind::from_san_letter(byte).is_some()
}

#[inline]
fn is_promotion_letter(byte: u8) -> bool {
    PieceKind::from_promotion_letter(byte).is_some()
}

impl SanShape {
    fn match_bytes(body: &[u8]) -> Option<Self> {
        use SanShape::*;

        let shape = match *body {
            [b'O', b'-', b'O'] => ShortCastle,
            [b'O', b'-', b'O', b'-', b'O'] => LongCastle,

            [file, rank] if is_file(file) && is_rank(rank) => PawnAdvance { file, rank },
            [file, rank, b'=', promotion]
                if is_file(file) && is_rank(rank) && is_promotion_letter(promotion) =>
            {
                PawnPromotion { file, rank, promotion }
            }
            [from_file, b'x', file, rank] if is_file(from_file) && is_file(file) && is_rank(rank) => {
                PawnCapture { from_file, file, rank }
            }
            [from_file, b'x', file, rank, b' ', b'e', b'.', b'p', b'.']
                if is_file(from_file) && is_file(file) && is_rank(rank) =>
            {
                PawnEnPassant { from_file, file, rank }
            }
            [from_file, b'x', file, rank, b'=', promotion]
                if is_file(from_file)
                    && is_file(file)
                    && is_rank(rank)
                    && is_promotion_letter(promotion) =>
            {
                PawnCapturePromotion { from_file, file, rank, promotion }
            }

            [letter, file, rank] if is_piece_letter(letter) && is_file(file) && is_rank(rank) => {
                PieceMove { letter, file, rank }
            }
            [letter, b'x', file, rank]
                if is_piece_letter(letter) && is_file(file) && is_rank(rank) =>
            {
                PieceCapture { letter, file, rank }
            }
            [letter, from_file, file, rank]
                if is_piece_letter(letter) && is_file(from_file) && is_file(file) && is_rank(rank) =>
            {
                ColumnDisambiguated { letter, from_file, file, rank }
            }
            [letter, from_rank, file, rank]
                if is_piece_letter(letter) && is_rank(from_rank) && is_file(file) && is_rank(rank) =>
            {
                RowDisambiguated { letter, from_rank, file, rank }
            }
            [letter, from_file, b'x', file, rank]
                if is_piece_letter(letter) && is_file(from_file) && is_file(file) && is_rank(rank) =>
            {
                ColumnDisambiguatedCapture { letter, from_file, file, rank }
            }
            [letter, from_rank, b'x', file, rank]
                if is_piece_letter(letter) && is_rank(from_rank) && is_file(file) && is_rank(rank) =>
            {
                RowDisambiguatedCapture { letter, from_rank, file, rank }
            }
            [letter, from_file, from_rank, file, rank]
                if is_piece_letter(letter)
                    && is_file(from_file)
                    && is_rank(from_rank)
                    && is_file(file)
                    && is_rank(rank) =>
            {
                SquareDisambiguated { letter, from_file, from_rank, file, rank }
            }
            [letter, from_file, from_rank, b'x', file, rank]
                if is_piece_letter(letter)
                    && is_file(from_file)
                    && is_rank(from_rank)
                    && is_file(file)
                    && is_rank(rank) =>
            {
                SquareDisambiguatedCapture { letter, from_file, from_rank, file, rank }
            }

            _ => return None,
        };
        Some(shape)
    }

    fn describe(self, side: Color, board: &Board) -> Option<MoveDescriptor> {
        use SanShape::*;

        match self {
            ShortCastle => Some(castle(side, MoveKind::ShortCastle, KINGSIDE_KING_DST_COL)),
            LongCastle => Some(castle(side, MoveKind::LongCastle, QUEENSIDE_KING_DST_COL)),

            PawnAdvance { file, rank } => {
                let destination = Square::from_file_rank(file, rank)?;
                if destination.row() == side.promotion_row() {
                    return None;
                }
                let behind = destination.offset(-side.forward(), 0)?;
                let double = destination.row() == side.double_advance_row()
                    && !board.holds(behind, PieceKind::Pawn, side);
                let (kind, source) = if double {
                    let start = Square::new(side.pawn_start_row(), destination.col());
                    (MoveKind::PawnDoubleMove, start)
                } else {
                    (MoveKind::PawnMove, behind)
                };
                Some(pawn(kind, source, destination, None))
            }
            PawnPromotion { file, rank, promotion } => {
                let destination = Square::from_file_rank(file, rank)?;
                if destination.row() != side.promotion_row() {
                    return None;
                }
                let source = destination.offset(-side.forward(), 0)?;
                let promotion = PieceKind::from_promotion_letter(promotion)?;
                Some(pawn(MoveKind::PawnPromotion, source, destination, Some(promotion)))
            }
            PawnCapture { from_file, file, rank } => {
                let (source, destination) = pawn_capture_squares(side, from_file, file, rank)?;
                if destination.row() == side.promotion_row() {
                    return None;
                }
                Some(pawn(MoveKind::PawnCapture, source, destination, None))
            }
            PawnEnPassant { from_file, file, rank } => {
                let (source, destination) = pawn_capture_squares(side, from_file, file, rank)?;
                Some(pawn(MoveKind::PawnEnPassant, source, destination, None))
            }
            PawnCapturePromotion { from_file, file, rank, promotion } => {
                let (source, destination) = pawn_capture_squares(side, from_file, file, rank)?;
                if destination.row() != side.promotion_row() {
                    return None;
                }
                let promotion = PieceKind::from_promotion_letter(promotion)?;
                Some(pawn(
                    MoveKind::PawnCapturePromotion,
                    source,
                    destination,
                    Some(promotion),
                ))
            }

            PieceMove { letter, file, rank } => {
                piece(MoveKind::PieceMove, letter, SourceConstraint::ANY, file, rank)
            }
            PieceCapture { letter, file, rank } => {
                piece(MoveKind::PieceCapture, letter, SourceConstraint::ANY, file, rank)
            }
            ColumnDisambiguated { letter, from_file, file, rank } => piece(
                MoveKind::ColumnDisambiguatedMove,
                letter,
                column_constraint(from_file),
                file,
                rank,
            ),
            ColumnDisambiguatedCapture { letter, from_file, file, rank } => piece(
                MoveKind::ColumnDisambiguatedCapture,
                letter,
                column_constraint(from_file),
                file,
                rank,
            ),
            RowDisambiguated { letter, from_rank, file, rank } => piece(
                MoveKind::RowDisambiguatedMove,
                letter,
                row_constraint(from_rank),
                file,
                rank,
            ),
            RowDisambiguatedCapture { letter, from_rank, file, rank } => piece(
                MoveKind::RowDisambiguatedCapture,
                letter,
                row_constraint(from_rank),
                file,
                rank,
            ),
            SquareDisambiguated { letter, from_file, from_rank, file, rank } => piece(
                MoveKind::SquareDisambiguatedMove,
                letter,
                square_constraint(from_file, from_rank)?,
                file,
                rank,
            ),
            SquareDisambiguatedCapture { letter, from_file, from_rank, file, rank } => piece(
                MoveKind::SquareDisambiguatedCapture,
                letter,
                square_constraint(from_file, from_rank)?,
                file,
                rank,
            ),
        }
    }
}

fn castle(side: Color, kind: MoveKind, king_dst_col: u8) -> MoveDescriptor {
    let row = side.home_row();
    MoveDescriptor {
        kind,
        piece: PieceKind::King,
        source: SourceConstraint::exact(Square::new(row, KING_HOME_COL)),
        destination: Square::new(row, king_dst_col),
        promotion: None,
    }
}

fn pawn(
    kind: MoveKind,
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
) -> MoveDescriptor {
    MoveDescriptor {
        kind,
        piece: PieceKind::Pawn,
        source: SourceConstraint::exact(source),
        destination,
        promotion,
    }
}

/// Source and destination of a diagonal pawn step, if the files are adjacent
fn pawn_capture_squares(side: Color, from_file: u8, file: u8, rank: u8) -> Option<(Square, Square)> {
    if from_file.abs_diff(file) != 1 {
        return None;
    }
    let destination = Square::from_file_rank(file, rank)?;
    let source = Square::try_new(
        destination.row() as i8 - side.forward(),
        (from_file - b'a') as i8,
    )?;
    Some((source, destination))
}

fn piece(
    kind: MoveKind,
    letter: u8,
    source: SourceConstraint,
    file: u8,
    rank: u8,
) -> Option<MoveDescriptor> {
    Some(MoveDescriptor {
        kind,
        piece: PieceKind::from_san_letter(letter)?,
        source,
        destination: Square::from_file_rank(file, rank)?,
        promotion: None,
    })
}

fn column_constraint(from_file: u8) -> SourceConstraint {
    SourceConstraint {
        row: None,
        col: Some(from_file - b'a'),
    }
}

fn row_constraint(from_rank: u8) -> SourceConstraint {
    SourceConstraint {
        row: Some(b'8' - from_rank),
        col: None,
    }
}

fn square_constraint(from_file: u8, from_rank: u8) -> Option<SourceConstraint> {
    Square::from_file_rank(from_file, from_rank).map(SourceConstraint::exact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_board() -> Board {
        Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap()
    }

    fn sq(text: &str) -> Square {
        Square::parse(text).unwrap()
    }

    fn describe(san: &str, side: Color, board: &Board) -> MoveDescriptor {
        parse_san(san, side, board)
            .descriptor
            .unwrap_or_else(|| panic!("{san} should parse"))
    }

    #[test]
    fn test_castles_use_king_squares() {
        let board = Board::empty();
        let short = describe("O-O", Color::White, &board);
        assert_eq!(short.kind, MoveKind::ShortCastle);
        assert_eq!(short.source.exact_square(), Some(sq("e1")));
        assert_eq!(short.destination, sq("g1"));

        let long = describe("O-O-O", Color::Black, &board);
        assert_eq!(long.kind, MoveKind::LongCastle);
        assert_eq!(long.source.exact_square(), Some(sq("e8")));
        assert_eq!(long.destination, sq("c8"));
    }

    #[test]
    fn test_pawn_double_move_depends_on_board() {
        //! `e4` from the start position is a double advance from e2, but with a
        //! white pawn already on e3 it is a single step.
        let board = start_board();
        let double = describe("e4", Color::White, &board);
        assert_eq!(double.kind, MoveKind::PawnDoubleMove);
        assert_eq!(double.source.exact_square(), Some(sq("e2")));

        let mut advanced = board;
        advanced.set(sq("e2"), None);
        advanced.set(sq("e3"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let single = describe("e4", Color::White, &advanced);
        assert_eq!(single.kind, MoveKind::PawnMove);
        assert_eq!(single.source.exact_square(), Some(sq("e3")));

        let black = describe("d5", Color::Black, &board);
        assert_eq!(black.kind, MoveKind::PawnDoubleMove);
        assert_eq!(black.source.exact_square(), Some(sq("d7")));
    }

    #[test]
    fn test_pawn_single_move_sources() {
        let board = start_board();
        let white = describe("e3", Color::White, &board);
        assert_eq!(white.kind, MoveKind::PawnMove);
        assert_eq!(white.source.exact_square(), Some(sq("e2")));

        let black = describe("h6", Color::Black, &board);
        assert_eq!(black.source.exact_square(), Some(sq("h7")));
    }

    #[test]
    fn test_pawn_captures_and_en_passant() {
        let board = Board::empty();
        let capture = describe("exd5", Color::White, &board);
        assert_eq!(capture.kind, MoveKind::PawnCapture);
        assert_eq!(capture.source.exact_square(), Some(sq("e4")));
        assert_eq!(capture.destination, sq("d5"));

        let black = describe("cxb4", Color::Black, &board);
        assert_eq!(black.source.exact_square(), Some(sq("c5")));

        let en_passant = describe("exd6 e.p.", Color::White, &board);
        assert_eq!(en_passant.kind, MoveKind::PawnEnPassant);
        assert_eq!(en_passant.source.exact_square(), Some(sq("e5")));
        assert!(en_passant.kind.is_capture());

        assert!(
            parse_san("exc5", Color::White, &board).descriptor.is_none(),
            "pawn captures must be to an adjacent file"
        );
    }

    #[test]
    fn test_promotion_rank_is_enforced() {
        //! Promotion is only accepted on the mover's last rank, and reaching that
        //! rank requires a promotion suffix.
        let board = Board::empty();
        let promotion = describe("e8=Q", Color::White, &board);
        assert_eq!(promotion.kind, MoveKind::PawnPromotion);
        assert_eq!(promotion.promotion, Some(PieceKind::Queen));
        assert_eq!(promotion.source.exact_square(), Some(sq("e7")));

        let capture = describe("gxh1=N", Color::Black, &board);
        assert_eq!(capture.kind, MoveKind::PawnCapturePromotion);
        assert_eq!(capture.source.exact_square(), Some(sq("g2")));
        assert_eq!(capture.promotion, Some(PieceKind::Knight));

        assert!(parse_san("e1=Q", Color::White, &board).descriptor.is_none());
        assert!(parse_san("e8=Q", Color::Black, &board).descriptor.is_none());
        assert!(parse_san("e8", Color::White, &board).descriptor.is_none());
        assert!(parse_san("dxe1", Color::Black, &board).descriptor.is_none());
        assert!(parse_san("e8=K", Color::White, &board).descriptor.is_none());
        assert!(
            parse_san("e1", Color::White, &board).descriptor.is_none(),
            "a white pawn can never arrive on rank 1"
        );
    }

    #[test]
    fn test_piece_shapes_and_constraints() {
        let board = Board::empty();

        let plain = describe("Nf3", Color::White, &board);
        assert_eq!(plain.kind, MoveKind::PieceMove);
        assert_eq!(plain.piece, PieceKind::Knight);
        assert_eq!(plain.source, SourceConstraint::ANY);

        let capture = describe("Bxe5", Color::White, &board);
        assert_eq!(capture.kind, MoveKind::PieceCapture);

        let column = describe("Nbd7", Color::Black, &board);
        assert_eq!(column.kind, MoveKind::ColumnDisambiguatedMove);
        assert_eq!(column.source, SourceConstraint { row: None, col: Some(1) });

        let row = describe("R1xa3", Color::White, &board);
        assert_eq!(row.kind, MoveKind::RowDisambiguatedCapture);
        assert_eq!(row.source, SourceConstraint { row: Some(7), col: None });

        let square = describe("Qh4xe1", Color::White, &board);
        assert_eq!(square.kind, MoveKind::SquareDisambiguatedCapture);
        assert_eq!(square.source.exact_square(), Some(sq("h4")));
    }

    #[test]
    fn test_suffixes_are_stripped() {
        let board = Board::empty();
        let check = parse_san("Qh5+", Color::White, &board);
        assert_eq!(check.suffix, CheckSuffix::Check);
        assert_eq!(check.descriptor.unwrap().destination, sq("h5"));

        let mate = parse_san("Qxf7#", Color::White, &board);
        assert_eq!(mate.suffix, CheckSuffix::Checkmate);
        assert_eq!(mate.descriptor.unwrap().kind, MoveKind::PieceCapture);
    }

    #[test]
    fn test_unknown_shapes() {
        let board = Board::empty();
        for san in ["", "Z4", "Pe4", "e9", "Nf", "0-0", "O-O-O-O", "e2e4", "Nf3!", "exd6ep"] {
            assert!(
                parse_san(san, Color::White, &board).descriptor.is_none(),
                "{san:?} should not parse"
            );
        }
    }
}
