//! Position decoder and encoder for Forsyth–Edwards Notation
//!
//! Decoding splits a FEN into its fields, expands the run-length digits of each of
//! the 8 ranks into single cells, and checks every field. Anything off-shape is a
//! [`FenError`]. The halfmove and fullmove counters are optional and default to
//! `0` and `1`, so the common four-field EPD-style strings are accepted too.
//!
//! # Examples
//!
//! ```rust,ignore
//! let position: Position = START_FEN.parse()?;
//! assert_eq!(position.to_fen(), START_FEN);
//! ```

use std::fmt::Write as _;
use std::str::FromStr;

use crate::board::{Board, Position};
use crate::error::{FenError, FenResult};
use crate::types::*;

impl Board {
    /// Decode the board layout field of a FEN (`rnbqkbnr/pppppppp/8/...`)
    pub fn from_placement(placement: &str) -> FenResult<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for symbol in rank.chars() {
                if let Some(run) = symbol.to_digit(10).filter(|run| (1..=8).contains(run)) {
                    col += run as usize;
                    continue;
                }
                let piece = Piece::from_fen_char(symbol)
                    .ok_or(FenError::UnknownSymbol { symbol })?;
                if col < 8 {
                    board.set(Square::new(row as u8, col as u8), Some(piece));
                }
                col += 1;
            }
            if col != 8 {
                return Err(FenError::RankLength {
                    rank: 8 - row as u8,
                    cells: col,
                });
            }
        }

        Ok(board)
    }

    /// Encode the board layout field of a FEN
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.rows().iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empty_run = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty_run > 0 {
                            let _ = write!(out, "{empty_run}");
                            empty_run = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                let _ = write!(out, "{empty_run}");
            }
        }
        out
    }
}

impl Position {
    /// Decode a full FEN string
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount { found: fields.len() });
        }

        let board = Board::from_placement(fields[0])?;
        let side_to_move = parse_side(fields[1])?;
        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        let halfmove_clock = fields.get(4).map_or(Ok(0), |value| parse_counter(value))?;
        let fullmove_number = fields.get(5).map_or(Ok(1), |value| parse_counter(value))?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Encode as a six-field FEN string
    pub fn to_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |square| square.to_string());
        format!(
            "{} {} {} {} {} {}",
            self.board.to_placement(),
            side,
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Position::from_fen(fen)
    }
}

fn parse_side(field: &str) -> FenResult<Color> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(FenError::SideToMove {
            value: other.to_string(),
        }),
    }
}

fn parse_castling(field: &str) -> FenResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for symbol in field.chars() {
        let (color, side) = match symbol {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => {
                return Err(FenError::CastlingRights {
                    value: field.to_string(),
                })
            }
        };
        rights.insert(color, side);
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> FenResult<Option<Square>> {
    if field == "-" {
        return Ok(None);
    }
    match Square::parse(field) {
        Some(square) if square.rank() == 3 || square.rank() == 6 => Ok(Some(square)),
        _ => Err(FenError::EnPassant {
            value: field.to_string(),
        }),
    }
}

fn parse_counter(field: &str) -> FenResult<u32> {
    field.parse().map_err(|_| FenError::Counter {
        value: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;

    #[test]
    fn test_start_position_decodes_and_encodes() {
        //! The starting FEN must survive a decode/encode cycle unchanged, and the
        //! decoded matrix must put rank 8 in row 0.
        let position = Position::from_fen(START_FEN).unwrap();

        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling(), CastlingRights::ALL);
        assert_eq!(position.en_passant(), None);
        assert_eq!(
            position.board().get(Square::new(0, 0)),
            Some(Piece::new(PieceKind::Rook, Color::Black)),
            "row 0 is rank 8"
        );
        assert_eq!(
            position.board().get(Square::parse("e1").unwrap()),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(position.to_fen(), START_FEN);
    }

    #[test]
    fn test_counters_are_optional() {
        let position: Position = "8/8/8/8/8/8/8/K6k b - -".parse().unwrap();
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 1);
        assert_eq!(position.side_to_move(), Color::Black);
    }

    #[test]
    fn test_en_passant_field_decodes() {
        let position =
            Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert_eq!(position.en_passant(), Square::parse("d6"));
    }

    #[test]
    fn test_malformed_fens_are_rejected() {
        //! Every malformed shape must map to its own error variant rather than
        //! panicking or silently producing a short rank.
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/8"),
            Err(FenError::FieldCount { found: 1 })
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8 w - -"),
            Err(FenError::RankCount { found: 7 })
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/7 w - -"),
            Err(FenError::RankLength { rank: 1, cells: 7 })
        );
        assert_eq!(
            Position::from_fen("ppppppppp/8/8/8/8/8/8/8 w - -"),
            Err(FenError::RankLength { rank: 8, cells: 9 })
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/7x w - -"),
            Err(FenError::UnknownSymbol { symbol: 'x' })
        );
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 x - -"),
            Err(FenError::SideToMove { .. })
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 w KX -"),
            Err(FenError::CastlingRights { .. })
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 w - e4"),
            Err(FenError::EnPassant { .. })
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenError::Counter { .. })
        ));
    }
}
