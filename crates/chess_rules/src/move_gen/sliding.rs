//! Sliding piece reachability
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces move any number of squares along a direction until blocked.
//!
//! ## Algorithm
//!
//! To find which sliders reach a destination, we cast rays **outward from the
//! destination** in every direction the piece moves along:
//! 1. Walk the ray square by square up to the board edge
//! 2. The first occupied square is the only one that can be reached unobstructed
//! 3. Matching pieces further out are still recorded, as aligned only
//!
//! ## Performance
//!
//! - **Time complexity**: O(d × 7) where d is the number of directions
//! - **Space complexity**: O(k) for the k matching pieces found

use crate::board::Board;
use crate::constants::*;
use crate::types::*;

use super::{PieceStep, Reachability, SourceQuery};

/// Find sliders matching `query` along the given directions
///
/// # Arguments
///
/// * `board` - The board to search
/// * `query` - Piece, destination and source constraint
/// * `dirs` - Ray directions for this piece kind
///
/// # Examples
///
/// ```rust,ignore
/// let reach = slider_sources(&board, &query, &ROOK_DIRS);
/// ```
pub(crate) fn slider_sources(board: &Board, query: &SourceQuery, dirs: &[Direction]) -> Reachability {
    let mut found = Reachability::default();

    for &(d_row, d_col) in dirs {
        // Stays true until the ray meets its first occupant
        let mut unobstructed = true;

        for step in 1..=MAX_RAY_STEPS {
            let Some(square) = query.destination.offset(d_row * step, d_col * step) else {
                break;
            };
            let Some(occupant) = board.get(square) else {
                continue;
            };

            if occupant == query.piece && query.constraint.admits(square) {
                found.record(square, unobstructed);
            }
            unobstructed = false;
        }
    }

    found
}

/// Generate forward steps for a slider standing on `from`
///
/// - Empty squares: valid steps, continue along the ray
/// - Opponent pieces: valid captures, then stop
/// - Own pieces: stop
pub(crate) fn generate_sliding_steps(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[Direction],
    steps: &mut Vec<PieceStep>,
) {
    for &(d_row, d_col) in dirs {
        for step in 1..=MAX_RAY_STEPS {
            let Some(to) = from.offset(d_row * step, d_col * step) else {
                break;
            };
            match board.get(to) {
                None => steps.push(PieceStep::new(from, to)),
                Some(piece) if piece.color != color => {
                    steps.push(PieceStep::new(from, to));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::SourceConstraint;

    #[test]
    fn test_bishop_ray_stops_valid_at_first_occupant() {
        let mut board = Board::empty();
        let bishop = Piece::new(PieceKind::Bishop, Color::Black);
        board.set(Square::parse("c6").unwrap(), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(Square::parse("a8").unwrap(), Some(bishop));

        let query = SourceQuery {
            piece: bishop,
            destination: Square::parse("e4").unwrap(),
            constraint: SourceConstraint::ANY,
        };
        let found = slider_sources(&board, &query, &BISHOP_DIRS);
        assert_eq!(found.aligned, vec![Square::parse("a8").unwrap()]);
        assert!(found.valid.is_empty(), "white pawn on c6 is in the way");
    }

    #[test]
    fn test_generate_rook_steps_stops_at_pieces() {
        let mut board = Board::empty();
        let a1 = Square::parse("a1").unwrap();
        board.set(a1, Some(Piece::new(PieceKind::Rook, Color::White)));
        board.set(Square::parse("a3").unwrap(), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        board.set(Square::parse("c1").unwrap(), Some(Piece::new(PieceKind::King, Color::White)));

        let mut steps = Vec::new();
        generate_sliding_steps(&board, a1, Color::White, &ROOK_DIRS, &mut steps);
        let targets: Vec<String> = steps.iter().map(|s| s.to.to_string()).collect();
        assert_eq!(targets, vec!["a2", "a3", "b1"]);
    }
}
