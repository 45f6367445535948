//! Property-based tests for classifier invariants

use chess_rules::{classify, IllegalReason, Position, Verdict, START_FEN};
use proptest::prelude::*;

const POSITIONS: [&str; 5] = [
    START_FEN,
    "r3k2r/pppq1ppp/2np1n2/2b1p1B1/2B1P1b1/2NP1N2/PPPQ1PPP/R3K2R w KQkq - 4 8",
    "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
    "6k1/5ppp/8/8/8/8/1q6/R5K1 b - - 3 30",
];

fn position() -> impl Strategy<Value = &'static str> {
    prop::sample::select(POSITIONS.to_vec())
}

fn square_name() -> impl Strategy<Value = String> {
    ("[a-h]", "[1-8]").prop_map(|(file, rank)| format!("{file}{rank}"))
}

// Loosely SAN-shaped tokens, including malformed ones
fn san_token() -> impl Strategy<Value = String> {
    prop_oneof![
        square_name(),
        ("[NBRQK]", square_name()).prop_map(|(piece, dst)| format!("{piece}{dst}")),
        ("[NBRQK]", "[a-h1-8]", square_name()).prop_map(|(p, from, dst)| format!("{p}{from}{dst}")),
        ("[a-h]", square_name()).prop_map(|(file, dst)| format!("{file}x{dst}")),
        Just("O-O".to_string()),
        Just("O-O-O".to_string()),
        "[A-Za-z0-9=+#x-]{0,7}",
    ]
}

proptest! {
    #[test]
    fn test_classification_is_deterministic(fen in position(), san in san_token()) {
        let first = classify(fen, &san).unwrap();
        let second = classify(fen, &san).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_piece_onto_friendly_square_is_self_capture(
        fen in position(),
        letter in "[NBRQK]",
        target in 0usize..64,
        capture in any::<bool>(),
    ) {
        let position = Position::from_fen(fen).unwrap();
        let side = position.side_to_move();
        let friendly: Vec<String> = position
            .board()
            .pieces(side)
            .map(|(square, _)| square.to_string())
            .collect();
        let destination = &friendly[target % friendly.len()];
        let san = if capture {
            format!("{letter}x{destination}")
        } else {
            format!("{letter}{destination}")
        };

        prop_assert_eq!(
            classify(fen, &san).unwrap(),
            Verdict::Illegal(IllegalReason::SelfCapture),
            "{} on {}", san, fen
        );
    }
}
