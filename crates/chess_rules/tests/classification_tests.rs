//! Integration tests for SAN classification
//!
//! Exercises the public entry points (`classify`, `classify_position`, `play`)
//! on the scenarios a referee sees in practice: blocked pieces, pins,
//! ambiguity, en passant, castling and the check suffixes.

use chess_rules::{
    classify, classify_position, play, play_position, Color, FenError, IllegalReason, PieceKind,
    Position, Square, Verdict, START_FEN,
};

fn verdict(fen: &str, san: &str) -> Verdict {
    classify(fen, san).expect("test FEN should decode")
}

fn illegal(reason: IllegalReason) -> Verdict {
    Verdict::Illegal(reason)
}

fn sq(name: &str) -> Square {
    Square::parse(name).expect("test square should parse")
}

#[test]
fn test_starting_position() {
    //! The first moves a referee ever sees: a pawn double step is fine, a knight
    //! move that no white knight can make is refused.
    assert_eq!(verdict(START_FEN, "e4"), Verdict::Valid);
    assert_eq!(verdict(START_FEN, "Nf3"), Verdict::Valid);
    assert_eq!(
        verdict(START_FEN, "Nc6"),
        illegal(IllegalReason::NoPieceReachesDestination)
    );
    assert_eq!(
        verdict(START_FEN, "Bc4"),
        illegal(IllegalReason::AttemptingToMoveBlockedPiece),
        "the f1 bishop is hemmed in by its own pawns"
    );
}

#[test]
fn test_blocked_rook() {
    assert_eq!(
        verdict("4k3/8/8/8/P7/8/8/R3K3 w - - 0 1", "Ra8"),
        illegal(IllegalReason::AttemptingToMoveBlockedPiece)
    );
}

#[test]
fn test_pinned_bishop() {
    //! Bishop e2 shields the king from the rook on e8; leaving the file is
    //! refused, and when the king is already in check a non-blocking move keeps
    //! it there.
    assert_eq!(
        verdict("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1", "Bd3"),
        illegal(IllegalReason::AttemptingToMovePinnedPiece)
    );
    assert_eq!(
        verdict("4r1k1/8/8/8/8/8/3B4/4K3 w - - 0 1", "Bc3"),
        illegal(IllegalReason::MoveKeepsKingInCheck)
    );
    assert_eq!(
        verdict("4r1k1/8/8/8/8/8/3B4/4K3 w - - 0 1", "Be3"),
        Verdict::Valid,
        "interposing on the e-file resolves the check"
    );
}

#[test]
fn test_knight_ambiguity() {
    let fen = "4k3/8/8/6N1/8/2N5/8/4K3 w - - 0 1";
    assert_eq!(verdict(fen, "Ne4"), illegal(IllegalReason::AmbiguousMove));
    assert_eq!(verdict(fen, "Nce4"), Verdict::Valid);
    assert_eq!(verdict(fen, "Nge4"), Verdict::Valid);
    assert_eq!(verdict(fen, "N5e4"), Verdict::Valid);
    assert_eq!(verdict(fen, "Ng5e4"), Verdict::Valid);
    assert_eq!(
        verdict(fen, "Nde4"),
        illegal(IllegalReason::NoPieceReachesDestination)
    );
}

#[test]
fn test_blocked_candidate_does_not_make_move_ambiguous() {
    //! Both rooks share the first rank but the king on d1 splits it, so only the
    //! unobstructed rook counts as a source.
    let fen = "4k3/8/8/8/8/8/8/R2K3R w - - 0 1";
    assert_eq!(verdict(fen, "Rc1"), Verdict::Valid, "king on d1 blocks the h1 rook");
    assert_eq!(verdict(fen, "Rae1"), illegal(IllegalReason::AttemptingToMoveBlockedPiece));
    assert_eq!(verdict(fen, "Rhe1"), Verdict::Valid);
}

#[test]
fn test_en_passant_window() {
    let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2";
    assert_eq!(verdict(fen, "exd6 e.p."), Verdict::Valid);
    assert_eq!(verdict(fen, "exd6"), Verdict::Valid, "plain capture onto the target is en passant");

    // One full move later the target has expired
    let position = Position::from_fen(fen).unwrap();
    let later = play_position(&position, "Kf1").unwrap();
    let later = play_position(&later, "Kf8").unwrap();
    assert_eq!(later.en_passant(), None);
    assert_eq!(
        classify_position(&later, "exd6 e.p."),
        illegal(IllegalReason::IllegalEnPassantCapture)
    );
}

#[test]
fn test_en_passant_needs_a_pawn_to_capture() {
    //! The target square is recorded but nothing stands beside the capturer
    assert_eq!(
        verdict("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 2", "exd6 e.p."),
        illegal(IllegalReason::IllegalEnPassantCapture)
    );
}

#[test]
fn test_suffix_check_survives_maximal_counters() {
    assert_eq!(
        verdict("4k3/8/8/8/8/8/8/R3K3 w - - 4294967295 4294967295", "Ra8+"),
        Verdict::Valid
    );
    assert_eq!(
        verdict("4k3/8/8/8/8/8/8/r3K3 b - - 0 4294967295", "Ra2+"),
        illegal(IllegalReason::IncorrectCheckIndication)
    );
}

#[test]
fn test_castling_through_check() {
    assert_eq!(
        verdict("3rk3/8/8/8/8/8/8/R3K3 w Q - 0 1", "O-O-O"),
        illegal(IllegalReason::CastlingThroughCheck)
    );
    assert_eq!(
        verdict("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "O-O-O"),
        Verdict::Valid
    );
}

#[test]
fn test_black_castles_on_rank_eight() {
    let fen = "r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1";
    assert_eq!(verdict(fen, "O-O"), Verdict::Valid);
    assert_eq!(verdict(fen, "O-O-O"), Verdict::Valid);
    let next = play(fen, "O-O-O").unwrap();
    assert_eq!(next, "2kr3r/8/8/8/8/8/8/4K3 w - - 1 2");
}

#[test]
fn test_promotion() {
    let fen = "8/4P3/8/8/8/8/8/k3K3 w - - 0 1";
    assert_eq!(verdict(fen, "e8=Q"), Verdict::Valid);
    assert_eq!(verdict(fen, "e8"), illegal(IllegalReason::UnknownMoveType), "promotion piece is required");
    assert_eq!(verdict(fen, "e8=K"), illegal(IllegalReason::UnknownMoveType));

    let next = Position::from_fen(&play(fen, "e8=N").unwrap()).unwrap();
    assert!(next.board().holds(sq("e8"), PieceKind::Knight, Color::White));
}

#[test]
fn test_malformed_fen_is_an_error() {
    assert_eq!(
        classify("8/8/8/8/8/8/8/8", "e4"),
        Err(FenError::FieldCount { found: 1 })
    );
    assert!(matches!(
        classify("8/8/8/8/8/8/8 w - -", "e4"),
        Err(FenError::RankCount { found: 7 })
    ));
}

#[test]
fn test_round_trip_matches_direct_mutation() {
    //! Applying a valid move and decoding the new FEN gives the board obtained by
    //! moving the piece by hand.
    let cases: [(&str, &str, &str, &str, Option<&str>); 4] = [
        (START_FEN, "Nf3", "g1", "f3", None),
        ("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", "exd5", "e4", "d5", None),
        ("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", "exd6 e.p.", "e5", "d6", Some("d5")),
        ("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "Kd2", "e1", "d2", None),
    ];

    for (fen, san, from, to, victim) in cases {
        let before = Position::from_fen(fen).unwrap();
        let after = Position::from_fen(&play(fen, san).unwrap()).unwrap();

        let mut expected = *before.board();
        let piece = expected.take(sq(from));
        if let Some(victim) = victim {
            expected.set(sq(victim), None);
        }
        expected.set(sq(to), piece);

        assert_eq!(after.board(), &expected, "{san} on {fen}");
        assert_eq!(after.side_to_move(), before.side_to_move().opponent());
    }
}

#[test]
fn test_checkmate_suffix() {
    let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    assert_eq!(verdict(fen, "Ra8#"), Verdict::Valid);
    assert_eq!(verdict(fen, "Ra8"), Verdict::Valid, "suffix is optional");
    assert_eq!(verdict(fen, "Rb1+"), illegal(IllegalReason::IncorrectCheckIndication));
}

#[test]
fn test_verdicts_are_stable() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    for san in ["Bb5", "Nxe5", "d4", "O-O", "Qh5", "Ke2", "Nd4", "Zq"] {
        assert_eq!(verdict(fen, san), verdict(fen, san), "{san}");
    }
}
