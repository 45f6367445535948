//! Integration tests for batch classification
//!
//! Feeds JSON lines through the worker pool and checks that the output keeps
//! input order and that bad lines become error records.

use san_referee::batch::{run_batch, BatchRecord};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn request(fen: &str, san: &str) -> String {
    serde_json::json!({ "fen": fen, "san": san }).to_string()
}

fn run(lines: &[String], workers: usize) -> (Vec<BatchRecord>, san_referee::batch::BatchSummary) {
    let input = lines.join("\n");
    let mut output = Vec::new();
    let summary = run_batch(input.as_bytes(), &mut output, workers).expect("batch should run");
    let records = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line is a record"))
        .collect();
    (records, summary)
}

#[test]
fn test_output_keeps_input_order() {
    //! Many requests over several workers: records must come back in the order
    //! they were read, with the SAN echoed for each.
    let sans = ["e4", "Nc6", "Nf3", "Ke2", "d4", "Bc4", "O-O", "a3"];
    let lines: Vec<String> = (0..200)
        .map(|i| request(START, sans[i % sans.len()]))
        .collect();

    let (records, summary) = run(&lines, 8);

    assert_eq!(records.len(), 200);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.san, sans[i % sans.len()], "record {i} out of order");
    }
    assert_eq!(summary.total(), 200);
    assert_eq!(summary.valid, 100, "e4, Nf3, d4 and a3 are legal");
    assert_eq!(summary.illegal, 100);
}

#[test]
fn test_reasons_and_errors() {
    let lines = vec![
        request(START, "Nc6"),
        "{ this is not json".to_string(),
        String::new(),
        request("8/8/8 w - -", "e4"),
        request(START, "O-O"),
    ];

    let (records, summary) = run(&lines, 2);

    assert_eq!(records.len(), 4, "blank lines are skipped");
    assert_eq!(records[0].verdict, "illegal");
    assert_eq!(records[0].reason.as_deref(), Some("No piece reaches destination"));
    assert_eq!(records[1].verdict, "error");
    assert_eq!(records[2].verdict, "error");
    assert!(records[2].reason.as_deref().unwrap().contains("Malformed FEN"));
    assert_eq!(records[3].reason.as_deref(), Some("Castling through blocked squares"));
    assert_eq!(summary.errors, 2);
}

#[test]
fn test_single_worker_matches_many() {
    let lines: Vec<String> = ["e4", "Nf3", "Qh5", "Nc3", "f3"]
        .iter()
        .map(|san| request(START, san))
        .collect();
    assert_eq!(run(&lines, 1).0, run(&lines, 6).0);
}
