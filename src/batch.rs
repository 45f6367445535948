//! Batch classification over JSON lines
//!
//! Each input line is a request `{"fen": ..., "san": ...}`. Requests are
//! classified on a pool of worker threads fed through a bounded
//! `crossbeam-channel`, and results are written back as JSON lines **in input
//! order**, whatever order the workers finish in.
//!
//! A line that is not a valid request, or whose FEN does not decode, produces an
//! `"error"` record instead of stopping the batch.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::thread;

use chess_rules::Verdict;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RefereeError, RefereeResult};

/// Jobs buffered per worker before the reader waits
const QUEUE_DEPTH_PER_WORKER: usize = 16;

/// Upper bound on the worker count, whatever the caller asks for
const MAX_WORKERS: usize = 64;

/// One move to classify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub fen: String,
    pub san: String,
}

/// One output line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub fen: String,
    pub san: String,
    /// `"valid"`, `"illegal"` or `"error"`
    pub verdict: String,
    /// Why the move is illegal or the request failed
    pub reason: Option<String>,
}

impl BatchRecord {
    fn error(fen: String, san: String, reason: String) -> Self {
        BatchRecord {
            fen,
            san,
            verdict: "error".to_string(),
            reason: Some(reason),
        }
    }
}

/// Totals for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub valid: usize,
    pub illegal: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.valid + self.illegal + self.errors
    }

    fn count(&mut self, record: &BatchRecord) {
        match record.verdict.as_str() {
            "valid" => self.valid += 1,
            "illegal" => self.illegal += 1,
            _ => self.errors += 1,
        }
    }
}

/// Classify a single request
pub fn classify_request(request: BatchRequest) -> BatchRecord {
    match chess_rules::classify(&request.fen, &request.san) {
        Ok(Verdict::Valid) => BatchRecord {
            fen: request.fen,
            san: request.san,
            verdict: "valid".to_string(),
            reason: None,
        },
        Ok(Verdict::Illegal(reason)) => BatchRecord {
            fen: request.fen,
            san: request.san,
            verdict: "illegal".to_string(),
            reason: Some(reason.to_string()),
        },
        Err(e) => BatchRecord::error(request.fen, request.san, e.to_string()),
    }
}

/// Classify one raw input line
pub fn classify_line(line: &str) -> BatchRecord {
    match serde_json::from_str::<BatchRequest>(line) {
        Ok(request) => classify_request(request),
        Err(e) => BatchRecord::error(String::new(), String::new(), format!("Malformed request: {e}")),
    }
}

/// Classify every line of `input` on `workers` threads and write the records to
/// `output` in input order
///
/// Blank lines are skipped. The worker count is clamped to `1..=64`.
pub fn run_batch<R: BufRead, W: Write>(input: R, mut output: W, workers: usize) -> RefereeResult<BatchSummary> {
    let workers = workers.clamp(1, MAX_WORKERS);
    debug!("[BATCH] Starting {} workers", workers);

    let summary = thread::scope(|scope| -> RefereeResult<BatchSummary> {
        // Channels live inside the scope so an early return closes them and
        // lets the workers wind down before the scope joins
        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, String)>(workers * QUEUE_DEPTH_PER_WORKER);
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<(usize, BatchRecord)>();

        for _ in 0..workers {
            let jobs = job_rx.clone();
            let done = done_tx.clone();
            scope.spawn(move || {
                for (index, line) in jobs {
                    if done.send((index, classify_line(&line))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(done_tx);

        let mut writer = OrderedWriter::new(&mut output);
        let mut submitted = 0usize;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            job_tx
                .send((submitted, line))
                .map_err(|_| RefereeError::WorkerPool)?;
            submitted += 1;

            for (index, record) in done_rx.try_iter() {
                writer.accept(index, record)?;
            }
        }
        drop(job_tx);

        for (index, record) in done_rx.iter() {
            writer.accept(index, record)?;
        }

        if writer.written() != submitted {
            return Err(RefereeError::WorkerPool);
        }
        Ok(writer.summary)
    })?;

    output.flush()?;
    info!(
        "[BATCH] Classified {} moves: {} valid, {} illegal, {} errors",
        summary.total(),
        summary.valid,
        summary.illegal,
        summary.errors
    );
    Ok(summary)
}

/// Holds finished records until every earlier index has been written
struct OrderedWriter<'a, W: Write> {
    output: &'a mut W,
    pending: BTreeMap<usize, BatchRecord>,
    next: usize,
    summary: BatchSummary,
}

impl<'a, W: Write> OrderedWriter<'a, W> {
    fn new(output: &'a mut W) -> Self {
        OrderedWriter {
            output,
            pending: BTreeMap::new(),
            next: 0,
            summary: BatchSummary::default(),
        }
    }

    fn accept(&mut self, index: usize, record: BatchRecord) -> RefereeResult<()> {
        self.pending.insert(index, record);
        while let Some(record) = self.pending.remove(&self.next) {
            serde_json::to_writer(&mut *self.output, &record)?;
            self.output.write_all(b"\n")?;
            self.summary.count(&record);
            self.next += 1;
        }
        Ok(())
    }

    fn written(&self) -> usize {
        self.next
    }
}
