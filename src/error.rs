//! Error types for the referee front-end
//!
//! Covers configuration loading, batch input and engine scoring. Illegal moves are
//! not errors; they come back as verdicts.

use std::path::PathBuf;

use chess_rules::FenError;
use thiserror::Error;
use uci_evaluator::EvalError;

/// Errors that can occur in the referee front-end
#[derive(Error, Debug)]
pub enum RefereeError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`RefereeConfig`](crate::config::RefereeConfig)
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Scoring was requested without an engine configured
    #[error("No UCI engine configured: set engine_path in the config or pass --engine")]
    MissingEnginePath,

    /// Batch input or output failed
    #[error("Batch I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Batch output could not be serialized
    #[error("Batch serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The worker pool stopped before every request was handled
    #[error("Batch worker pool shut down early")]
    WorkerPool,

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result type alias for referee operations
pub type RefereeResult<T> = Result<T, RefereeError>;
