use std::time::Duration;

use chess_rules::{FenError, IllegalReason, PlayError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Failed to start engine '{path}': {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine did not send '{expected}' within {waited:?}")]
    Timeout {
        expected: &'static str,
        waited: Duration,
    },

    #[error("Engine closed its output")]
    Disconnected,

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("Illegal move: {0}")]
    IllegalMove(IllegalReason),
}

impl From<PlayError> for EvalError {
    fn from(err: PlayError) -> Self {
        match err {
            PlayError::Fen(err) => EvalError::Fen(err),
            PlayError::Illegal(reason) => EvalError::IllegalMove(reason),
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
