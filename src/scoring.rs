//! Engine scoring for the `score` command

use std::path::Path;

use tracing::info;
use uci_evaluator::{score_after_move, with_engine};

use crate::config::RefereeConfig;
use crate::error::{RefereeError, RefereeResult};

/// Score `san` on `fen` with the configured engine, for the side that moves
///
/// The engine process is started for this call and shut down before returning.
pub fn score_move(config: &RefereeConfig, fen: &str, san: &str) -> RefereeResult<f64> {
    let engine_path = config
        .engine_path
        .as_deref()
        .ok_or(RefereeError::MissingEnginePath)?;
    score_with_engine(engine_path, config, fen, san)
}

fn score_with_engine(engine_path: &Path, config: &RefereeConfig, fen: &str, san: &str) -> RefereeResult<f64> {
    // Refuse bad input before paying for an engine start
    if let chess_rules::Verdict::Illegal(reason) = chess_rules::classify(fen, san)? {
        return Err(uci_evaluator::EvalError::IllegalMove(reason).into());
    }

    let policy = config.score_policy();
    let value = with_engine(engine_path, |engine| {
        score_after_move(engine, fen, san, config.time_budget(), &policy)
    })?;
    info!("[UCI] {} scored {:.3}", san, value);
    Ok(value)
}
