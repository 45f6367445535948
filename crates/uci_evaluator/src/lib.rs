//! Scores the position reached by a SAN move with an external UCI engine
//!
//! The engine sits behind the [`Evaluator`] trait, so callers (and tests) can
//! swap the real [`UciEngine`] for anything that produces an [`EngineScore`].

pub mod engine;
pub mod error;
pub mod score;

use std::time::Duration;

use log::debug;

pub use engine::{with_engine, UciEngine};
pub use error::{EvalError, EvalResult};
pub use score::{EngineScore, ScorePolicy};

/// Anything that can score a FEN position within a time budget
pub trait Evaluator {
    /// Score for the side to move in `fen`, or `None` if the engine gave none
    fn evaluate(&mut self, fen: &str, budget: Duration) -> EvalResult<Option<EngineScore>>;
}

/// Play `san` on `fen` and score the result for the side that moved
///
/// Illegal moves are refused with [`EvalError::IllegalMove`] before the engine
/// is consulted.
///
/// # Examples
///
/// ```rust,ignore
/// let value = with_engine("/usr/local/bin/stockfish", |engine| {
///     score_after_move(engine, START_FEN, "e4", Duration::from_millis(100), &ScorePolicy::default())
/// })?;
/// ```
pub fn score_after_move<E: Evaluator + ?Sized>(
    evaluator: &mut E,
    fen: &str,
    san: &str,
    budget: Duration,
    policy: &ScorePolicy,
) -> EvalResult<f64> {
    let next = chess_rules::play(fen, san)?;
    debug!("[UCI] Scoring {san}: {next}");
    let score = evaluator.evaluate(&next, budget)?;
    Ok(policy.normalize_for_mover(score))
}
