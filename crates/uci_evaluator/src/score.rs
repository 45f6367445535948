//! Engine scores and their normalization to `[0, 1]`

use serde::{Deserialize, Serialize};

/// Score reported in a UCI `info` line, from the side to move's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineScore {
    Centipawns(i32),
    /// Moves to mate; negative when the side to move is getting mated, `0` when
    /// it already is
    Mate(i32),
}

impl EngineScore {
    /// Extract the score from an `info ... score cp 35 ...` or
    /// `info ... score mate -3 ...` line
    pub fn parse_info(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("info") {
            return None;
        }
        tokens.find(|&token| token == "score")?;
        let kind = tokens.next()?;
        let value: i32 = tokens.next()?.parse().ok()?;
        match kind {
            "cp" => Some(EngineScore::Centipawns(value)),
            "mate" => Some(EngineScore::Mate(value)),
            _ => None,
        }
    }
}

/// Maps an engine score to a number in `[0, 1]` for the side that just moved
///
/// Mate for the mover is `1.0`, mate against the mover is `0.0`, centipawns are
/// clamped to `±bound` and scaled linearly, and a missing score is `0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorePolicy {
    pub bound: i32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        ScorePolicy { bound: 1000 }
    }
}

impl ScorePolicy {
    /// Normalize a score taken on the position after the move
    ///
    /// The engine speaks for the side to move there, which is the mover's
    /// opponent, so the sign is flipped.
    pub fn normalize_for_mover(&self, score: Option<EngineScore>) -> f64 {
        let bound = self.bound.max(1);
        match score {
            None => 0.5,
            Some(EngineScore::Mate(moves)) if moves > 0 => 0.0,
            Some(EngineScore::Mate(_)) => 1.0,
            Some(EngineScore::Centipawns(cp)) => {
                let mover = cp.saturating_neg().clamp(-bound, bound);
                (f64::from(mover) + f64::from(bound)) / (2.0 * f64::from(bound))
            }
        }
    }
}
