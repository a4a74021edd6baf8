//! Evaluation normalization: clamping and win-probability conversion.

use thiserror::Error;

/// Evaluations are capped at +/- 10 pawns before any scoring math.
/// Forced mates collapse to this boundary for the mating side.
pub const EVAL_CLAMP: i32 = 1000;

/// Logistic steepness of the win% curve, calibrated for the Stockfish
/// centipawn scale. Changing it breaks comparability with existing data.
const WIN_PERCENT_K: f64 = 0.00368208;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The engine reported neither a centipawn score nor a mate distance.
    #[error("engine returned no usable evaluation")]
    MissingEvaluation,
}

/// Raw engine score for one position, from the side to move's perspective.
/// At most one of `cp` and `mate` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawScore {
    pub cp: Option<i32>,
    pub mate: Option<i32>,
}

/// Clamp a centipawn evaluation to `[-EVAL_CLAMP, EVAL_CLAMP]`.
pub fn clamp_evaluation(raw: i32) -> i32 {
    raw.clamp(-EVAL_CLAMP, EVAL_CLAMP)
}

/// Convert a raw engine score into a clamped White-relative centipawn
/// value. UCI scores are side-to-move relative, so the value is negated
/// when Black is to move in the evaluated position.
pub fn to_white_centipawns(score: RawScore, white_to_move: bool) -> Result<i32, ScoreError> {
    let stm_eval = if let Some(mate) = score.mate {
        if mate > 0 {
            EVAL_CLAMP
        } else {
            -EVAL_CLAMP
        }
    } else if let Some(cp) = score.cp {
        clamp_evaluation(cp)
    } else {
        return Err(ScoreError::MissingEvaluation);
    };

    Ok(if white_to_move { stm_eval } else { -stm_eval })
}

/// White's expected win percentage for a centipawn evaluation, in [0, 100].
///
/// Logistic in the evaluation, so a small slip in an already-won position
/// costs far less win% than the same slip in a balanced one.
pub fn win_probability(evaluation: i32) -> f64 {
    let eval = f64::from(clamp_evaluation(evaluation));
    50.0 + 50.0 * (2.0 / (1.0 + (-WIN_PERCENT_K * eval).exp()) - 1.0)
}
