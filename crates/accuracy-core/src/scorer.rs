//! Per-move scoring and per-side aggregation.

use serde::Serialize;

use crate::eval::{clamp_evaluation, win_probability};

// Severity thresholds. Each tier triggers on win% loss OR centipawn loss,
// checked most severe first. The accuracy caps below reuse the tier picked
// here, so classification and accuracy cannot drift apart.
const BLUNDER_WIN_LOSS: f64 = 20.0;
const BLUNDER_CP_LOSS: i32 = 200;
const MISTAKE_WIN_LOSS: f64 = 10.0;
const MISTAKE_CP_LOSS: i32 = 100;
const INACCURACY_WIN_LOSS: f64 = 5.0;
const INACCURACY_CP_LOSS: i32 = 50;

// Accuracy model weights and per-tier compression. Empirical calibration
// values; keep verbatim so scores stay comparable across datasets.
const WIN_LOSS_WEIGHT: f64 = 3.5;
const CP_LOSS_WEIGHT: f64 = 0.2;
const BLUNDER_CAP: f64 = 19.0;
const BLUNDER_FACTOR: f64 = 0.15;
const MISTAKE_CAP: f64 = 39.0;
const MISTAKE_FACTOR: f64 = 0.35;
const INACCURACY_CAP: f64 = 59.0;
const INACCURACY_FACTOR: f64 = 0.55;
const GOOD_CAP: f64 = 94.0;
const GOOD_FACTOR: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

/// Move severity, from harmless to game-losing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityTier {
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl SeverityTier {
    fn classify(delta_win: f64, centipawn_loss: i32) -> Self {
        if delta_win >= BLUNDER_WIN_LOSS || centipawn_loss >= BLUNDER_CP_LOSS {
            Self::Blunder
        } else if delta_win >= MISTAKE_WIN_LOSS || centipawn_loss >= MISTAKE_CP_LOSS {
            Self::Mistake
        } else if delta_win >= INACCURACY_WIN_LOSS || centipawn_loss >= INACCURACY_CP_LOSS {
            Self::Inaccuracy
        } else {
            Self::Good
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Inaccuracy => "inaccuracy",
            Self::Mistake => "mistake",
            Self::Blunder => "blunder",
        }
    }
}

/// Scored result for one ply.
#[derive(Debug, Clone, Copy)]
pub struct MoveOutcome {
    pub tier: SeverityTier,
    /// Nonnegative shortfall against the best move, mover-positive frame.
    pub centipawn_loss: i32,
    /// Win% given up by the move. Signed; negative means the played move
    /// evaluated better than the engine's choice.
    pub delta_win: f64,
    /// Accuracy score in [0, 100].
    pub accuracy: f64,
}

/// Running totals for one side of one game.
#[derive(Debug, Clone, Default)]
struct SideStats {
    move_count: u32,
    blunders: u32,
    mistakes: u32,
    inaccuracies: u32,
    total_centipawn_loss: i64,
    total_accuracy: f64,
    best_move_count: u32,
}

/// Finalized per-side result for a completed game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSummary {
    pub move_count: u32,
    pub blunders: u32,
    pub mistakes: u32,
    pub inaccuracies: u32,
    pub avg_centipawn_loss: f64,
    pub accuracy: f64,
    pub best_move_percent: f64,
}

/// Accumulates move scores for both sides over one game's lifetime.
/// Create one per game; never share across games.
#[derive(Debug, Default)]
pub struct MoveScorer {
    white: SideStats,
    black: SideStats,
}

impl MoveScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one played move against the engine's best line.
    ///
    /// Both evaluations are White-relative centipawns: `best_eval` from the
    /// position before the move, `played_eval` from the position after it.
    pub fn score_move(
        &mut self,
        side: Side,
        best_eval: i32,
        played_eval: i32,
        is_top_move: bool,
    ) -> MoveOutcome {
        let mut best = clamp_evaluation(best_eval);
        let mut played = clamp_evaluation(played_eval);

        // Internal math is mover-positive: flip for Black so "better for
        // the side that moved" is always the positive direction.
        if side == Side::Black {
            best = -best;
            played = -played;
        }

        let centipawn_loss = (best - played).max(0);
        let delta_win = win_probability(best) - win_probability(played);

        let tier = SeverityTier::classify(delta_win, centipawn_loss);
        let accuracy = move_accuracy(delta_win, centipawn_loss, tier);

        let stats = self.stats_mut(side);
        stats.move_count += 1;
        match tier {
            SeverityTier::Blunder => stats.blunders += 1,
            SeverityTier::Mistake => stats.mistakes += 1,
            SeverityTier::Inaccuracy => stats.inaccuracies += 1,
            SeverityTier::Good => {}
        }
        stats.total_centipawn_loss += i64::from(centipawn_loss);
        stats.total_accuracy += accuracy;
        if is_top_move {
            stats.best_move_count += 1;
        }

        MoveOutcome {
            tier,
            centipawn_loss,
            delta_win,
            accuracy,
        }
    }

    /// Produce the per-side summary. A side with no moves yields all-zero
    /// derived fields rather than dividing by zero.
    pub fn finalize(&self, side: Side) -> SideSummary {
        let stats = match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        };

        let (avg_centipawn_loss, accuracy, best_move_percent) = if stats.move_count > 0 {
            let moves = f64::from(stats.move_count);
            (
                round1(stats.total_centipawn_loss as f64 / moves),
                round1(stats.total_accuracy / moves),
                round1(100.0 * f64::from(stats.best_move_count) / moves),
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        SideSummary {
            move_count: stats.move_count,
            blunders: stats.blunders,
            mistakes: stats.mistakes,
            inaccuracies: stats.inaccuracies,
            avg_centipawn_loss,
            accuracy,
            best_move_percent,
        }
    }

    fn stats_mut(&mut self, side: Side) -> &mut SideStats {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Accuracy for one move from both loss signals, compressed by tier.
fn move_accuracy(delta_win: f64, centipawn_loss: i32, tier: SeverityTier) -> f64 {
    if delta_win == 0.0 && centipawn_loss == 0 {
        return 100.0;
    }

    let win_based = (100.0 - delta_win * WIN_LOSS_WEIGHT).clamp(0.0, 100.0);
    let cp_based = (100.0 - f64::from(centipawn_loss) * CP_LOSS_WEIGHT).clamp(0.0, 100.0);
    let base = win_based.min(cp_based);

    match tier {
        SeverityTier::Blunder => (base * BLUNDER_FACTOR).min(BLUNDER_CAP),
        SeverityTier::Mistake => (base * MISTAKE_FACTOR).min(MISTAKE_CAP),
        SeverityTier::Inaccuracy => (base * INACCURACY_FACTOR).min(INACCURACY_CAP),
        SeverityTier::Good => (base * GOOD_FACTOR).min(GOOD_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_move_scores_100() {
        let mut scorer = MoveScorer::new();
        let outcome = scorer.score_move(Side::White, 30, 30, true);
        assert_eq!(outcome.tier, SeverityTier::Good);
        assert_eq!(outcome.centipawn_loss, 0);
        assert_eq!(outcome.delta_win, 0.0);
        assert_eq!(outcome.accuracy, 100.0);
    }

    #[test]
    fn test_one_move_game_summary() {
        let mut scorer = MoveScorer::new();
        scorer.score_move(Side::White, 0, 0, true);
        let summary = scorer.finalize(Side::White);
        assert_eq!(
            summary,
            SideSummary {
                move_count: 1,
                blunders: 0,
                mistakes: 0,
                inaccuracies: 0,
                avg_centipawn_loss: 0.0,
                accuracy: 100.0,
                best_move_percent: 100.0,
            }
        );
    }

    #[test]
    fn test_cp_threshold_blunder() {
        let mut scorer = MoveScorer::new();
        // 200cp swing trips the blunder cp threshold even though the win%
        // drop stays under 20.
        let outcome = scorer.score_move(Side::White, 100, -100, false);
        assert_eq!(outcome.centipawn_loss, 200);
        assert!(outcome.delta_win < 20.0);
        assert_eq!(outcome.tier, SeverityTier::Blunder);
        assert!(outcome.accuracy <= 19.0);
    }

    #[test]
    fn test_small_loss_stays_good() {
        let mut scorer = MoveScorer::new();
        let outcome = scorer.score_move(Side::White, 50, 20, false);
        assert_eq!(outcome.centipawn_loss, 30);
        assert!(outcome.delta_win < 5.0);
        assert_eq!(outcome.tier, SeverityTier::Good);
        assert!(outcome.accuracy < 100.0);
        // base * GOOD_FACTOR with base derived from a 30cp loss
        assert!(outcome.accuracy > 80.0);
    }

    #[test]
    fn test_black_moves_are_mover_relative() {
        let mut scorer = MoveScorer::new();
        // White-relative -100 is +100 for Black; dropping to White-relative
        // +100 is a 200cp loss for the mover.
        let outcome = scorer.score_move(Side::Black, -100, 100, false);
        assert_eq!(outcome.centipawn_loss, 200);
        assert_eq!(outcome.tier, SeverityTier::Blunder);
    }

    #[test]
    fn test_improvement_counts_as_zero_loss() {
        let mut scorer = MoveScorer::new();
        let outcome = scorer.score_move(Side::White, 20, 80, false);
        assert_eq!(outcome.centipawn_loss, 0);
        assert!(outcome.delta_win < 0.0);
        assert_eq!(outcome.tier, SeverityTier::Good);
    }

    #[test]
    fn test_accuracy_bounded_and_tier_consistent() {
        for best in (-1200..=1200).step_by(150) {
            for played in (-1200..=1200).step_by(150) {
                let mut scorer = MoveScorer::new();
                let outcome = scorer.score_move(Side::White, best, played, false);
                assert!(
                    (0.0..=100.0).contains(&outcome.accuracy),
                    "accuracy {} out of range for ({best}, {played})",
                    outcome.accuracy
                );
                let cap = match outcome.tier {
                    SeverityTier::Blunder => BLUNDER_CAP,
                    SeverityTier::Mistake => MISTAKE_CAP,
                    SeverityTier::Inaccuracy => INACCURACY_CAP,
                    SeverityTier::Good => 100.0,
                };
                assert!(
                    outcome.accuracy <= cap,
                    "tier {:?} accuracy {} exceeds cap for ({best}, {played})",
                    outcome.tier,
                    outcome.accuracy
                );
            }
        }
    }

    #[test]
    fn test_finalize_empty_side_is_all_zero() {
        let scorer = MoveScorer::new();
        let summary = scorer.finalize(Side::Black);
        assert_eq!(summary.move_count, 0);
        assert_eq!(summary.avg_centipawn_loss, 0.0);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.best_move_percent, 0.0);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut scorer = MoveScorer::new();
        scorer.score_move(Side::White, 100, -150, false);
        scorer.score_move(Side::White, 0, 0, true);
        assert_eq!(scorer.finalize(Side::White), scorer.finalize(Side::White));
    }

    #[test]
    fn test_sides_accumulate_independently() {
        let mut scorer = MoveScorer::new();
        scorer.score_move(Side::White, 300, -300, false);
        scorer.score_move(Side::Black, -20, 20, true);
        let white = scorer.finalize(Side::White);
        let black = scorer.finalize(Side::Black);
        assert_eq!(white.move_count, 1);
        assert_eq!(white.blunders, 1);
        assert_eq!(black.move_count, 1);
        assert_eq!(black.blunders, 0);
        assert_eq!(black.best_move_percent, 100.0);
    }

    #[test]
    fn test_summary_rounding() {
        let mut scorer = MoveScorer::new();
        scorer.score_move(Side::White, 10, 0, false);
        scorer.score_move(Side::White, 15, 0, false);
        scorer.score_move(Side::White, 20, 0, false);
        let summary = scorer.finalize(Side::White);
        // 45 total over 3 moves
        assert_eq!(summary.avg_centipawn_loss, 15.0);
        assert_eq!(summary.best_move_percent, 0.0);
    }

    #[test]
    fn test_classification_thresholds() {
        // Pure cp-loss thresholds in the mover-positive frame.
        let cases = [
            (49, SeverityTier::Good),
            (50, SeverityTier::Inaccuracy),
            (99, SeverityTier::Inaccuracy),
            (100, SeverityTier::Mistake),
            (199, SeverityTier::Mistake),
            (200, SeverityTier::Blunder),
        ];
        for (loss, expected) in cases {
            // Keep win% deltas tiny by staying deep in the saturated zone.
            let tier = SeverityTier::classify(0.0, loss);
            assert_eq!(tier, expected, "cp loss {loss}");
        }
    }

    #[test]
    fn test_win_loss_thresholds() {
        let cases = [
            (4.9, SeverityTier::Good),
            (5.0, SeverityTier::Inaccuracy),
            (10.0, SeverityTier::Mistake),
            (20.0, SeverityTier::Blunder),
        ];
        for (dw, expected) in cases {
            assert_eq!(SeverityTier::classify(dw, 0), expected, "delta_win {dw}");
        }
    }
}
