//! Scoring core for chess accuracy analysis.
//!
//! Converts engine evaluations into win probabilities, per-move accuracy
//! scores, and per-side game summaries. Pure and synchronous — the engine,
//! PGN, and output plumbing live in the worker crate.

pub mod eval;
pub mod scorer;

pub use eval::{clamp_evaluation, to_white_centipawns, win_probability, RawScore, ScoreError};
pub use scorer::{MoveOutcome, MoveScorer, SeverityTier, Side, SideSummary};
