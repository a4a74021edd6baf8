//! Worker error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Stockfish error: {0}")]
    Stockfish(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Scoring error: {0}")]
    Score(#[from] accuracy_core::ScoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
