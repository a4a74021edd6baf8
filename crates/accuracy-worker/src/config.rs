//! Command-line configuration

use std::env;
use std::path::PathBuf;

use clap::Parser;

/// Batch accuracy analysis of PGN games with a local Stockfish
#[derive(Debug, Parser)]
#[command(name = "accuracy-worker")]
pub struct Config {
    /// Input PGN file containing the games to analyze
    pub pgn_file: PathBuf,

    /// Output CSV file (appended to; header written only when empty)
    #[arg(short, long, default_value = "accuracy.csv")]
    pub output: PathBuf,

    /// Path to the Stockfish binary (falls back to $STOCKFISH_PATH)
    #[arg(long)]
    pub stockfish: Option<String>,

    /// Engine budget per position in milliseconds
    #[arg(long, default_value_t = 100)]
    pub movetime_ms: u64,

    /// Stop after this many games have been analyzed
    #[arg(long, default_value_t = 5000)]
    pub target_games: u32,

    /// Skip this many matching games before analyzing (resume support)
    #[arg(long, default_value_t = 0)]
    pub skip_games: u32,

    /// Only analyze games with this TimeControl header; empty disables
    /// the filter
    #[arg(long, default_value = "600+0")]
    pub time_control: String,
}

impl Config {
    pub fn stockfish_path(&self) -> String {
        self.stockfish
            .clone()
            .or_else(|| env::var("STOCKFISH_PATH").ok())
            .unwrap_or_else(|| "stockfish".to_string())
    }
}
