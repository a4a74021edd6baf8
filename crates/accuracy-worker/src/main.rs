//! PGN accuracy analysis worker
//!
//! Streams games from a PGN file through a local Stockfish process and
//! appends per-game accuracy summaries to a CSV dataset.

mod analyzer;
mod board;
mod config;
mod error;
mod pgn;
mod progress;
mod report;
mod stockfish;

use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};

use crate::config::Config;
use crate::progress::ProgressTracker;
use crate::report::CsvReport;
use crate::stockfish::StockfishEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = Config::parse();
    let stockfish_path = config.stockfish_path();
    info!(
        stockfish_path = %stockfish_path,
        movetime_ms = config.movetime_ms,
        target_games = config.target_games,
        skip_games = config.skip_games,
        time_control = %config.time_control,
        "Worker config loaded"
    );

    let pgn_text = std::fs::read_to_string(&config.pgn_file)?;
    let mut engine = StockfishEngine::new(&stockfish_path).await?;
    let mut report = CsvReport::open(&config.output)?;
    let mut progress = ProgressTracker::new(config.target_games);
    let mut games_to_skip = config.skip_games;

    for chunk in pgn::split_games(&pgn_text) {
        if progress.analyzed() >= config.target_games {
            break;
        }

        let Some(game) = pgn::parse_game(&chunk) else {
            warn!("Skipping game with no parseable moves");
            continue;
        };

        if !config.time_control.is_empty() && game.metadata.time_control != config.time_control {
            progress.record_skip();
            continue;
        }

        if games_to_skip > 0 {
            games_to_skip -= 1;
            continue;
        }

        info!(
            game = progress.analyzed() + 1,
            target = config.target_games,
            white = %game.metadata.white,
            black = %game.metadata.black,
            white_elo = %game.metadata.white_elo,
            black_elo = %game.metadata.black_elo,
            result = %game.metadata.result,
            eta = ?progress.eta(),
            "Analyzing game"
        );

        let started = Instant::now();
        match analyzer::analyze_game(&mut engine, &game, config.movetime_ms).await {
            Ok(game_report) => {
                progress.record_game(started.elapsed());
                info!(
                    white_accuracy = game_report.white.accuracy,
                    black_accuracy = game_report.black.accuracy,
                    white_avg_cpl = game_report.white.avg_centipawn_loss,
                    black_avg_cpl = game_report.black.avg_centipawn_loss,
                    white_best_move_percent = game_report.white.best_move_percent,
                    black_best_move_percent = game_report.black.best_move_percent,
                    game_time = ?started.elapsed(),
                    "Game analyzed"
                );
                report.write_game(&game.metadata, &game_report)?;
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed, skipping game");
            }
        }
    }

    engine.quit().await;

    info!(
        analyzed = progress.analyzed(),
        skipped = progress.skipped(),
        total_time = ?progress.elapsed(),
        analysis_time = ?progress.analysis_time(),
        avg_game_time = ?progress.average_game_time(),
        "Analysis complete"
    );

    Ok(())
}
