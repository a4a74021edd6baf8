//! CSV report output — append mode, header row written once.

use std::fs::{File, OpenOptions};
use std::path::Path;

use serde::Serialize;

use crate::analyzer::GameReport;
use crate::error::WorkerError;
use crate::pgn::GameMetadata;

/// One output row; field order matches the dataset's column order.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Game Link")]
    game_link: &'a str,
    #[serde(rename = "White Elo")]
    white_elo: &'a str,
    #[serde(rename = "Black Elo")]
    black_elo: &'a str,
    #[serde(rename = "White Rating Diff")]
    white_rating_diff: &'a str,
    #[serde(rename = "Black Rating Diff")]
    black_rating_diff: &'a str,
    #[serde(rename = "Opening")]
    opening: &'a str,
    #[serde(rename = "Time Control")]
    time_control: &'a str,
    #[serde(rename = "Result")]
    result: &'a str,
    #[serde(rename = "Termination")]
    termination: &'a str,
    #[serde(rename = "White Accuracy")]
    white_accuracy: f64,
    #[serde(rename = "Black Accuracy")]
    black_accuracy: f64,
    #[serde(rename = "White Blunders")]
    white_blunders: u32,
    #[serde(rename = "White Mistakes")]
    white_mistakes: u32,
    #[serde(rename = "White Inaccuracies")]
    white_inaccuracies: u32,
    #[serde(rename = "Black Blunders")]
    black_blunders: u32,
    #[serde(rename = "Black Mistakes")]
    black_mistakes: u32,
    #[serde(rename = "Black Inaccuracies")]
    black_inaccuracies: u32,
    #[serde(rename = "White Avg CPL")]
    white_avg_cpl: f64,
    #[serde(rename = "Black Avg CPL")]
    black_avg_cpl: f64,
    #[serde(rename = "White Best Move %")]
    white_best_move_percent: f64,
    #[serde(rename = "Black Best Move %")]
    black_best_move_percent: f64,
}

/// Append-mode CSV writer for per-game summaries
pub struct CsvReport {
    writer: csv::Writer<File>,
}

impl CsvReport {
    /// Open (or create) the output file. The header row is only written
    /// when the file is empty, so interrupted runs can append cleanly.
    pub fn open(path: &Path) -> Result<Self, WorkerError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);
        Ok(Self { writer })
    }

    pub fn write_game(
        &mut self,
        metadata: &GameMetadata,
        report: &GameReport,
    ) -> Result<(), WorkerError> {
        self.writer.serialize(ReportRow {
            game_link: &metadata.site,
            white_elo: &metadata.white_elo,
            black_elo: &metadata.black_elo,
            white_rating_diff: &metadata.white_rating_diff,
            black_rating_diff: &metadata.black_rating_diff,
            opening: &metadata.opening,
            time_control: &metadata.time_control,
            result: &metadata.result,
            termination: &metadata.termination,
            white_accuracy: report.white.accuracy,
            black_accuracy: report.black.accuracy,
            white_blunders: report.white.blunders,
            white_mistakes: report.white.mistakes,
            white_inaccuracies: report.white.inaccuracies,
            black_blunders: report.black.blunders,
            black_mistakes: report.black.mistakes,
            black_inaccuracies: report.black.inaccuracies,
            white_avg_cpl: report.white.avg_centipawn_loss,
            black_avg_cpl: report.black.avg_centipawn_loss,
            white_best_move_percent: report.white.best_move_percent,
            black_best_move_percent: report.black.best_move_percent,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
