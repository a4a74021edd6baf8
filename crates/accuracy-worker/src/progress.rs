//! Progress and ETA tracking for a batch analysis run.

use std::time::{Duration, Instant};

pub struct ProgressTracker {
    target_games: u32,
    started: Instant,
    analyzed: u32,
    skipped: u32,
    analysis_time: Duration,
}

impl ProgressTracker {
    pub fn new(target_games: u32) -> Self {
        Self {
            target_games,
            started: Instant::now(),
            analyzed: 0,
            skipped: 0,
            analysis_time: Duration::ZERO,
        }
    }

    pub fn record_game(&mut self, elapsed: Duration) {
        self.analyzed += 1;
        self.analysis_time += elapsed;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn analyzed(&self) -> u32 {
        self.analyzed
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn analysis_time(&self) -> Duration {
        self.analysis_time
    }

    pub fn average_game_time(&self) -> Option<Duration> {
        (self.analyzed > 0).then(|| self.analysis_time / self.analyzed)
    }

    /// Estimated time to finish the remaining games, from the running
    /// average. None until at least one game has been timed.
    pub fn eta(&self) -> Option<Duration> {
        let avg = self.average_game_time()?;
        let remaining = self.target_games.saturating_sub(self.analyzed);
        Some(avg * remaining)
    }
}
