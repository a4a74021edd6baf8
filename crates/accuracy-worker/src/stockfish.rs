//! Stockfish engine wrapper using UCI protocol (async I/O)

use accuracy_core::RawScore;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

use crate::error::WorkerError;

/// Result of a single position evaluation
#[derive(Debug, Clone)]
pub struct EvalResult {
    /// Score from the side to move's perspective
    pub score: RawScore,
    /// Best move in UCI notation; None when the position has no legal moves
    pub best_move: Option<String>,
}

/// Stockfish engine instance
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl StockfishEngine {
    /// Spawn a new Stockfish process and initialize UCI
    pub async fn new(path: &str) -> Result<Self, WorkerError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| WorkerError::Stockfish(format!("Failed to spawn Stockfish: {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| WorkerError::Stockfish("No stdin handle".into()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| WorkerError::Stockfish("No stdout handle".into()))?;

        let mut engine = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
        };

        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        // Single-threaded analysis keeps the per-move budget consistent
        engine.send("setoption name Threads value 1").await?;
        engine.send("setoption name Hash value 128").await?;
        engine.send("setoption name UCI_AnalyseMode value true").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to Stockfish
    async fn send(&mut self, cmd: &str) -> Result<(), WorkerError> {
        debug!(cmd, "SF <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| WorkerError::Stockfish(format!("Failed to write to Stockfish: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| WorkerError::Stockfish(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    async fn read_line(&mut self, line: &mut String) -> Result<(), WorkerError> {
        line.clear();
        let n = self
            .stdout
            .read_line(line)
            .await
            .map_err(|e| WorkerError::Stockfish(format!("Failed to read from Stockfish: {e}")))?;
        if n == 0 {
            return Err(WorkerError::Stockfish("Engine closed its stdout".into()));
        }
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), WorkerError> {
        let mut line = String::new();
        loop {
            self.read_line(&mut line).await?;
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Evaluate a position with a fixed time budget and get the best move
    /// with its score.
    pub async fn evaluate(&mut self, fen: &str, movetime_ms: u64) -> Result<EvalResult, WorkerError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go movetime {movetime_ms}")).await?;

        let mut score = RawScore::default();
        let mut line = String::new();

        loop {
            self.read_line(&mut line).await?;
            let trimmed = line.trim();

            if trimmed.starts_with("info") && trimmed.contains(" score ") {
                if let Some(cp) = token_value(trimmed, "cp") {
                    score = RawScore { cp: Some(cp), mate: None };
                }
                if let Some(mate) = token_value(trimmed, "mate") {
                    score = RawScore { cp: None, mate: Some(mate) };
                }
            } else if let Some(rest) = trimmed.strip_prefix("bestmove") {
                let token = rest.split_whitespace().next().unwrap_or("");
                let best_move = if token.is_empty() || token == "(none)" {
                    None
                } else {
                    Some(token.to_string())
                };
                return Ok(EvalResult { score, best_move });
            }
        }
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Parse the value following a keyword in a UCI info line
fn token_value<T: std::str::FromStr>(line: &str, key: &str) -> Option<T> {
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == key {
            return tokens.next()?.parse().ok();
        }
    }
    None
}
