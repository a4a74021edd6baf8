//! Per-game analysis: drive the engine over every ply and score each move.

use accuracy_core::{to_white_centipawns, MoveScorer, Side, SideSummary};
use chess::{Board, Color};
use tracing::debug;

use crate::board::{find_san_move, move_to_uci};
use crate::error::WorkerError;
use crate::pgn::GameRecord;
use crate::stockfish::StockfishEngine;

/// Per-side accuracy summaries for one analyzed game
#[derive(Debug, Clone)]
pub struct GameReport {
    pub white: SideSummary,
    pub black: SideSummary,
}

/// Analyze one game move by move.
///
/// For each ply the pre-move position yields the engine's best move and
/// evaluation, the post-move position yields the evaluation of what was
/// actually played; both use the same time budget so move quality is
/// compared on equal footing.
pub async fn analyze_game(
    engine: &mut StockfishEngine,
    game: &GameRecord,
    movetime_ms: u64,
) -> Result<GameReport, WorkerError> {
    let mut board = Board::default();
    let mut scorer = MoveScorer::new();

    for san in &game.moves {
        let white_to_move = board.side_to_move() == Color::White;
        let side = if white_to_move { Side::White } else { Side::Black };

        let before = engine.evaluate(&board.to_string(), movetime_ms).await?;
        let best_eval = to_white_centipawns(before.score, white_to_move)?;

        let chess_move = find_san_move(&board, san)?;
        board = board.make_move_new(chess_move);

        let after = engine.evaluate(&board.to_string(), movetime_ms).await?;
        let played_eval = to_white_centipawns(after.score, !white_to_move)?;

        let played_uci = move_to_uci(chess_move);
        let is_top_move = before.best_move.as_deref() == Some(played_uci.as_str());

        let outcome = scorer.score_move(side, best_eval, played_eval, is_top_move);
        debug!(
            san = %san,
            uci = %played_uci,
            tier = outcome.tier.as_str(),
            cp_loss = outcome.centipawn_loss,
            accuracy = outcome.accuracy,
            "Move scored"
        );
    }

    Ok(GameReport {
        white: scorer.finalize(Side::White),
        black: scorer.finalize(Side::Black),
    })
}
