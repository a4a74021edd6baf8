//! SAN move resolution against board state.

use chess::{Board, ChessMove, File, MoveGen, Piece, Rank, Square};

use crate::error::WorkerError;

/// Format a move in UCI notation (e.g. "e7e8q")
pub fn move_to_uci(m: ChessMove) -> String {
    format!(
        "{}{}{}",
        m.get_source(),
        m.get_dest(),
        promotion_suffix(m.get_promotion())
    )
}

fn promotion_suffix(piece: Option<Piece>) -> &'static str {
    match piece {
        Some(Piece::Queen) => "q",
        Some(Piece::Rook) => "r",
        Some(Piece::Bishop) => "b",
        Some(Piece::Knight) => "n",
        _ => "",
    }
}

fn piece_from_letter(letter: u8) -> Option<Piece> {
    match letter {
        b'K' => Some(Piece::King),
        b'Q' => Some(Piece::Queen),
        b'R' => Some(Piece::Rook),
        b'B' => Some(Piece::Bishop),
        b'N' => Some(Piece::Knight),
        _ => None,
    }
}

fn invalid_move(san: &str) -> WorkerError {
    WorkerError::InvalidMove(san.to_string())
}

/// Find the legal move matching a SAN string
pub fn find_san_move(board: &Board, san: &str) -> Result<ChessMove, WorkerError> {
    let clean = san.trim_end_matches(['+', '#', '!', '?']);
    let legal: Vec<ChessMove> = MoveGen::new_legal(board).collect();

    // Castling: the king travels two files
    if matches!(clean, "O-O" | "0-0" | "O-O-O" | "0-0-0") {
        let kingside = matches!(clean, "O-O" | "0-0");
        return legal
            .into_iter()
            .find(|m| {
                board.piece_on(m.get_source()) == Some(Piece::King) && {
                    let from = m.get_source().get_file().to_index() as i32;
                    let to = m.get_dest().get_file().to_index() as i32;
                    to - from == if kingside { 2 } else { -2 }
                }
            })
            .ok_or_else(|| invalid_move(san));
    }

    let (piece, rest) = match clean.bytes().next().and_then(piece_from_letter) {
        Some(p) => (p, &clean[1..]),
        None => (Piece::Pawn, clean),
    };

    let (rest, promotion) = match rest.split_once('=') {
        Some((head, promo)) => (
            head,
            promo.bytes().next().and_then(piece_from_letter),
        ),
        None => (rest, None),
    };

    let rest = rest.replace('x', "");
    let bytes = rest.as_bytes();
    if bytes.len() < 2 {
        return Err(invalid_move(san));
    }

    let file = bytes[bytes.len() - 2];
    let rank = bytes[bytes.len() - 1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid_move(san));
    }
    let dest = Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    );

    let disambig = &bytes[..bytes.len() - 2];
    let mut candidates: Vec<ChessMove> = legal
        .into_iter()
        .filter(|m| {
            m.get_dest() == dest
                && board.piece_on(m.get_source()) == Some(piece)
                && m.get_promotion() == promotion
        })
        .collect();

    if candidates.len() > 1 && !disambig.is_empty() {
        candidates.retain(|m| source_matches(m.get_source(), disambig));
    }

    match candidates.as_slice() {
        [only] => Ok(*only),
        _ => Err(invalid_move(san)),
    }
}

fn source_matches(src: Square, disambig: &[u8]) -> bool {
    disambig.iter().all(|&b| match b {
        b'a'..=b'h' => src.get_file().to_index() == (b - b'a') as usize,
        b'1'..=b'8' => src.get_rank().to_index() == (b - b'1') as usize,
        _ => true,
    })
}
