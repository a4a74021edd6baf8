//! PGN parsing utilities — lightweight regex-based parser.

use regex::Regex;

/// Header metadata for one game, with the original file's "N/A" fallback
/// for absent tags.
#[derive(Debug, Clone)]
pub struct GameMetadata {
    pub white: String,
    pub black: String,
    pub site: String,
    pub white_elo: String,
    pub black_elo: String,
    pub white_rating_diff: String,
    pub black_rating_diff: String,
    pub opening: String,
    pub time_control: String,
    pub result: String,
    pub termination: String,
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub metadata: GameMetadata,
    /// Mainline moves in SAN notation
    pub moves: Vec<String>,
}

/// Split a multi-game PGN text into one chunk per game. A game chunk ends
/// when a new header section starts after movetext.
pub fn split_games(text: &str) -> Vec<String> {
    let mut games = Vec::new();
    let mut current = String::new();
    let mut seen_movetext = false;

    for line in text.lines() {
        let trimmed = line.trim_start_matches('\u{feff}').trim();
        if trimmed.starts_with('[') && seen_movetext {
            games.push(std::mem::take(&mut current));
            seen_movetext = false;
        }
        if !trimmed.is_empty() && !trimmed.starts_with('[') {
            seen_movetext = true;
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        games.push(current);
    }

    games
}

/// Parse a single-game PGN chunk. Returns None for games without any
/// mainline moves.
pub fn parse_game(pgn: &str) -> Option<GameRecord> {
    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).ok()?;

    let mut metadata = GameMetadata {
        white: "Unknown".to_string(),
        black: "Unknown".to_string(),
        site: "N/A".to_string(),
        white_elo: "N/A".to_string(),
        black_elo: "N/A".to_string(),
        white_rating_diff: "N/A".to_string(),
        black_rating_diff: "N/A".to_string(),
        opening: "N/A".to_string(),
        time_control: "N/A".to_string(),
        result: "*".to_string(),
        termination: "N/A".to_string(),
    };

    for cap in header_re.captures_iter(pgn) {
        let value = cap[2].to_string();
        match &cap[1] {
            "White" => metadata.white = value,
            "Black" => metadata.black = value,
            "Site" => metadata.site = value,
            "WhiteElo" => metadata.white_elo = value,
            "BlackElo" => metadata.black_elo = value,
            "WhiteRatingDiff" => metadata.white_rating_diff = value,
            "BlackRatingDiff" => metadata.black_rating_diff = value,
            "Opening" => metadata.opening = value,
            "TimeControl" => metadata.time_control = value,
            "Result" => metadata.result = value,
            "Termination" => metadata.termination = value,
            _ => {}
        }
    }

    let moves = extract_moves(pgn);
    if moves.is_empty() {
        return None;
    }

    Some(GameRecord { metadata, moves })
}

/// Extract SAN moves from PGN text (after removing headers, comments,
/// variations).
fn extract_moves(pgn: &str) -> Vec<String> {
    let header_re = Regex::new(r"\[[^\]]*\]").unwrap();
    let no_headers = header_re.replace_all(pgn, "");

    let comment_re = Regex::new(r"\{[^}]*\}").unwrap();
    let no_comments = comment_re.replace_all(&no_headers, "");

    let variation_re = Regex::new(r"\([^)]*\)").unwrap();
    let no_variations = variation_re.replace_all(&no_comments, "");

    let move_re =
        Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap();

    move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_ONE: &str = r#"[Event "Rated Blitz game"]
[Site "https://lichess.org/abcd1234"]
[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[WhiteElo "1500"]
[BlackElo "1480"]
[WhiteRatingDiff "+8"]
[BlackRatingDiff "-8"]
[Opening "King's Pawn Game"]
[TimeControl "600+0"]
[Termination "Normal"]

1. e4 e5 2. Nf3 { a comment } Nc6 (2... d6) 3. Bb5 1-0"#;

    const GAME_TWO: &str = r#"[Event "Casual game"]
[White "Player3"]
[Black "Player4"]
[Result "0-1"]

1. d4 d5 0-1"#;

    #[test]
    fn test_parse_game_headers() {
        let game = parse_game(GAME_ONE).unwrap();
        assert_eq!(game.metadata.white, "Player1");
        assert_eq!(game.metadata.site, "https://lichess.org/abcd1234");
        assert_eq!(game.metadata.white_elo, "1500");
        assert_eq!(game.metadata.white_rating_diff, "+8");
        assert_eq!(game.metadata.time_control, "600+0");
        assert_eq!(game.metadata.result, "1-0");
    }

    #[test]
    fn test_missing_headers_fall_back() {
        let game = parse_game(GAME_TWO).unwrap();
        assert_eq!(game.metadata.white_elo, "N/A");
        assert_eq!(game.metadata.opening, "N/A");
        assert_eq!(game.metadata.termination, "N/A");
    }

    #[test]
    fn test_extract_moves_skips_comments_and_variations() {
        let game = parse_game(GAME_ONE).unwrap();
        assert_eq!(game.moves, vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]);
    }

    #[test]
    fn test_headers_only_game_is_rejected() {
        assert!(parse_game("[White \"x\"]\n[Black \"y\"]\n").is_none());
    }

    #[test]
    fn test_split_games() {
        let text = format!("{GAME_ONE}\n\n{GAME_TWO}\n");
        let chunks = split_games(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].contains("Player1"));
        assert!(chunks[1].contains("Player3"));
    }

    #[test]
    fn test_split_single_game() {
        let chunks = split_games(GAME_TWO);
        assert_eq!(chunks.len(), 1);
    }
}
