use chrono::{DateTime, Utc};
use regex::Regex;

use crate::config::AnalysisSettings;
use crate::domain::{GamePhase, ResultType, Termination};

const LOSS_RESULTS: [&str; 4] = ["checkmated", "resigned", "timeout", "abandoned"];

const UNKNOWN_OPENING: &str = "Unknown";

/// Keyword patterns searched in the full PGN, tag section included.
/// Keywords match whole words, so the `TimeControl` tag is not a "time" hit.
pub struct TerminationPatterns {
    pub checkmate: Regex,
    pub resignation: Regex,
    pub time: Regex,
    pub stalemate: Regex,
}

pub fn classify_result(result: &str) -> ResultType {
    if result == "win" {
        ResultType::Win
    } else if LOSS_RESULTS.contains(&result) {
        ResultType::Loss
    } else {
        ResultType::Draw
    }
}

pub fn end_phase(total_moves: u32, settings: &AnalysisSettings) -> GamePhase {
    if total_moves <= settings.opening_phase_end {
        GamePhase::Opening
    } else if total_moves <= settings.middlegame_phase_end {
        GamePhase::Middlegame
    } else {
        GamePhase::Endgame
    }
}

/// Opening name from the last segment of the chess.com opening URL.
pub fn opening_name(eco: Option<&str>) -> String {
    eco.and_then(|url| url.trim_end_matches('/').rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace('-', " "))
        .unwrap_or_else(|| UNKNOWN_OPENING.to_string())
}

pub fn classify_termination(pgn: &str, result: &str, patterns: &TerminationPatterns) -> Termination {
    if patterns.checkmate.is_match(pgn) {
        Termination::Checkmate
    } else if patterns.resignation.is_match(pgn) || result.contains("resigned") {
        Termination::Resignation
    } else if patterns.time.is_match(pgn) || result.contains("timeout") {
        Termination::Time
    } else if patterns.stalemate.is_match(pgn) {
        Termination::Stalemate
    } else if result.contains("draw") {
        Termination::Draw
    } else {
        Termination::Other
    }
}

/// Game end time; a missing or out-of-range timestamp falls back to the epoch.
pub fn game_date(end_time: Option<i64>) -> DateTime<Utc> {
    end_time
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_default()
}
