//! Turns raw chess.com game records into `ParsedGame` fact sheets.

mod batch;
mod classify;
mod clock;
mod heuristics;
mod movetext;

pub use batch::{parse_batch, ParsedBatch, SkippedRecord};

use anyhow::{Context, Result};
use chrono::{Datelike, Timelike};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AnalysisSettings;
use crate::domain::{Color, ParsedGame, RawGameRecord, RawSide, TimeOfDay};
use crate::errors::ParseError;

use classify::TerminationPatterns;
use heuristics::TacticPatterns;

/// Regular expressions used while parsing, compiled once per parser.
struct PgnPatterns {
    move_number: Regex,
    clock: Regex,
    termination: TerminationPatterns,
    tactics: TacticPatterns,
}

/// The subject's view of one side of the board.
struct Perspective<'a> {
    color: Color,
    result: &'a str,
    opponent: &'a str,
    player_rating: i32,
    opponent_rating: i32,
}

/// Stateless game parser. Parsing the same record twice yields equal games.
pub struct GameParser {
    settings: AnalysisSettings,
    patterns: PgnPatterns,
}

impl GameParser {
    pub fn new(settings: AnalysisSettings) -> Result<Self> {
        let patterns = Self::compile_patterns()?;
        Ok(Self { settings, patterns })
    }

    /// Parse one raw record from `username`'s point of view.
    pub fn parse(&self, raw: &Value, username: &str) -> Result<ParsedGame, ParseError> {
        let record = RawGameRecord::deserialize(raw)
            .map_err(|e| ParseError::MalformedGame(e.to_string()))?;

        let url = record.url.as_deref().ok_or_else(|| ParseError::missing("url"))?;
        let pgn = record.pgn.as_deref().ok_or_else(|| ParseError::missing("pgn"))?;
        let white = record.white.as_ref().ok_or_else(|| ParseError::missing("white"))?;
        let black = record.black.as_ref().ok_or_else(|| ParseError::missing("black"))?;

        let side = Self::perspective(white, black, username)?;

        let moves = movetext::extract_moves(
            &movetext::strip_annotations(pgn),
            &self.patterns.move_number,
        );
        let total_moves = (moves.len() / 2) as u32;

        let opening_moves = moves
            .iter()
            .take(self.settings.opening_moves_shown)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let date = classify::game_date(record.end_time);
        let hour_of_day = date.hour();

        let time_data = clock::extract_clock_times(pgn, &self.patterns.clock);
        let clock = clock::build_clock_data(time_data, side.color, &self.settings);

        Ok(ParsedGame {
            url: url.to_string(),
            time_control: record.time_class.clone().unwrap_or_else(|| "unknown".to_string()),
            rated: record.rated.unwrap_or(false),
            date,

            color: side.color,
            result: side.result.to_string(),
            result_type: classify::classify_result(side.result),
            opponent: side.opponent.to_string(),
            player_rating: side.player_rating,
            opponent_rating: side.opponent_rating,

            total_moves,
            end_phase: classify::end_phase(total_moves, &self.settings),
            opening: classify::opening_name(record.eco.as_deref()),
            opening_moves,
            termination: classify::classify_termination(
                pgn,
                side.result,
                &self.patterns.termination,
            ),

            day_of_week: date.weekday(),
            hour_of_day,
            time_of_day: TimeOfDay::from_hour(hour_of_day),

            clock,

            piece_activity: heuristics::piece_activity(&moves),
            captures_made: heuristics::count_captures(&moves),
            trades: heuristics::analyze_trades(&moves, side.color),
            tactics: heuristics::detect_tactics(&moves, &self.patterns.tactics),

            moves,
        })
    }

    // --- Helper Methods ---

    fn perspective<'a>(
        white: &'a RawSide,
        black: &'a RawSide,
        username: &str,
    ) -> Result<Perspective<'a>, ParseError> {
        let white_name = Self::required(&white.username, "white.username")?;
        let black_name = Self::required(&black.username, "black.username")?;
        let white_result = Self::required(&white.result, "white.result")?;
        let black_result = Self::required(&black.result, "black.result")?;
        let white_rating = white.rating.ok_or_else(|| ParseError::missing("white.rating"))?;
        let black_rating = black.rating.ok_or_else(|| ParseError::missing("black.rating"))?;

        if white_name.eq_ignore_ascii_case(username) {
            Ok(Perspective {
                color: Color::White,
                result: white_result,
                opponent: black_name,
                player_rating: white_rating,
                opponent_rating: black_rating,
            })
        } else if black_name.eq_ignore_ascii_case(username) {
            Ok(Perspective {
                color: Color::Black,
                result: black_result,
                opponent: white_name,
                player_rating: black_rating,
                opponent_rating: white_rating,
            })
        } else {
            Err(ParseError::UnknownPlayer(username.to_string()))
        }
    }

    fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ParseError> {
        value.as_deref().ok_or_else(|| ParseError::missing(field))
    }

    // --- Construction Helpers ---

    fn compile_patterns() -> Result<PgnPatterns> {
        Ok(PgnPatterns {
            move_number: Self::compile(r"^\d+\.+", "move number")?,
            clock: Self::compile(r"\[%clk\s+(\d+):(\d+):(\d+(?:\.\d+)?)\]", "clock annotation")?,
            termination: TerminationPatterns {
                checkmate: Self::compile(r"(?i)\bcheckmate\b", "checkmate keyword")?,
                resignation: Self::compile(r"(?i)\bresignation\b", "resignation keyword")?,
                time: Self::compile(r"(?i)\btime\b", "time keyword")?,
                stalemate: Self::compile(r"(?i)\bstalemate\b", "stalemate keyword")?,
            },
            tactics: TacticPatterns {
                fork: Self::compile(r"\+.*x|x.*\+", "fork pattern")?,
                discovered: Self::compile(r"[NBRQ][a-h]\d.*\+", "discovered attack pattern")?,
                back_rank: Self::compile(r"[RQ].*[18]\+", "back rank pattern")?,
            },
        })
    }

    fn compile(pattern: &str, name: &str) -> Result<Regex> {
        Regex::new(pattern).with_context(|| format!("Failed to compile {} regex", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GamePhase, ResultType, Termination};
    use serde_json::json;

    fn parser() -> GameParser {
        GameParser::new(AnalysisSettings::default()).unwrap()
    }

    fn record(pgn: &str) -> Value {
        json!({
            "url": "https://www.chess.com/game/live/42",
            "pgn": pgn,
            "end_time": 1_705_330_800, // 2024-01-15 15:00:00 UTC, a Monday
            "rated": true,
            "time_class": "rapid",
            "eco": "https://www.chess.com/openings/Italian-Game",
            "white": {"username": "Alice", "rating": 812, "result": "win"},
            "black": {"username": "bob", "rating": 790, "result": "checkmated"}
        })
    }

    /// Movetext with `full_moves` complete move pairs.
    fn movetext(full_moves: usize) -> String {
        (1..=full_moves)
            .map(|n| format!("{}. Nf3 Nf6", n))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_white_subject() {
        let game = parser().parse(&record("1. e4 e5 2. Qh5 Nc6"), "alice").unwrap();

        assert_eq!(game.color, Color::White);
        assert_eq!(game.player_rating, 812);
        assert_eq!(game.opponent_rating, 790);
        assert_eq!(game.opponent, "bob");
        assert_eq!(game.result_type, ResultType::Win);
        assert_eq!(game.opening, "Italian Game");
        assert_eq!(game.time_control, "rapid");
        assert_eq!(game.hour_of_day, 15);
        assert_eq!(game.day_of_week, chrono::Weekday::Mon);
        assert_eq!(game.time_of_day, TimeOfDay::Afternoon);
    }

    #[test]
    fn test_black_subject() {
        let game = parser().parse(&record("1. e4 e5"), "BOB").unwrap();

        assert_eq!(game.color, Color::Black);
        assert_eq!(game.player_rating, 790);
        assert_eq!(game.opponent, "Alice");
        assert_eq!(game.result, "checkmated");
        assert_eq!(game.result_type, ResultType::Loss);
    }

    #[test]
    fn test_unknown_player() {
        let err = parser().parse(&record("1. e4 e5"), "carol").unwrap_err();
        assert_eq!(err, ParseError::UnknownPlayer("carol".to_string()));
    }

    #[test]
    fn test_missing_pgn_is_malformed() {
        let mut raw = record("1. e4");
        raw.as_object_mut().unwrap().remove("pgn");

        let err = parser().parse(&raw, "alice").unwrap_err();
        assert_eq!(err, ParseError::missing("pgn"));
    }

    #[test]
    fn test_missing_side_rating_is_malformed() {
        let mut raw = record("1. e4");
        raw["black"].as_object_mut().unwrap().remove("rating");

        let err = parser().parse(&raw, "alice").unwrap_err();
        assert_eq!(err, ParseError::missing("black.rating"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = parser().parse(&json!("not a game"), "alice").unwrap_err();
        assert!(matches!(err, ParseError::MalformedGame(_)));
    }

    #[test]
    fn test_optional_fields_have_defaults() {
        let mut raw = record("1. e4");
        let obj = raw.as_object_mut().unwrap();
        obj.remove("time_class");
        obj.remove("rated");
        obj.remove("end_time");
        obj.remove("eco");

        let game = parser().parse(&raw, "alice").unwrap();
        assert_eq!(game.time_control, "unknown");
        assert!(!game.rated);
        assert_eq!(game.date.timestamp(), 0);
        assert_eq!(game.opening, "Unknown");
    }

    #[test]
    fn test_annotated_moves() {
        let game = parser()
            .parse(&record("1. e4 {good move} e5 2. Nf3 Nc6"), "alice")
            .unwrap();

        assert_eq!(game.moves, ["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(game.total_moves, 2);
        assert_eq!(game.opening_moves, "e4 e5 Nf3 Nc6");
    }

    #[test]
    fn test_four_ply_clock_game() {
        let pgn = "1. e4 {[%clk 0:05:00]} 1... e5 {[%clk 0:05:00]} \
                   2. Nf3 {[%clk 0:04:55]} 2... Nc6 {[%clk 0:04:50]}";
        let game = parser().parse(&record(pgn), "alice").unwrap();

        let clock = game.clock.as_ref().unwrap();
        assert_eq!(clock.time_data.len(), 4);
        assert_eq!(clock.final_time, clock.time_data[2]);
        assert_eq!(game.final_time(), Some(295.0));
        assert_eq!(game.moves.len(), 4);
    }

    #[test]
    fn test_no_clock_annotations() {
        let game = parser().parse(&record("1. e4 e5"), "alice").unwrap();
        assert!(game.clock.is_none());
    }

    #[test]
    fn test_end_phase_by_length() {
        let p = parser();
        let phase = |n| p.parse(&record(&movetext(n)), "alice").unwrap().end_phase;

        assert_eq!(phase(10), GamePhase::Opening);
        assert_eq!(phase(20), GamePhase::Middlegame);
        assert_eq!(phase(40), GamePhase::Endgame);
    }

    #[test]
    fn test_opening_moves_are_capped() {
        let game = parser().parse(&record(&movetext(8)), "alice").unwrap();
        assert_eq!(game.opening_moves.split(' ').count(), 10);
    }

    #[test]
    fn test_termination_from_header() {
        let pgn = "[Event \"Live Chess\"]\n[TimeControl \"600\"]\n\
                   [Termination \"Alice won by checkmate\"]\n\n1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0";
        let game = parser().parse(&record(pgn), "alice").unwrap();

        assert_eq!(game.termination, Termination::Checkmate);
        assert_eq!(game.moves.len(), 7);
        assert_eq!(game.total_moves, 3);
        assert!(!game.tactics.back_rank);
    }

    #[test]
    fn test_agreed_draw_has_other_termination() {
        let mut raw = record("[Termination \"Game drawn by agreement\"]\n\n1. e4 e5 1/2-1/2");
        raw["white"]["result"] = json!("agreed");
        raw["black"]["result"] = json!("agreed");

        let game = parser().parse(&raw, "alice").unwrap();

        assert_eq!(game.result, "agreed");
        assert_eq!(game.result_type, ResultType::Draw);
        assert_eq!(game.termination, Termination::Other);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let p = parser();
        let raw = record("1. e4 {[%clk 0:05:00]} 1... e5 {[%clk 0:04:59]} 2. Qxe5+ {[%clk 0:04:40]}");

        assert_eq!(p.parse(&raw, "alice").unwrap(), p.parse(&raw, "alice").unwrap());
    }
}
