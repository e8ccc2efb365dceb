//! Text-level heuristics over SAN move tokens.
//!
//! None of this simulates a board. Captured pieces are guessed from the
//! character after `x`, which in SAN is normally a file letter, so most
//! captures are attributed to pawns; tactic flags are loose regular
//! expressions over the joined move list. Treat the output as a rough signal.

use regex::Regex;
use std::collections::BTreeMap;

use crate::domain::{Color, TacticFlags, TradeSummary};

const PIECE_LETTERS: &str = "NBRQK";
const FILE_LETTERS: &str = "abcdefgh";
const PAWN: char = 'P';

/// Patterns used by `detect_tactics`.
pub struct TacticPatterns {
    pub fork: Regex,
    pub discovered: Regex,
    pub back_rank: Regex,
}

/// Count moves per piece letter; quiet pawn moves are counted under 'P'.
pub fn piece_activity(moves: &[String]) -> BTreeMap<char, u32> {
    let mut activity = BTreeMap::new();

    for mv in moves {
        let Some(first) = mv.chars().next() else {
            continue;
        };

        if PIECE_LETTERS.contains(first) {
            *activity.entry(first).or_insert(0) += 1;
        } else if FILE_LETTERS.contains(first) && !mv.contains('x') {
            *activity.entry(PAWN).or_insert(0) += 1;
        }
    }

    activity
}

/// Captures by either side.
pub fn count_captures(moves: &[String]) -> u32 {
    moves.iter().filter(|mv| mv.contains('x')).count() as u32
}

pub fn analyze_trades(moves: &[String], color: Color) -> TradeSummary {
    let mut summary = TradeSummary::default();

    for (idx, mv) in moves.iter().enumerate() {
        if !mv.contains('x') || !color.owns_ply(idx) {
            continue;
        }

        summary.trades_initiated += 1;

        let Some(capturing) = mv.chars().next() else {
            continue;
        };
        if !PIECE_LETTERS.contains(capturing) {
            continue;
        }

        let captured = captured_piece(mv);
        *summary.piece_trades.entry(captured).or_insert(0) += 1;
        if captured == 'Q' {
            summary.queen_trade = true;
        }
    }

    summary
}

/// Guess the captured piece from the text right after `x`, defaulting to a pawn.
fn captured_piece(mv: &str) -> char {
    mv.split_once('x')
        .and_then(|(_, target)| target.chars().next())
        .filter(|c| PIECE_LETTERS.contains(*c))
        .unwrap_or(PAWN)
}

pub fn detect_tactics(moves: &[String], patterns: &TacticPatterns) -> TacticFlags {
    let move_text = moves.join(" ");

    TacticFlags {
        forks: patterns.fork.is_match(&move_text),
        discovered: patterns.discovered.is_match(&move_text),
        back_rank: patterns.back_rank.is_match(&move_text),
    }
}
