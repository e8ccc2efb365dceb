use super::stats::{percentage, thirds};
use crate::config::AnalysisSettings;
use crate::domain::{ParsedGame, ResultType, Termination};

/// Losses shorter than this many moves count as blunders.
const BLUNDER_MOVES: u32 = 30;
const MIN_PATTERN_COUNT: u32 = 2;
/// Plies at the end of a resigned game checked for captures.
const HANGING_PIECE_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCount {
    pub name: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TacticalMetrics {
    pub winning_patterns: Vec<PatternCount>,
    pub losing_patterns: Vec<PatternCount>,
    /// Blunders per game (not a percentage).
    pub blunder_rate: f64,
    pub early_blunder_rate: f64,
    pub recent_blunder_rate: f64,
    /// Percentage of losses showing at least one losing pattern.
    pub tactical_loss_rate: f64,
}

pub fn calculate(chronological: &[&ParsedGame], settings: &AnalysisSettings) -> TacticalMetrics {
    let mut winning = [
        PatternCount { name: "Back Rank Mates", count: 0 },
        PatternCount { name: "Fork Tactics", count: 0 },
        PatternCount { name: "Discovered Attacks", count: 0 },
    ];
    let mut losing = [
        PatternCount { name: "Hanging Pieces", count: 0 },
        PatternCount { name: "Time Pressure Blunders", count: 0 },
        PatternCount { name: "Missed Defensive Tactics", count: 0 },
    ];
    let mut losses = 0;
    let mut tactical_losses = 0;

    for game in chronological {
        match game.result_type {
            ResultType::Win => {
                let flags = [game.tactics.back_rank, game.tactics.forks, game.tactics.discovered];
                tally_flags(&mut winning, flags);
            }
            ResultType::Loss => {
                losses += 1;
                let flags = losing_flags(game, settings);
                if flags.iter().any(|&f| f) {
                    tactical_losses += 1;
                }
                tally_flags(&mut losing, flags);
            }
            ResultType::Draw => {}
        }
    }

    let (early, recent) = thirds(chronological);

    TacticalMetrics {
        winning_patterns: recurring(winning),
        losing_patterns: recurring(losing),
        blunder_rate: blunder_rate(chronological),
        early_blunder_rate: blunder_rate(early),
        recent_blunder_rate: blunder_rate(recent),
        tactical_loss_rate: percentage(tactical_losses, losses),
    }
}

// --- Helper Methods ---

/// Hanging pieces, time pressure blunders, missed defensive tactics.
fn losing_flags(game: &ParsedGame, settings: &AnalysisSettings) -> [bool; 3] {
    let tail_start = game.moves.len().saturating_sub(HANGING_PIECE_WINDOW);
    let hanging = game.termination == Termination::Resignation
        && game.moves[tail_start..].iter().any(|m| m.contains('x'));

    let time_pressure = game.termination == Termination::Time
        || game
            .final_time()
            .is_some_and(|t| t < settings.time_pressure_seconds);

    let missed_defence = game.termination == Termination::Checkmate;

    [hanging, time_pressure, missed_defence]
}

fn tally_flags(patterns: &mut [PatternCount; 3], flags: [bool; 3]) {
    for (pattern, flag) in patterns.iter_mut().zip(flags) {
        pattern.count += flag as u32;
    }
}

/// Patterns seen at least twice, most frequent first.
fn recurring(patterns: [PatternCount; 3]) -> Vec<PatternCount> {
    let mut seen: Vec<PatternCount> = patterns
        .into_iter()
        .filter(|p| p.count >= MIN_PATTERN_COUNT)
        .collect();
    seen.sort_by(|a, b| b.count.cmp(&a.count));
    seen
}

fn blunder_rate(games: &[&ParsedGame]) -> f64 {
    if games.is_empty() {
        return 0.0;
    }
    let blunders = games
        .iter()
        .filter(|g| g.is_loss() && g.total_moves < BLUNDER_MOVES)
        .count();
    blunders as f64 / games.len() as f64
}
