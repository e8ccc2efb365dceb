use super::stats::{percentage, Tally};
use crate::config::AnalysisSettings;
use crate::domain::{GamePhase, ParsedGame};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub loss_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseMetrics {
    pub opening: PhaseStats,
    pub middlegame: PhaseStats,
    pub endgame: PhaseStats,
    pub reached_middlegame: u32,
    pub reached_endgame: u32,
    pub middlegame_reach_rate: f64,
    pub endgame_reach_rate: f64,
}

impl PhaseMetrics {
    /// Stats of games that ended in `phase`.
    pub fn ended_in(&self, phase: GamePhase) -> &PhaseStats {
        match phase {
            GamePhase::Opening => &self.opening,
            GamePhase::Middlegame => &self.middlegame,
            GamePhase::Endgame => &self.endgame,
        }
    }
}

pub fn calculate(games: &[ParsedGame], settings: &AnalysisSettings) -> PhaseMetrics {
    let total = games.len() as u32;
    let reached_middlegame = count(games, |g| g.total_moves > settings.opening_phase_end);
    let reached_endgame = count(games, |g| g.total_moves > settings.middlegame_phase_end);

    PhaseMetrics {
        opening: phase_stats(games, GamePhase::Opening),
        middlegame: phase_stats(games, GamePhase::Middlegame),
        endgame: phase_stats(games, GamePhase::Endgame),
        reached_middlegame,
        reached_endgame,
        middlegame_reach_rate: percentage(reached_middlegame, total),
        endgame_reach_rate: percentage(reached_endgame, total),
    }
}

fn phase_stats(games: &[ParsedGame], phase: GamePhase) -> PhaseStats {
    let tally = Tally::of(games.iter().filter(|g| g.end_phase == phase));

    PhaseStats {
        games: tally.games,
        wins: tally.wins,
        losses: tally.losses,
        win_rate: tally.win_rate(),
        loss_rate: tally.loss_rate(),
    }
}

fn count(games: &[ParsedGame], pred: impl Fn(&ParsedGame) -> bool) -> u32 {
    games.iter().filter(|g| pred(g)).count() as u32
}
