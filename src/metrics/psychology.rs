use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::stats::{mean, percentage, Tally};
use crate::config::AnalysisSettings;
use crate::domain::{ParsedGame, ResultType};

const BEST_HOURS_SHOWN: usize = 3;
const MIN_SESSION_GAMES: usize = 3;

/// Session buckets by games played in one day: (label, min, max).
const SESSION_BUCKETS: [(&str, usize, usize); 3] = [
    ("3-5 games", 3, 5),
    ("6-10 games", 6, 10),
    ("11+ games", 11, usize::MAX),
];

#[derive(Debug, Clone, PartialEq)]
pub struct HourPerformance {
    pub hour: u32,
    pub games: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionBucket {
    pub label: String,
    pub sessions: u32,
    pub avg_win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsychologyMetrics {
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    pub games_after_loss: u32,
    pub recovery_rate: f64,
    /// Hours with enough games, best win rate first.
    pub best_hours: Vec<HourPerformance>,
    /// Only buckets that saw at least one session.
    pub sessions: Vec<SessionBucket>,
    pub playing_days: u32,
}

impl PsychologyMetrics {
    pub fn best_hour(&self) -> Option<&HourPerformance> {
        self.best_hours.first()
    }

    pub fn best_session(&self) -> Option<&SessionBucket> {
        self.sessions
            .iter()
            .max_by(|a, b| a.avg_win_rate.total_cmp(&b.avg_win_rate))
    }
}

pub fn calculate(chronological: &[&ParsedGame], settings: &AnalysisSettings) -> PsychologyMetrics {
    let (max_win_streak, max_loss_streak) = streaks(chronological);
    let (games_after_loss, wins_after_loss) = recovery(chronological);
    let by_day = group_by_day(chronological);

    PsychologyMetrics {
        max_win_streak,
        max_loss_streak,
        games_after_loss,
        recovery_rate: percentage(wins_after_loss, games_after_loss),
        best_hours: best_hours(chronological, settings.min_games_for_hour),
        sessions: sessions(&by_day),
        playing_days: by_day.len() as u32,
    }
}

// --- Helper Methods ---

/// Longest runs of consecutive wins and of consecutive losses.
fn streaks(games: &[&ParsedGame]) -> (u32, u32) {
    let mut max_wins = 0;
    let mut max_losses = 0;
    let mut run = 0;
    let mut previous: Option<ResultType> = None;

    for game in games {
        run = if previous == Some(game.result_type) { run + 1 } else { 1 };
        match game.result_type {
            ResultType::Win => max_wins = max_wins.max(run),
            ResultType::Loss => max_losses = max_losses.max(run),
            ResultType::Draw => {}
        }
        previous = Some(game.result_type);
    }

    (max_wins, max_losses)
}

/// Games played right after a loss, and how many of them were won.
fn recovery(games: &[&ParsedGame]) -> (u32, u32) {
    games
        .windows(2)
        .filter(|pair| pair[0].is_loss())
        .fold((0, 0), |(played, won), pair| {
            (played + 1, won + pair[1].is_win() as u32)
        })
}

fn best_hours(games: &[&ParsedGame], min_games: u32) -> Vec<HourPerformance> {
    let mut by_hour: BTreeMap<u32, Tally> = BTreeMap::new();
    for game in games {
        by_hour.entry(game.hour_of_day).or_default().add(game);
    }

    let mut hours: Vec<HourPerformance> = by_hour
        .into_iter()
        .filter(|(_, tally)| tally.games >= min_games)
        .map(|(hour, tally)| HourPerformance {
            hour,
            games: tally.games,
            win_rate: tally.win_rate(),
        })
        .collect();

    hours.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    hours.truncate(BEST_HOURS_SHOWN);
    hours
}

fn group_by_day<'a>(games: &[&'a ParsedGame]) -> BTreeMap<NaiveDate, Vec<&'a ParsedGame>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ParsedGame>> = BTreeMap::new();
    for &game in games {
        by_day.entry(game.date.date_naive()).or_default().push(game);
    }
    by_day
}

fn sessions(by_day: &BTreeMap<NaiveDate, Vec<&ParsedGame>>) -> Vec<SessionBucket> {
    SESSION_BUCKETS
        .iter()
        .filter_map(|&(label, min, max)| {
            let rates: Vec<f64> = by_day
                .values()
                .filter(|day| day.len() >= MIN_SESSION_GAMES && (min..=max).contains(&day.len()))
                .map(|day| Tally::of(day.iter().copied()).win_rate())
                .collect();

            if rates.is_empty() {
                return None;
            }

            Some(SessionBucket {
                label: label.to_string(),
                sessions: rates.len() as u32,
                avg_win_rate: mean(&rates),
            })
        })
        .collect()
}
