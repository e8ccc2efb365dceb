use std::collections::BTreeMap;

use super::stats::{percentage, Tally};
use crate::config::AnalysisSettings;
use crate::domain::{Color, ParsedGame, ResultType};

const SHORTLIST_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct OpeningStats {
    pub name: String,
    pub tally: Tally,
    pub win_rate: f64,
    pub as_white: u32,
    pub as_black: u32,
    pub white_win_rate: f64,
    pub black_win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningMetrics {
    pub unique_openings: usize,
    /// Openings played at least `min_games_for_pattern` times, most played first.
    pub repertoire: Vec<OpeningStats>,
    pub top: Vec<OpeningStats>,
    pub worst: Vec<OpeningStats>,
}

#[derive(Default)]
struct OpeningAccumulator {
    tally: Tally,
    as_white: u32,
    as_black: u32,
    white_wins: u32,
    black_wins: u32,
}

pub fn calculate(games: &[ParsedGame], settings: &AnalysisSettings) -> OpeningMetrics {
    let mut by_opening: BTreeMap<&str, OpeningAccumulator> = BTreeMap::new();

    for game in games {
        let entry = by_opening.entry(game.opening.as_str()).or_default();
        entry.tally.add(game);

        let won = game.result_type == ResultType::Win;
        match game.color {
            Color::White => {
                entry.as_white += 1;
                entry.white_wins += won as u32;
            }
            Color::Black => {
                entry.as_black += 1;
                entry.black_wins += won as u32;
            }
        }
    }

    let unique_openings = by_opening.len();

    let mut repertoire: Vec<OpeningStats> = by_opening
        .into_iter()
        .filter(|(_, acc)| acc.tally.games >= settings.min_games_for_pattern)
        .map(|(name, acc)| OpeningStats {
            name: name.to_string(),
            tally: acc.tally,
            win_rate: acc.tally.win_rate(),
            as_white: acc.as_white,
            as_black: acc.as_black,
            white_win_rate: percentage(acc.white_wins, acc.as_white),
            black_win_rate: percentage(acc.black_wins, acc.as_black),
        })
        .collect();

    repertoire.sort_by(|a, b| {
        b.tally
            .games
            .cmp(&a.tally.games)
            .then_with(|| b.win_rate.total_cmp(&a.win_rate))
    });

    let top = repertoire.iter().take(SHORTLIST_LEN).cloned().collect();

    let mut worst = repertoire.clone();
    worst.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
    worst.truncate(SHORTLIST_LEN);

    OpeningMetrics {
        unique_openings,
        repertoire,
        top,
        worst,
    }
}
