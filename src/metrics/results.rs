use std::collections::BTreeMap;

use super::stats::{mean, percentage, Tally};
use crate::domain::{Color, ParsedGame, ResultType, Termination};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicStats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
    pub avg_player_rating: f64,
    pub avg_opponent_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub avg_moves: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPerformance {
    pub white: ColorStats,
    pub black: ColorStats,
}

impl ColorPerformance {
    pub fn get(&self, color: Color) -> &ColorStats {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeControlStats {
    pub time_class: String,
    pub tally: Tally,
    pub avg_moves: f64,
    pub avg_opponent_rating: f64,
    pub win_rate: f64,
    pub checkmate_pct: f64,
    pub resignation_pct: f64,
    pub time_loss_pct: f64,
}

pub fn basic_stats(games: &[ParsedGame]) -> BasicStats {
    let tally = Tally::of(games);

    BasicStats {
        total_games: tally.games,
        wins: tally.wins,
        losses: tally.losses,
        draws: tally.draws,
        win_rate: tally.win_rate(),
        avg_player_rating: mean(&ratings(games, |g| g.player_rating)),
        avg_opponent_rating: mean(&ratings(games, |g| g.opponent_rating)),
    }
}

pub fn color_performance(games: &[ParsedGame]) -> ColorPerformance {
    ColorPerformance {
        white: color_stats(games, Color::White),
        black: color_stats(games, Color::Black),
    }
}

/// One entry per time class, most played first.
pub fn time_control_stats(games: &[ParsedGame]) -> Vec<TimeControlStats> {
    let mut groups: BTreeMap<&str, Vec<&ParsedGame>> = BTreeMap::new();
    for game in games {
        groups.entry(game.time_control.as_str()).or_default().push(game);
    }

    let mut stats: Vec<TimeControlStats> = groups
        .into_iter()
        .map(|(time_class, group)| summarize_time_control(time_class, &group))
        .collect();

    stats.sort_by(|a, b| b.tally.games.cmp(&a.tally.games));
    stats
}

// --- Helper Methods ---

fn color_stats(games: &[ParsedGame], color: Color) -> ColorStats {
    let subset: Vec<&ParsedGame> = games.iter().filter(|g| g.color == color).collect();
    let tally = Tally::of(subset.iter().copied());
    let moves: Vec<f64> = subset.iter().map(|g| g.total_moves as f64).collect();

    ColorStats {
        games: tally.games,
        wins: tally.wins,
        losses: tally.losses,
        win_rate: tally.win_rate(),
        avg_moves: mean(&moves),
    }
}

fn summarize_time_control(time_class: &str, group: &[&ParsedGame]) -> TimeControlStats {
    let tally = Tally::of(group.iter().copied());
    let ended_by = |termination: Termination| {
        group.iter().filter(|g| g.termination == termination).count() as u32
    };

    let checkmates = ended_by(Termination::Checkmate);
    let resignations = ended_by(Termination::Resignation);
    let time_losses = group
        .iter()
        .filter(|g| g.result_type == ResultType::Loss && g.termination == Termination::Time)
        .count() as u32;

    let moves: Vec<f64> = group.iter().map(|g| g.total_moves as f64).collect();
    let opponents: Vec<f64> = group.iter().map(|g| g.opponent_rating as f64).collect();

    TimeControlStats {
        time_class: time_class.to_string(),
        tally,
        avg_moves: mean(&moves),
        avg_opponent_rating: mean(&opponents),
        win_rate: tally.win_rate(),
        checkmate_pct: percentage(checkmates, tally.games),
        resignation_pct: percentage(resignations, tally.games),
        time_loss_pct: percentage(time_losses, tally.games),
    }
}

fn ratings(games: &[ParsedGame], rating: impl Fn(&ParsedGame) -> i32) -> Vec<f64> {
    games.iter().map(|g| rating(g) as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::GameBuilder;

    #[test]
    fn test_basic_stats_counts_and_averages() {
        let games = vec![
            GameBuilder::new(1).win().ratings(800, 700).build(),
            GameBuilder::new(2).loss().ratings(810, 900).build(),
            GameBuilder::new(3).draw().ratings(820, 800).build(),
            GameBuilder::new(4).win().ratings(830, 600).build(),
        ];

        let stats = basic_stats(&games);
        assert_eq!(stats.total_games, 4);
        assert_eq!((stats.wins, stats.losses, stats.draws), (2, 1, 1));
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.avg_player_rating, 815.0);
        assert_eq!(stats.avg_opponent_rating, 750.0);
    }

    #[test]
    fn test_basic_stats_empty() {
        let stats = basic_stats(&[]);
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_player_rating, 0.0);
    }

    #[test]
    fn test_color_performance_splits_by_side() {
        let games = vec![
            GameBuilder::new(1).win().total_moves(20).build(),
            GameBuilder::new(2).loss().total_moves(40).build(),
            GameBuilder::new(3).black().win().total_moves(30).build(),
        ];

        let colors = color_performance(&games);
        assert_eq!(colors.white.games, 2);
        assert_eq!(colors.white.win_rate, 50.0);
        assert_eq!(colors.white.avg_moves, 30.0);
        assert_eq!(colors.get(Color::Black).win_rate, 100.0);
    }

    #[test]
    fn test_time_controls_sorted_by_volume() {
        let games = vec![
            GameBuilder::new(1).time_control("blitz").loss().termination(Termination::Time).build(),
            GameBuilder::new(2).time_control("blitz").win().termination(Termination::Time).build(),
            GameBuilder::new(3).time_control("blitz").win().termination(Termination::Checkmate).build(),
            GameBuilder::new(4).time_control("rapid").win().build(),
        ];

        let stats = time_control_stats(&games);
        assert_eq!(stats[0].time_class, "blitz");
        assert_eq!(stats[0].tally.games, 3);
        assert_eq!(stats[0].checkmate_pct, percentage(1, 3));
        // Only the loss on time counts as a time loss
        assert_eq!(stats[0].time_loss_pct, percentage(1, 3));
        assert_eq!(stats[1].time_class, "rapid");
    }
}
