use chrono::Duration;

use super::stats::{percentage, population_std_dev, round1, thirds, Tally};
use crate::domain::ParsedGame;

const MAX_WEEKS: u32 = 4;
const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRating {
    pub week: u32,
    pub start_rating: i32,
    pub end_rating: i32,
    pub change: i32,
    pub games: u32,
    pub win_rate: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTrends {
    pub weeks: Vec<WeeklyRating>,
    pub overall_change: i32,
    pub start_std_dev: f64,
    pub end_std_dev: f64,
    pub consistency_improving: bool,
}

/// Rating movement over `chronological` games (oldest first).
///
/// Weeks are consecutive seven-day windows starting on the calendar day of the
/// first game; windows without games are left out.
pub fn calculate(chronological: &[&ParsedGame]) -> RatingTrends {
    let (Some(first), Some(last)) = (chronological.first(), chronological.last()) else {
        return RatingTrends::default();
    };

    let start_day = first.date.date_naive();
    let end_day = last.date.date_naive();

    let mut weeks = Vec::new();
    let mut week_start = start_day;
    let mut week = 1;

    while week_start <= end_day && week <= MAX_WEEKS {
        let week_end = week_start + Duration::days(WEEK_DAYS - 1);
        let in_week: Vec<&ParsedGame> = chronological
            .iter()
            .copied()
            .filter(|g| (week_start..=week_end).contains(&g.date.date_naive()))
            .collect();

        if let Some(weekly) = weekly_rating(week, &in_week) {
            weeks.push(weekly);
        }

        week += 1;
        week_start = week_end + Duration::days(1);
    }

    let (early, recent) = thirds(chronological);
    let start_std_dev = rating_spread(early);
    let end_std_dev = rating_spread(recent);

    RatingTrends {
        weeks,
        overall_change: last.player_rating - first.player_rating,
        start_std_dev: round1(start_std_dev),
        end_std_dev: round1(end_std_dev),
        consistency_improving: end_std_dev < start_std_dev,
    }
}

fn weekly_rating(week: u32, games: &[&ParsedGame]) -> Option<WeeklyRating> {
    let first = games.first()?;
    let last = games.last()?;
    let tally = Tally::of(games.iter().copied());

    Some(WeeklyRating {
        week,
        start_rating: first.player_rating,
        end_rating: last.player_rating,
        change: last.player_rating - first.player_rating,
        games: tally.games,
        win_rate: percentage(tally.wins, tally.games),
        std_dev: rating_spread(games),
    })
}

fn rating_spread(games: &[&ParsedGame]) -> f64 {
    let ratings: Vec<f64> = games.iter().map(|g| g.player_rating as f64).collect();
    population_std_dev(&ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{utc, GameBuilder};
    use crate::metrics::stats::chronological;

    #[test]
    fn test_weekly_windows_from_first_game() {
        let games = vec![
            GameBuilder::new(1).at(utc(2024, 3, 1, 10)).ratings(800, 800).win().build(),
            GameBuilder::new(2).at(utc(2024, 3, 7, 22)).ratings(820, 800).loss().build(),
            GameBuilder::new(3).at(utc(2024, 3, 8, 9)).ratings(810, 800).win().build(),
            // Week 3 is empty
            GameBuilder::new(4).at(utc(2024, 3, 25, 9)).ratings(850, 800).win().build(),
            // Beyond four weeks
            GameBuilder::new(5).at(utc(2024, 4, 2, 9)).ratings(870, 800).win().build(),
        ];

        let trends = calculate(&chronological(&games));

        let weeks: Vec<u32> = trends.weeks.iter().map(|w| w.week).collect();
        assert_eq!(weeks, vec![1, 2, 4]);

        let first = &trends.weeks[0];
        assert_eq!((first.start_rating, first.end_rating, first.change), (800, 820, 20));
        assert_eq!(first.games, 2);
        assert_eq!(first.win_rate, 50.0);
        assert_eq!(first.std_dev, 10.0);

        assert_eq!(trends.overall_change, 70);
    }

    #[test]
    fn test_consistency_compares_thirds() {
        let ratings = [700, 800, 900, 750, 800, 805, 800];
        let games: Vec<ParsedGame> = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| GameBuilder::new(i as u32).ratings(r, 800).build())
            .collect();

        let trends = calculate(&chronological(&games));

        // Early: 700, 800. Recent: 800, 805, 800
        assert_eq!(trends.start_std_dev, 50.0);
        assert_eq!(trends.end_std_dev, 2.4);
        assert!(trends.consistency_improving);
    }

    #[test]
    fn test_no_games() {
        assert_eq!(calculate(&[]), RatingTrends::default());
    }
}
