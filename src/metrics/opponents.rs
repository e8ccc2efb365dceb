use super::stats::{mean, percentage};
use crate::domain::{ParsedGame, ResultType};

#[derive(Debug, Clone, PartialEq)]
pub struct RatingBucket {
    pub label: String,
    /// Inclusive lower bound; `None` for the open-ended lowest bucket.
    pub min: Option<i32>,
    /// Exclusive upper bound; `None` for the open-ended highest bucket.
    pub max: Option<i32>,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

impl RatingBucket {
    fn new(min: Option<i32>, max: Option<i32>) -> Self {
        let label = match (min, max) {
            (None, Some(hi)) => format!("<{}", hi),
            (Some(lo), Some(hi)) => format!("{}-{}", lo, hi),
            (Some(lo), None) => format!("{}+", lo),
            (None, None) => "All".to_string(),
        };

        Self {
            label,
            min,
            max,
            games: 0,
            wins: 0,
            win_rate: 0.0,
        }
    }

    fn contains(&self, rating: i32) -> bool {
        self.min.is_none_or(|lo| rating >= lo) && self.max.is_none_or(|hi| rating < hi)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentMetrics {
    pub buckets: Vec<RatingBucket>,
    pub avg_opponent_in_wins: f64,
    pub avg_opponent_in_losses: f64,
}

/// Win rates by opponent rating, split at the ascending `boundaries`.
pub fn calculate(games: &[ParsedGame], boundaries: &[i32]) -> OpponentMetrics {
    let mut buckets = build_buckets(boundaries);

    for game in games {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.contains(game.opponent_rating)) {
            bucket.games += 1;
            bucket.wins += game.is_win() as u32;
        }
    }

    for bucket in &mut buckets {
        bucket.win_rate = percentage(bucket.wins, bucket.games);
    }

    OpponentMetrics {
        buckets,
        avg_opponent_in_wins: avg_opponent(games, ResultType::Win),
        avg_opponent_in_losses: avg_opponent(games, ResultType::Loss),
    }
}

fn build_buckets(boundaries: &[i32]) -> Vec<RatingBucket> {
    let mut sorted = boundaries.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut bounds: Vec<Option<i32>> = vec![None];
    bounds.extend(sorted.into_iter().map(Some));
    bounds.push(None);

    bounds
        .windows(2)
        .map(|pair| RatingBucket::new(pair[0], pair[1]))
        .collect()
}

fn avg_opponent(games: &[ParsedGame], result_type: ResultType) -> f64 {
    let ratings: Vec<f64> = games
        .iter()
        .filter(|g| g.result_type == result_type)
        .map(|g| g.opponent_rating as f64)
        .collect();
    mean(&ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::GameBuilder;

    #[test]
    fn test_default_buckets() {
        let labels: Vec<String> = build_buckets(&[600, 700, 800])
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(labels, ["<600", "600-700", "700-800", "800+"]);
        assert_eq!(build_buckets(&[])[0].label, "All");
    }

    #[test]
    fn test_games_land_in_half_open_buckets() {
        let games = vec![
            GameBuilder::new(1).ratings(800, 599).draw().build(),
            GameBuilder::new(2).ratings(800, 600).loss().build(),
            GameBuilder::new(3).ratings(800, 700).win().build(),
            GameBuilder::new(4).ratings(800, 800).win().build(),
            GameBuilder::new(5).ratings(800, 1200).loss().build(),
        ];

        let opponents = calculate(&games, &[600, 700, 800]);
        let counts: Vec<u32> = opponents.buckets.iter().map(|b| b.games).collect();

        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(opponents.buckets[3].win_rate, 50.0);
        assert_eq!(opponents.avg_opponent_in_wins, 750.0);
        assert_eq!(opponents.avg_opponent_in_losses, 900.0);
    }
}
