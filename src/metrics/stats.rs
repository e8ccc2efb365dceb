use crate::domain::{ParsedGame, ResultType};

/// `part / whole * 100`, or 0 when there is nothing to divide by.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Oldest-first ordering. Games with equal timestamps keep their input order.
pub fn chronological(games: &[ParsedGame]) -> Vec<&ParsedGame> {
    let mut sorted: Vec<&ParsedGame> = games.iter().collect();
    sorted.sort_by_key(|g| g.date);
    sorted
}

/// Earliest and latest thirds of a chronological slice: the first `n / 3`
/// and the last `ceil(n / 3)` games.
pub fn thirds<T>(items: &[T]) -> (&[T], &[T]) {
    let n = items.len();
    let early = n / 3;
    let recent = n.div_ceil(3);
    (&items[..early], &items[n - recent..])
}

/// Win/loss/draw counts over a group of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    pub fn of<'a>(games: impl IntoIterator<Item = &'a ParsedGame>) -> Self {
        let mut tally = Tally::default();
        for game in games {
            tally.add(game);
        }
        tally
    }

    pub fn add(&mut self, game: &ParsedGame) {
        self.games += 1;
        match game.result_type {
            ResultType::Win => self.wins += 1,
            ResultType::Loss => self.losses += 1,
            ResultType::Draw => self.draws += 1,
        }
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.games)
    }

    pub fn loss_rate(&self) -> f64 {
        percentage(self.losses, self.games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_guards_zero() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_population_std_dev() {
        assert_eq!(population_std_dev(&[5.0]), 0.0);
        assert_eq!(population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(0.06), 0.1);
    }

    #[test]
    fn test_thirds() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        let (early, recent) = thirds(&items);
        assert_eq!(early, &[1, 2]);
        assert_eq!(recent, &[5, 6, 7]);

        let (early, recent) = thirds(&[1]);
        assert!(early.is_empty());
        assert_eq!(recent, &[1]);
    }
}
