use chrono::Weekday;

use super::stats::Tally;
use crate::domain::{ParsedGame, TimeOfDay};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq)]
pub struct SlotPerformance<K> {
    pub slot: K,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Win rates by calendar slot. Slots without games are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceTrends {
    pub by_weekday: Vec<SlotPerformance<Weekday>>,
    pub by_time_of_day: Vec<SlotPerformance<TimeOfDay>>,
}

pub fn calculate(games: &[ParsedGame]) -> PerformanceTrends {
    PerformanceTrends {
        by_weekday: slots(games, &WEEK, |g| g.day_of_week),
        by_time_of_day: slots(games, &TimeOfDay::ALL, |g| g.time_of_day),
    }
}

fn slots<K: Copy + PartialEq>(
    games: &[ParsedGame],
    order: &[K],
    key: impl Fn(&ParsedGame) -> K,
) -> Vec<SlotPerformance<K>> {
    order
        .iter()
        .filter_map(|&slot| {
            let tally = Tally::of(games.iter().filter(|g| key(g) == slot));
            (tally.games > 0).then(|| SlotPerformance {
                slot,
                games: tally.games,
                wins: tally.wins,
                win_rate: tally.win_rate(),
            })
        })
        .collect()
}
