use super::stats::{mean, percentage};
use crate::config::AnalysisSettings;
use crate::domain::ParsedGame;

const GOOD_IMBALANCE_RATE: f64 = 60.0;
const BAD_IMBALANCE_RATE: f64 = 40.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImbalanceStats {
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeMetrics {
    pub avg_trades_per_game: f64,
    /// Games against opponents rated more than the gap below the player.
    pub games_ahead: u32,
    /// Games against opponents rated more than the gap above the player.
    pub games_behind: u32,
    pub trade_frequency_when_ahead: f64,
    pub trade_frequency_when_behind: f64,
    pub queen_trades: ImbalanceStats,
    pub good_imbalances: Vec<ImbalanceStats>,
    pub bad_imbalances: Vec<ImbalanceStats>,
}

pub fn calculate(games: &[ParsedGame], settings: &AnalysisSettings) -> ExchangeMetrics {
    let trades: Vec<f64> = games.iter().map(|g| g.trades.trades_initiated as f64).collect();

    let gap = settings.rating_gap_threshold;
    let ahead: Vec<&ParsedGame> = games.iter().filter(|g| g.rating_diff() < -gap).collect();
    let behind: Vec<&ParsedGame> = games.iter().filter(|g| g.rating_diff() > gap).collect();

    let queen_trades = imbalance("Queen Trades", games.iter().filter(|g| g.trades.queen_trade));

    let mut good_imbalances = Vec::new();
    let mut bad_imbalances = Vec::new();
    if queen_trades.games >= settings.min_games_for_pattern {
        if queen_trades.win_rate >= GOOD_IMBALANCE_RATE {
            good_imbalances.push(queen_trades.clone());
        } else if queen_trades.win_rate <= BAD_IMBALANCE_RATE {
            bad_imbalances.push(queen_trades.clone());
        }
    }

    ExchangeMetrics {
        avg_trades_per_game: mean(&trades),
        games_ahead: ahead.len() as u32,
        games_behind: behind.len() as u32,
        trade_frequency_when_ahead: trading_share(&ahead),
        trade_frequency_when_behind: trading_share(&behind),
        queen_trades,
        good_imbalances,
        bad_imbalances,
    }
}

/// Share of games in which the player initiated at least one trade.
fn trading_share(games: &[&ParsedGame]) -> f64 {
    let traded = games.iter().filter(|g| g.trades.trades_initiated > 0).count() as u32;
    percentage(traded, games.len() as u32)
}

fn imbalance<'a>(name: &str, games: impl Iterator<Item = &'a ParsedGame>) -> ImbalanceStats {
    let (count, wins) = games.fold((0, 0), |(count, wins), g| (count + 1, wins + g.is_win() as u32));

    ImbalanceStats {
        name: name.to_string(),
        games: count,
        wins,
        win_rate: percentage(wins, count),
    }
}
