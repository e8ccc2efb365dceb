//! Folds parsed games into the statistics bundle the insights and report read.
//!
//! Every ratio falls back to 0 when its denominator is empty.

pub mod exchanges;
pub mod openings;
pub mod opponents;
pub mod patterns;
pub mod performance;
pub mod phases;
pub mod psychology;
pub mod results;
pub mod stats;
pub mod tactics;
pub mod time;
pub mod trends;

use log::debug;

use crate::config::AnalysisSettings;
use crate::domain::ParsedGame;

pub use exchanges::ExchangeMetrics;
pub use openings::{OpeningMetrics, OpeningStats};
pub use opponents::{OpponentMetrics, RatingBucket};
pub use patterns::{OutcomeProfile, PatternMetrics, QuickLoss};
pub use performance::{PerformanceTrends, SlotPerformance};
pub use phases::{PhaseMetrics, PhaseStats};
pub use psychology::{HourPerformance, PsychologyMetrics, SessionBucket};
pub use results::{BasicStats, ColorPerformance, ColorStats, TimeControlStats};
pub use tactics::{PatternCount, TacticalMetrics};
pub use time::{ClockAverages, TimeMetrics};
pub use trends::{RatingTrends, WeeklyRating};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub basic: BasicStats,
    pub color: ColorPerformance,
    pub time_controls: Vec<TimeControlStats>,
    pub openings: OpeningMetrics,
    pub phases: PhaseMetrics,
    pub time: TimeMetrics,
    pub patterns: PatternMetrics,
    pub rating_trends: RatingTrends,
    pub opponents: OpponentMetrics,
    pub psychology: PsychologyMetrics,
    pub exchanges: ExchangeMetrics,
    pub tactics: TacticalMetrics,
    pub performance: PerformanceTrends,
}

pub fn calculate_all(games: &[ParsedGame], settings: &AnalysisSettings) -> Metrics {
    debug!("Calculating metrics over {} games", games.len());

    let chronological = stats::chronological(games);

    Metrics {
        basic: results::basic_stats(games),
        color: results::color_performance(games),
        time_controls: results::time_control_stats(games),
        openings: openings::calculate(games, settings),
        phases: phases::calculate(games, settings),
        time: time::calculate(games),
        patterns: patterns::calculate(games, settings),
        rating_trends: trends::calculate(&chronological),
        opponents: opponents::calculate(games, &settings.opponent_buckets),
        psychology: psychology::calculate(&chronological, settings),
        exchanges: exchanges::calculate(games, settings),
        tactics: tactics::calculate(&chronological, settings),
        performance: performance::calculate(games),
    }
}
