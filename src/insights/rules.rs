use super::{
    ExpectedGain, InsightGenerator, OutcomeSummary, PlayPatterns, Priority, PriorityArea,
    Projections, RatingRange, TargetImprovement,
};
use crate::domain::PlayerProfile;
use crate::metrics::{Metrics, OutcomeProfile};

const PRIORITY_COUNT: usize = 3;
const STRENGTH_COUNT: usize = 4;

const COLOR_GAP_THRESHOLD: f64 = 15.0;
const TIME_LOSS_THRESHOLD: f64 = 25.0;
const OPENING_LOSS_THRESHOLD: f64 = 50.0;
const TACTICAL_LOSS_THRESHOLD: f64 = 40.0;
const ENDGAME_WIN_THRESHOLD: f64 = 60.0;

const TILT_STREAK: u32 = 5;
const TIME_PRESSURE_HEAVY: f64 = 50.0;

const DEFAULT_STRENGTHS: [&str; 4] = [
    "Consistent play across time controls",
    "Patience in complex positions",
    "Quick pattern recognition",
    "Solid opening knowledge",
];

/// Fixed-threshold insight rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInsights;

impl RuleBasedInsights {
    pub fn new() -> Self {
        Self
    }

    // --- Helper Methods ---

    fn summarize(profile: &OutcomeProfile) -> OutcomeSummary {
        OutcomeSummary {
            most_common_termination: profile.most_common_termination().map(|(t, _)| t),
            avg_game_length: profile.avg_length(),
        }
    }

    fn priority(area: PriorityArea, stat: String, action: &str) -> Priority {
        Priority {
            area,
            stat,
            action: action.to_string(),
        }
    }
}

impl InsightGenerator for RuleBasedInsights {
    fn priorities(&self, metrics: &Metrics, profile: &PlayerProfile) -> Vec<Priority> {
        let mut priorities = Vec::new();

        let white_rate = metrics.color.white.win_rate;
        let black_rate = metrics.color.black.win_rate;
        let gap = white_rate - black_rate;
        if gap >= COLOR_GAP_THRESHOLD {
            priorities.push(Self::priority(
                PriorityArea::BlackRepertoire,
                format!("{:.0}% win rate ({:.0}% below White)", black_rate, gap),
                "Study the French Defense or Caro-Kann for solid Black play",
            ));
        }

        let time_loss_pct = metrics.time.time_loss_pct;
        if time_loss_pct >= TIME_LOSS_THRESHOLD {
            priorities.push(Self::priority(
                PriorityArea::TimeManagement,
                format!("{:.0}% of games lost on time", time_loss_pct),
                "Practice 10+0 time control before returning to bullet",
            ));
        }

        let opening_loss_rate = metrics.phases.opening.loss_rate;
        if opening_loss_rate >= OPENING_LOSS_THRESHOLD {
            priorities.push(Self::priority(
                PriorityArea::OpeningPreparation,
                format!("{:.0}% loss rate in games ending in the opening", opening_loss_rate),
                "Learn 5-10 moves deep in your main openings",
            ));
        }

        let tactical_loss_rate = metrics.tactics.tactical_loss_rate;
        if tactical_loss_rate >= TACTICAL_LOSS_THRESHOLD && priorities.len() < PRIORITY_COUNT {
            priorities.push(Self::priority(
                PriorityArea::TacticalAwareness,
                format!("{:.0}% of losses show a tactical pattern", tactical_loss_rate),
                "Do 15 minutes of tactical puzzles daily",
            ));
        }

        let endgame = &metrics.phases.endgame;
        if endgame.games > 0
            && endgame.win_rate <= ENDGAME_WIN_THRESHOLD
            && priorities.len() < PRIORITY_COUNT
        {
            priorities.push(Self::priority(
                PriorityArea::EndgameTechnique,
                format!("Only {:.0}% of endgames won", endgame.win_rate),
                "Study basic king and pawn endgames",
            ));
        }

        while priorities.len() < PRIORITY_COUNT {
            priorities.push(Self::priority(
                PriorityArea::GeneralImprovement,
                format!("{} current rating (room to grow)", profile.current_rating),
                "Focus on basic principles and avoid blunders",
            ));
        }

        priorities.truncate(PRIORITY_COUNT);
        priorities
    }

    fn strengths(&self, metrics: &Metrics) -> Vec<String> {
        let mut strengths = Vec::new();

        let endgame = &metrics.phases.endgame;
        if endgame.games > 0 && endgame.win_rate > metrics.basic.win_rate + 10.0 {
            strengths.push("Endgame Technique: Well above your overall win rate".to_string());
        }

        if metrics.psychology.games_after_loss > 0 && metrics.psychology.recovery_rate > 60.0 {
            strengths.push("Psychological Resilience: Excellent recovery from losses".to_string());
        }

        if let Some(top) = metrics.tactics.winning_patterns.first() {
            strengths.push(format!("{}: You spot these well!", top.name));
        }

        if metrics.exchanges.games_ahead > 0 && metrics.exchanges.trade_frequency_when_ahead >= 75.0 {
            strengths.push("Trading When Ahead: Excellent simplification instincts".to_string());
        }

        let mut defaults = DEFAULT_STRENGTHS.iter();
        while strengths.len() < STRENGTH_COUNT {
            match defaults.next() {
                Some(default) => strengths.push(default.to_string()),
                None => break,
            }
        }

        strengths.truncate(STRENGTH_COUNT);
        strengths
    }

    fn recommendations(&self, metrics: &Metrics, priorities: &[Priority]) -> Vec<String> {
        let mut recommendations: Vec<String> = priorities.iter().map(|p| p.action.clone()).collect();

        if metrics.psychology.max_loss_streak >= TILT_STREAK {
            recommendations.push("Take breaks after 2 consecutive losses to avoid tilt".to_string());
        }

        if metrics.time.time_pressure_pct > TIME_PRESSURE_HEAVY {
            recommendations.push("Pre-move in obvious positions to save time".to_string());
        }

        recommendations.dedup();
        recommendations
    }

    fn patterns(&self, metrics: &Metrics) -> PlayPatterns {
        PlayPatterns {
            winning: Self::summarize(&metrics.patterns.wins),
            losing: Self::summarize(&metrics.patterns.losses),
        }
    }

    fn projections(&self, metrics: &Metrics, profile: &PlayerProfile) -> Projections {
        let mut improvements = Vec::new();

        let black = &metrics.color.black;
        if black.games > 0 && black.win_rate < 45.0 {
            improvements.push(TargetImprovement {
                area: "Black win rate".to_string(),
                current: black.win_rate,
                target: 45.0,
                gain: ExpectedGain::Percent(3.5),
            });
        }

        let time_loss_pct = metrics.time.time_loss_pct;
        if time_loss_pct > 30.0 {
            improvements.push(TargetImprovement {
                area: "Time losses".to_string(),
                current: time_loss_pct,
                target: 30.0,
                gain: ExpectedGain::Points { min: 30, max: 40 },
            });
        }

        let opening = &metrics.phases.opening;
        if opening.games > 0 && opening.loss_rate > 45.0 {
            improvements.push(TargetImprovement {
                area: "Opening losses".to_string(),
                current: opening.loss_rate,
                target: 45.0,
                gain: ExpectedGain::Points { min: 20, max: 25 },
            });
        }

        let (gain_min, gain_max) = improvements
            .iter()
            .filter_map(|imp| match imp.gain {
                ExpectedGain::Points { min, max } => Some((min, max)),
                ExpectedGain::Percent(_) => None,
            })
            .fold((0, 0), |(lo, hi), (min, max)| (lo + min, hi + max));

        let current = profile.current_rating;
        Projections {
            improvements,
            thirty_day: RatingRange {
                min: current + gain_min / 2,
                max: current + gain_max / 2,
            },
            ninety_day: RatingRange {
                min: current + gain_min,
                max: current + gain_max,
            },
        }
    }
}
