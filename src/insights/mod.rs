//! Turns metrics into advice.
//!
//! `InsightGenerator` is the seam for alternative strategies; the shipped one
//! is the threshold-driven `RuleBasedInsights`.

mod rules;

pub use rules::RuleBasedInsights;

use crate::domain::{PlayerProfile, Termination};
use crate::metrics::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArea {
    BlackRepertoire,
    TimeManagement,
    OpeningPreparation,
    TacticalAwareness,
    EndgameTechnique,
    GeneralImprovement,
}

impl PriorityArea {
    pub fn title(&self) -> &str {
        match self {
            PriorityArea::BlackRepertoire => "BLACK REPERTOIRE CRISIS",
            PriorityArea::TimeManagement => "TIME MANAGEMENT",
            PriorityArea::OpeningPreparation => "OPENING PREPARATION",
            PriorityArea::TacticalAwareness => "TACTICAL AWARENESS",
            PriorityArea::EndgameTechnique => "ENDGAME TECHNIQUE",
            PriorityArea::GeneralImprovement => "GENERAL IMPROVEMENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Priority {
    pub area: PriorityArea,
    pub stat: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeSummary {
    pub most_common_termination: Option<Termination>,
    pub avg_game_length: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayPatterns {
    pub winning: OutcomeSummary,
    pub losing: OutcomeSummary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedGain {
    /// Win-rate percentage points.
    Percent(f64),
    /// Rating points.
    Points { min: i32, max: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetImprovement {
    pub area: String,
    pub current: f64,
    pub target: f64,
    pub gain: ExpectedGain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projections {
    pub improvements: Vec<TargetImprovement>,
    pub thirty_day: RatingRange,
    pub ninety_day: RatingRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub priorities: Vec<Priority>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
    pub patterns: PlayPatterns,
    pub projections: Projections,
}

/// Strategy that maps a metrics bundle to prioritized advice.
pub trait InsightGenerator {
    fn priorities(&self, metrics: &Metrics, profile: &PlayerProfile) -> Vec<Priority>;

    fn strengths(&self, metrics: &Metrics) -> Vec<String>;

    fn recommendations(&self, metrics: &Metrics, priorities: &[Priority]) -> Vec<String>;

    fn patterns(&self, metrics: &Metrics) -> PlayPatterns;

    fn projections(&self, metrics: &Metrics, profile: &PlayerProfile) -> Projections;

    fn generate(&self, metrics: &Metrics, profile: &PlayerProfile) -> Insights {
        let priorities = self.priorities(metrics, profile);
        let recommendations = self.recommendations(metrics, &priorities);

        Insights {
            strengths: self.strengths(metrics),
            patterns: self.patterns(metrics),
            projections: self.projections(metrics, profile),
            priorities,
            recommendations,
        }
    }
}
