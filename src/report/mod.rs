//! Plain-text rendering of metrics and insights.

mod baselines;
mod sections;

pub use baselines::{quote_for, ReferenceBaselines, QUOTES};

use chrono::{DateTime, Utc};

use crate::config::ReportSettings;
use crate::domain::PlayerProfile;
use crate::insights::Insights;
use crate::metrics::Metrics;

/// Everything the report needs besides the numbers themselves.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub profile: PlayerProfile,
    pub generated_at: DateTime<Utc>,
    /// Lookback window of the analysis; 0 means every available archive.
    pub days: u32,
    pub settings: ReportSettings,
}

impl ReportContext {
    pub fn new(profile: PlayerProfile, generated_at: DateTime<Utc>, days: u32, settings: ReportSettings) -> Self {
        Self {
            profile,
            generated_at,
            days,
            settings,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    baselines: ReferenceBaselines,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baselines(baselines: ReferenceBaselines) -> Self {
        Self { baselines }
    }

    pub fn format(&self, metrics: &Metrics, insights: &Insights, context: &ReportContext) -> String {
        let mut out = ReportWriter::new(&context.settings);

        sections::header(&mut out, context);
        sections::performance_overview(&mut out, metrics, insights, context);
        sections::rating_trend(&mut out, metrics);
        sections::priorities(&mut out, insights);
        sections::time_controls(&mut out, metrics);
        sections::color_performance(&mut out, metrics);
        sections::openings(&mut out, metrics);
        sections::game_phases(&mut out, metrics, &self.baselines);
        sections::opponents(&mut out, metrics, context);
        sections::clock_management(&mut out, metrics);
        sections::piece_exchanges(&mut out, metrics, &self.baselines);
        sections::tactical_patterns(&mut out, metrics, &self.baselines);
        sections::performance_trends(&mut out, metrics);
        sections::psychology(&mut out, metrics);
        sections::strengths(&mut out, insights);
        sections::recommendations(&mut out, insights);
        sections::projections(&mut out, insights);
        sections::footer(&mut out, metrics, context);

        out.finish()
    }
}

/// Line buffer that knows the report width and rule characters.
pub(crate) struct ReportWriter<'a> {
    settings: &'a ReportSettings,
    lines: Vec<String>,
}

impl<'a> ReportWriter<'a> {
    fn new(settings: &'a ReportSettings) -> Self {
        Self {
            settings,
            lines: Vec::new(),
        }
    }

    pub(crate) fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub(crate) fn centered(&mut self, text: &str) {
        let width = self.settings.width;
        let padded = format!("{:^width$}", text);
        self.lines.push(padded.trim_end().to_string());
    }

    pub(crate) fn border(&mut self) {
        self.lines.push(self.rule(self.settings.border));
    }

    pub(crate) fn separator(&mut self) {
        self.lines.push(self.rule(self.settings.separator));
    }

    pub(crate) fn heading(&mut self, title: &str) {
        self.line(title);
        self.separator();
    }

    fn rule(&self, ch: char) -> String {
        std::iter::repeat_n(ch, self.settings.width).collect()
    }

    fn finish(self) -> String {
        let mut report = self.lines.join("\n");
        report.push('\n');
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisSettings;
    use crate::domain::fixtures::{utc, GameBuilder};
    use crate::domain::{ParsedGame, RatingSnapshot, Termination};
    use crate::insights::{InsightGenerator, RuleBasedInsights};
    use crate::metrics::calculate_all;

    fn context(games: &[ParsedGame]) -> ReportContext {
        let rating = games.last().map(|g| g.player_rating).unwrap_or(800);
        ReportContext::new(
            PlayerProfile::new("hikaru", RatingSnapshot { rating }),
            utc(2024, 2, 1, 12),
            30,
            ReportSettings::default(),
        )
    }

    fn render(games: &[ParsedGame]) -> String {
        let metrics = calculate_all(games, &AnalysisSettings::default());
        let ctx = context(games);
        let insights = RuleBasedInsights::new().generate(&metrics, &ctx.profile);
        ReportFormatter::new().format(&metrics, &insights, &ctx)
    }

    fn sample_games() -> Vec<ParsedGame> {
        (0..12)
            .map(|i| {
                let builder = GameBuilder::new(i).ratings(800 + i as i32, 790).clock(45.0, 0);
                let builder = match i % 3 {
                    0 => builder.loss().termination(Termination::Time),
                    1 => builder.win().termination(Termination::Checkmate),
                    _ => builder.black().win(),
                };
                builder.build()
            })
            .collect()
    }

    #[test]
    fn test_sections_appear_in_order() {
        let report = render(&sample_games());

        let headings = [
            "CHESS PERFORMANCE ANALYSIS REPORT",
            "PERFORMANCE OVERVIEW",
            "RATING TREND",
            "TOP 3 PRIORITIES FOR IMPROVEMENT",
            "TIME CONTROL BREAKDOWN",
            "COLOR PERFORMANCE ANALYSIS",
            "OPENING REPERTOIRE HEALTH CHECK",
            "GAME PHASE BREAKDOWN",
            "OPPONENT ANALYSIS",
            "CLOCK MANAGEMENT ANALYSIS",
            "PIECE EXCHANGE PATTERNS",
            "TACTICAL PATTERN DETECTION",
            "PERFORMANCE TRENDS",
            "PSYCHOLOGICAL PATTERNS",
            "YOUR HIDDEN STRENGTHS",
            "RECOMMENDATIONS",
            "PROJECTED OUTCOMES",
            "Next Analysis: 2024-03-02",
        ];

        let mut cursor = 0;
        for heading in headings {
            let found = report[cursor..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing or out of order: {heading}"));
            cursor += found + heading.len();
        }
    }

    #[test]
    fn test_header_is_centered_and_ruled() {
        let report = render(&sample_games());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=".repeat(80));
        let title = "CHESS PERFORMANCE ANALYSIS REPORT";
        let left = (80 - title.len()) / 2;
        assert_eq!(lines[1], format!("{}{}", " ".repeat(left), title));
        assert!(lines[2].trim() == "Player: hikaru");
        assert!(lines[3].contains("Generated: 2024-02-01 12:00"));
    }

    #[test]
    fn test_overview_record_line() {
        let report = render(&sample_games());
        assert!(report.contains("Games Analyzed: 12 (last 30 days)"));
        assert!(report.contains("Overall Record: 8W - 4L - 0D (66.7% win rate)"));
    }

    #[test]
    fn test_reference_values_are_labeled() {
        let report = render(&sample_games());
        assert!(report.contains("reference values"));
        assert!(report.contains("45%"));
    }

    #[test]
    fn test_missing_values_show_na() {
        let games = vec![GameBuilder::new(1).win().build()];
        let report = render(&games);

        assert!(report.contains("Best Hour: n/a"));
        assert!(report.contains("Best Session: n/a"));
        assert!(report.contains("No clock data available"));
    }

    #[test]
    fn test_quote_is_deterministic() {
        let games = sample_games();
        assert_eq!(render(&games), render(&games));
        assert!(render(&games).contains(quote_for(12)));
    }

    #[test]
    fn test_time_control_rows_for_every_class() {
        let games = vec![
            GameBuilder::new(1).time_control("bullet").win().build(),
            GameBuilder::new(2).time_control("blitz").loss().build(),
            GameBuilder::new(3).time_control("daily").win().build(),
        ];
        let report = render(&games);

        for class in ["bullet", "blitz", "daily"] {
            assert!(report.lines().any(|l| l.starts_with(class)), "no row for {class}");
        }
    }

    #[test]
    fn test_custom_width() {
        let games = sample_games();
        let metrics = calculate_all(&games, &AnalysisSettings::default());
        let mut ctx = context(&games);
        ctx.settings.width = 40;
        let insights = RuleBasedInsights::new().generate(&metrics, &ctx.profile);

        let report = ReportFormatter::new().format(&metrics, &insights, &ctx);
        assert!(report.starts_with(&format!("{}\n", "=".repeat(40))));
    }
}
