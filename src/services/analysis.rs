use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings::AppConfig;
use crate::domain::{ParseProgress, ParsedGame, PlayerProfile, RatingSnapshot};
use crate::insights::{InsightGenerator, Insights, RuleBasedInsights};
use crate::metrics::{self, Metrics};
use crate::parser::{parse_batch, GameParser, SkippedRecord};
use crate::report::{ReportContext, ReportFormatter};
use crate::source::GameRecordSource;

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub username: String,
    pub num_games: usize,
    /// Look-back window in days; 0 analyzes every archive.
    pub days: u32,
}

/// Result of running the pipeline over one player's games.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub profile: PlayerProfile,
    pub games_analyzed: usize,
    pub skipped: Vec<SkippedRecord>,
    pub metrics: Metrics,
    pub insights: Insights,
    pub report: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub report_path: PathBuf,
}

pub struct AnalysisService {
    config: AppConfig,
    parser: GameParser,
    insights: RuleBasedInsights,
    formatter: ReportFormatter,
    output_dir: PathBuf,
}

impl AnalysisService {
    pub fn new<P: AsRef<Path>>(config: AppConfig, output_dir: P) -> Result<Self> {
        let parser = GameParser::new(config.analysis.clone())?;

        Ok(Self {
            config,
            parser,
            insights: RuleBasedInsights::new(),
            formatter: ReportFormatter::new(),
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }

    /// Fetch, analyze and write the report. `Ok(None)` means no game could be
    /// parsed and nothing was written.
    pub async fn run<S, F>(
        &self,
        source: &mut S,
        request: &AnalysisRequest,
        on_progress: F,
    ) -> Result<Option<AnalysisOutcome>>
    where
        S: GameRecordSource,
        F: FnMut(&ParseProgress),
    {
        info!("=== Analyzing {} ===", request.username);

        info!("Step 1: Fetching games");
        let records = source
            .fetch_games(&request.username, request.num_games, request.days)
            .await?;
        info!("  → {} raw records", records.len());

        let rating = match source.fetch_rating(&request.username).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Could not fetch current rating, using latest game instead: {:#}", e);
                None
            }
        };

        let generated_at = Utc::now();
        let Some(analysis) = self.analyze(&records, request, rating, generated_at, on_progress) else {
            warn!("No data available for {}", request.username);
            return Ok(None);
        };

        info!("Step 5: Writing report");
        let report_path = self.write_report(&request.username, generated_at, &analysis.report)?;
        info!("  → Report saved to {}", report_path.display());

        info!("=== Analysis Complete ===");
        Ok(Some(AnalysisOutcome {
            analysis,
            report_path,
        }))
    }

    /// Parse, aggregate and format `records`. `None` when nothing parses.
    pub fn analyze<F>(
        &self,
        records: &[Value],
        request: &AnalysisRequest,
        rating: Option<RatingSnapshot>,
        generated_at: DateTime<Utc>,
        on_progress: F,
    ) -> Option<Analysis>
    where
        F: FnMut(&ParseProgress),
    {
        info!("Step 2: Parsing {} records", records.len());
        let batch = parse_batch(&self.parser, records, &request.username, on_progress);
        info!(
            "  → {} games parsed, {} skipped",
            batch.games.len(),
            batch.skipped.len()
        );
        if batch.games.is_empty() {
            return None;
        }

        let rating = rating.unwrap_or_else(|| Self::latest_rating(&batch.games));
        let profile = PlayerProfile::new(&request.username, rating);

        info!("Step 3: Calculating metrics");
        let metrics = metrics::calculate_all(&batch.games, &self.config.analysis);

        info!("Step 4: Generating insights");
        let insights = self.insights.generate(&metrics, &profile);

        let context = ReportContext::new(
            profile.clone(),
            generated_at,
            request.days,
            self.config.report.clone(),
        );
        let report = self.formatter.format(&metrics, &insights, &context);

        Some(Analysis {
            profile,
            games_analyzed: batch.games.len(),
            skipped: batch.skipped,
            metrics,
            insights,
            report,
        })
    }

    // --- Helper Methods ---

    fn latest_rating(games: &[ParsedGame]) -> RatingSnapshot {
        let rating = games
            .iter()
            .max_by_key(|g| g.date)
            .map(|g| g.player_rating)
            .unwrap_or_default();
        RatingSnapshot { rating }
    }

    fn write_report(&self, username: &str, generated_at: DateTime<Utc>, report: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let path = self.output_dir.join(report_file_name(username, generated_at));
        fs::write(&path, report).with_context(|| format!("Failed to write report {}", path.display()))?;
        Ok(path)
    }
}

pub fn report_file_name(username: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "{}_analysis_{}.txt",
        username,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}
