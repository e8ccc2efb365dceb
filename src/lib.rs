pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod insights;
pub mod metrics;
pub mod parser;
pub mod rate_limiter;
pub mod report;
pub mod services;
pub mod source;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

use crate::cache::Cache;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::ParseProgress;
use crate::services::{AnalysisOutcome, AnalysisRequest, AnalysisService};
use crate::source::{ArchiveFileSource, ChessComClient};

const PROGRESS_BAR_WIDTH: usize = 30;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

/// Options of the `analyze` command after CLI parsing.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub username: String,
    pub games: Option<usize>,
    pub days: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub no_cache: bool,
}

pub fn handle_analyze(options: AnalyzeOptions) -> Result<()> {
    let config = AppConfig::new();
    let request = AnalysisRequest {
        username: options.username.clone(),
        num_games: options.games.unwrap_or(config.fetcher.default_num_games),
        days: options.days.unwrap_or(config.fetcher.default_days),
    };
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report.output_dir));

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        let service = AnalysisService::new(config.clone(), &output_dir)?;

        match &options.input {
            Some(path) => {
                let mut source = ArchiveFileSource::new(path);
                service.run(&mut source, &request, print_progress).await
            }
            None => {
                let mut source = ChessComClient::new(&config.fetcher)?;
                if !options.no_cache {
                    source = source.with_cache(Cache::new(&options.cache_dir)?);
                }
                service.run(&mut source, &request, print_progress).await
            }
        }
    })?;

    match outcome {
        Some(outcome) => print_summary(&outcome),
        None => println!("{}", "No data available".yellow()),
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

// --- Helper Methods ---

fn print_progress(progress: &ParseProgress) {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r{} {}", "Parsing".cyan(), progress.render_bar(PROGRESS_BAR_WIDTH));
    if progress.is_complete() {
        let _ = writeln!(stderr);
    }
    let _ = stderr.flush();
}

fn print_summary(outcome: &AnalysisOutcome) {
    let analysis = &outcome.analysis;
    let basic = &analysis.metrics.basic;

    println!("{}", "Analysis complete".green().bold());
    println!(
        "  Player:  {} ({}, {})",
        analysis.profile.username.bold(),
        analysis.profile.current_rating,
        analysis.profile.rating_level.as_str()
    );
    println!(
        "  Games:   {} analyzed ({}W-{}L-{}D, {:.1}% win rate)",
        analysis.games_analyzed, basic.wins, basic.losses, basic.draws, basic.win_rate
    );
    if !analysis.skipped.is_empty() {
        println!(
            "  {}",
            format!("Skipped: {} malformed or foreign records", analysis.skipped.len()).yellow()
        );
    }

    println!("  Top priorities:");
    for (i, priority) in analysis.insights.priorities.iter().enumerate() {
        println!("    {}. {}", i + 1, priority.area.title().red());
    }
    println!("  Report:  {}", outcome.report_path.display().to_string().underline());
}
