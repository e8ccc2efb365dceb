use anyhow::Result;

use chess_insights::cli::Command;
use chess_insights::{handle_analyze, handle_completions, interpret, AnalyzeOptions};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Analyze {
            username,
            games,
            days,
            output_dir,
            input,
            cache_dir,
            no_cache,
        } => handle_analyze(AnalyzeOptions {
            username,
            games,
            days,
            output_dir,
            input,
            cache_dir,
            no_cache,
        }),
        Command::Completions { shell } => handle_completions(shell),
    }
}
