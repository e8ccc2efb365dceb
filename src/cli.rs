use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze chess.com games and write an improvement report")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch a player's recent games and write an analysis report
    Analyze {
        /// chess.com username
        username: String,

        /// Maximum number of games to analyze (defaults to 100)
        #[arg(short, long)]
        games: Option<usize>,

        /// Only games from the last N days, 0 for no limit (defaults to 30)
        #[arg(short, long)]
        days: Option<u32>,

        /// Directory the report is written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Read games from a saved archive JSON file instead of the API
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for cached monthly archives
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,

        /// Always download archives, never read or write the cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
