/// Thresholds used while parsing games and aggregating metrics.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub opening_phase_end: u32,
    pub middlegame_phase_end: u32,
    pub time_pressure_seconds: f64,
    pub critical_time_threshold: f64,
    pub min_games_for_pattern: u32,
    pub quick_loss_moves: u32,
    pub opening_moves_shown: usize,
    pub max_critical_moves: usize,
    pub rating_gap_threshold: i32,
    pub min_games_for_hour: u32,
    pub opponent_buckets: Vec<i32>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            opening_phase_end: 15,
            middlegame_phase_end: 35,
            time_pressure_seconds: 30.0,
            critical_time_threshold: 10.0,
            min_games_for_pattern: 3,
            quick_loss_moves: 20,
            opening_moves_shown: 10,
            max_critical_moves: 5,
            rating_gap_threshold: 50,
            min_games_for_hour: 5,
            opponent_buckets: vec![600, 700, 800],
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetcherSettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub api_base_url: &'static str,
    pub default_num_games: usize,
    pub default_days: u32,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 200, // 5 req/sec
            user_agent: "ChessInsights/1.0",
            timeout_secs: 30,
            api_base_url: "https://api.chess.com",
            default_num_games: 100,
            default_days: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub width: usize,
    pub border: char,
    pub separator: char,
    pub output_dir: &'static str,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            width: 80,
            border: '=',
            separator: '-',
            output_dir: "output",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub analysis: AnalysisSettings,
    pub fetcher: FetcherSettings,
    pub report: ReportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            analysis: AnalysisSettings::default(),
            fetcher: FetcherSettings::default(),
            report: ReportSettings::default(),
        }
    }
}
