pub mod settings;

pub use settings::{AnalysisSettings, AppConfig, FetcherSettings, ReportSettings};
