pub mod analysis;

pub use analysis::{Analysis, AnalysisOutcome, AnalysisRequest, AnalysisService};
