// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod history;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::{Config, HistoryConfig, PipelineConfig};
pub use error::{AnalyzerError, ErrorKind, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use history::{HistoryStore, InMemoryHistoryStore, JsonHistoryStore};
pub use models::{
    AnalysisRecord, AnalysisResult, Education, Experience, ExtractedData, HistorySummary, Rating,
    RatingTier, RecordId, Submission, UpskillSuggestion,
};
pub use pipeline::{
    AnalysisOutcome, AnalysisPipeline, ImmediateExecutor, PipelineEvent, ProgressEvent,
    ProgressObserver, ProgressTracker, ResumeAnalyzer, SampleAnalyzer, Stage, StageExecutor,
    TimedExecutor,
};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let history = std::sync::Arc::new(InMemoryHistoryStore::new());
        let _pipeline = AnalysisPipeline::new(config.pipeline, history);
        assert_eq!(Stage::ALL.len(), 5);
    }
}
