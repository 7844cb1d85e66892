// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod analyzer;
mod executor;
mod orchestrator;
mod progress;
mod stage;

pub use analyzer::{AnalysisOutcome, ResumeAnalyzer, SampleAnalyzer, sample_outcome};
pub use executor::{ImmediateExecutor, StageExecutor, TimedExecutor};
pub use orchestrator::{AnalysisPipeline, PipelineEvent};
pub use progress::{ChannelObserver, EventLog, NoopObserver, ProgressObserver, ProgressTracker};
pub use stage::{ProgressEvent, RunState, Stage, StageMachine};
