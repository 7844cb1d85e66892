// file: src/pipeline/orchestrator.rs
// description: validates a submission, drives it through the stages, and records the result
// reference: orchestrates the asynchronous analysis workflow

use crate::config::PipelineConfig;
use crate::error::{AnalyzerError, Result};
use crate::history::HistoryStore;
use crate::models::{AnalysisRecord, AnalysisResult, Rating, Submission};
use crate::pipeline::analyzer::{ResumeAnalyzer, SampleAnalyzer};
use crate::pipeline::executor::{StageExecutor, TimedExecutor};
use crate::pipeline::progress::{ChannelObserver, ProgressObserver};
use crate::pipeline::stage::{ProgressEvent, Stage, StageMachine};
use crate::utils::{OperationTimer, Validator};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything a caller of [`AnalysisPipeline::spawn`] observes: progress
/// events followed by exactly one terminal event.
#[derive(Debug)]
pub enum PipelineEvent {
    Progress(ProgressEvent),
    Completed(AnalysisRecord),
    Failed(AnalyzerError),
}

impl PipelineEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PipelineEvent::Progress(_))
    }
}

/// Holds no per-run state; each call to [`run`](Self::run) owns its own
/// [`StageMachine`], so one pipeline can serve concurrent submissions.
pub struct AnalysisPipeline {
    config: PipelineConfig,
    history: Arc<dyn HistoryStore>,
    executor: Arc<dyn StageExecutor>,
    analyzer: Arc<dyn ResumeAnalyzer>,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig, history: Arc<dyn HistoryStore>) -> Self {
        let executor = Arc::new(TimedExecutor::new(config.stage_delay()));
        Self {
            config,
            history,
            executor,
            analyzer: Arc::new(SampleAnalyzer),
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn StageExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn ResumeAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn validate(&self, submission: &Submission) -> Result<()> {
        Validator::validate_submission(submission, &self.config)
    }

    pub async fn run(
        &self,
        submission: &Submission,
        observer: &dyn ProgressObserver,
    ) -> Result<AnalysisRecord> {
        let uploaded_at = Utc::now();

        if let Err(e) = self.validate(submission) {
            warn!("Rejected {}: {}", submission.filename, e);
            return Err(e);
        }

        let timer = OperationTimer::new(&format!("analysis of {}", submission.filename));
        let mut machine = StageMachine::new();

        while let Some(stage) = machine.enter_next() {
            if let Err(e) = self.executor.execute(stage, submission).await {
                let err = stage_failure(stage, e);
                machine.fail(err.to_string());
                timer.abort(&err.to_string());
                return Err(err);
            }

            if let Some(event) = machine.report() {
                debug!("{}% {}", event.percentage, event.label);
                observer.on_progress(&event);
            }
        }

        let record = match self.synthesize(submission, uploaded_at).await {
            Ok(record) => record,
            Err(e) => {
                let err = stage_failure(Stage::Complete, e);
                machine.fail(err.to_string());
                timer.abort(&err.to_string());
                return Err(err);
            }
        };

        if let Err(e) = self.history.append(&record).await {
            timer.abort(&e.to_string());
            return Err(e);
        }

        timer.finish();
        info!(
            "Analysis {} of {} rated {}",
            record.id,
            record.filename,
            record.rating()
        );
        Ok(record)
    }

    /// Runs the analysis on the tokio runtime and streams its events.
    pub fn spawn(
        self: &Arc<Self>,
        submission: Submission,
    ) -> mpsc::UnboundedReceiver<PipelineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let pipeline = Arc::clone(self);

        tokio::spawn(async move {
            let observer = ChannelObserver::new(tx.clone(), PipelineEvent::Progress);
            let terminal = match pipeline.run(&submission, &observer).await {
                Ok(record) => PipelineEvent::Completed(record),
                Err(e) => PipelineEvent::Failed(e),
            };
            let _ = tx.send(terminal);
        });

        rx
    }

    async fn synthesize(
        &self,
        submission: &Submission,
        uploaded_at: DateTime<Utc>,
    ) -> Result<AnalysisRecord> {
        let outcome = self.analyzer.analyze(&submission.bytes).await?;

        let resume_rating = Rating::rounded(outcome.resume_rating)
            .map_err(|e| AnalyzerError::Validation(e.to_string()))?;

        Ok(AnalysisRecord::new(
            submission.filename.clone(),
            uploaded_at,
            outcome.extracted_data,
            AnalysisResult {
                resume_rating,
                improvement_areas: outcome.improvement_areas,
                upskill_suggestions: outcome.upskill_suggestions,
            },
        ))
    }
}

fn stage_failure(stage: Stage, err: AnalyzerError) -> AnalyzerError {
    match err {
        AnalyzerError::AnalysisFailed { .. } => err,
        other => AnalyzerError::AnalysisFailed {
            stage,
            cause: other.to_string(),
        },
    }
}
