// file: src/pipeline/executor.rs
// description: stage executors that perform or simulate the work of each stage
// reference: injected async capability behind a trait object

use crate::error::Result;
use crate::models::Submission;
use crate::pipeline::stage::Stage;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Performs the work behind one stage. The pipeline awaits this before the
/// stage's progress event is emitted; an `Err` moves the run to
/// `AnalysisFailed`.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    async fn execute(&self, stage: Stage, submission: &Submission) -> Result<()>;
}

/// Waits a fixed delay per stage.
#[derive(Debug, Clone)]
pub struct TimedExecutor {
    delay: Duration,
}

impl TimedExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StageExecutor for TimedExecutor {
    async fn execute(&self, stage: Stage, submission: &Submission) -> Result<()> {
        debug!(
            "Stage {} for {} ({} ms)",
            stage,
            submission.filename,
            self.delay.as_millis()
        );
        sleep(self.delay).await;
        Ok(())
    }
}

/// Completes every stage without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateExecutor;

#[async_trait]
impl StageExecutor for ImmediateExecutor {
    async fn execute(&self, _stage: Stage, _submission: &Submission) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn submission() -> Submission {
        Submission::new("resume.pdf", "application/pdf", vec![1, 2, 3])
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_executor_waits_for_delay() {
        let executor = TimedExecutor::new(Duration::from_secs(1));
        let start = Instant::now();

        executor
            .execute(Stage::ExtractingText, &submission())
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_immediate_executor_succeeds() {
        for stage in Stage::ALL {
            assert!(ImmediateExecutor.execute(stage, &submission()).await.is_ok());
        }
    }
}
