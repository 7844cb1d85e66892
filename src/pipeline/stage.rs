// file: src/pipeline/stage.rs
// description: fixed analysis stage sequence and the per-run state machine
// reference: linear pipeline state transitions

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    ExtractingText,
    ParsingSections,
    RunningInference,
    GeneratingInsights,
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::ExtractingText,
        Stage::ParsingSections,
        Stage::RunningInference,
        Stage::GeneratingInsights,
        Stage::Complete,
    ];

    pub fn percentage(self) -> u8 {
        match self {
            Stage::ExtractingText => 20,
            Stage::ParsingSections => 40,
            Stage::RunningInference => 60,
            Stage::GeneratingInsights => 80,
            Stage::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::ExtractingText => "Extracting text from PDF...",
            Stage::ParsingSections => "Parsing resume sections...",
            Stage::RunningInference => "Analyzing with AI...",
            Stage::GeneratingInsights => "Generating insights...",
            Stage::Complete => "Analysis complete!",
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::ExtractingText => Some(Stage::ParsingSections),
            Stage::ParsingSections => Some(Stage::RunningInference),
            Stage::RunningInference => Some(Stage::GeneratingInsights),
            Stage::GeneratingInsights => Some(Stage::Complete),
            Stage::Complete => None,
        }
    }

    pub fn event(self) -> ProgressEvent {
        ProgressEvent {
            percentage: self.percentage(),
            label: self.label().to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub percentage: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    /// Work for this stage is in flight; its event has not been emitted yet.
    Running(Stage),
    /// The stage's event has been emitted.
    Reported(Stage),
    Failed { stage: Stage, cause: String },
}

/// State machine owned by a single pipeline invocation. Stages can only be
/// entered in order, and only after the previous stage has been reported.
#[derive(Debug)]
pub struct StageMachine {
    state: RunState,
}

impl StageMachine {
    pub fn new() -> Self {
        Self {
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Enters the next stage, or returns `None` once `Complete` was reported
    /// or the run has failed.
    pub fn enter_next(&mut self) -> Option<Stage> {
        let next = match &self.state {
            RunState::NotStarted => Some(Stage::ExtractingText),
            RunState::Reported(stage) => stage.next(),
            RunState::Running(_) | RunState::Failed { .. } => None,
        }?;
        self.state = RunState::Running(next);
        Some(next)
    }

    /// Marks the running stage as reported and returns its progress event.
    pub fn report(&mut self) -> Option<ProgressEvent> {
        match self.state {
            RunState::Running(stage) => {
                self.state = RunState::Reported(stage);
                Some(stage.event())
            }
            _ => None,
        }
    }

    pub fn fail(&mut self, cause: impl Into<String>) -> Option<Stage> {
        let stage = match self.state {
            RunState::Running(stage) | RunState::Reported(stage) => stage,
            _ => return None,
        };
        self.state = RunState::Failed {
            stage,
            cause: cause.into(),
        };
        Some(stage)
    }

    pub fn is_complete(&self) -> bool {
        self.state == RunState::Reported(Stage::Complete)
    }
}

impl Default for StageMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_percentages_strictly_increase() {
        let percentages: Vec<u8> = Stage::ALL.iter().map(|s| s.percentage()).collect();
        assert_eq!(percentages, vec![20, 40, 60, 80, 100]);
    }

    #[test]
    fn test_next_follows_all_order() {
        for pair in Stage::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(Stage::Complete.next(), None);
    }

    #[test]
    fn test_machine_walks_every_stage() {
        let mut machine = StageMachine::new();
        let mut events = Vec::new();

        while let Some(stage) = machine.enter_next() {
            assert_eq!(machine.state(), &RunState::Running(stage));
            events.push(machine.report().unwrap());
        }

        assert!(machine.is_complete());
        assert_eq!(
            events.iter().map(|e| e.percentage).collect::<Vec<_>>(),
            vec![20, 40, 60, 80, 100]
        );
        assert_eq!(events[4].label, "Analysis complete!");
    }

    #[test]
    fn test_machine_cannot_skip_unreported_stage() {
        let mut machine = StageMachine::new();
        assert_eq!(machine.enter_next(), Some(Stage::ExtractingText));
        assert_eq!(machine.enter_next(), None);
        assert!(machine.report().is_some());
        assert!(machine.report().is_none());
        assert_eq!(machine.enter_next(), Some(Stage::ParsingSections));
    }

    #[test]
    fn test_machine_failure_is_terminal() {
        let mut machine = StageMachine::new();
        assert_eq!(machine.fail("nothing running"), None);

        machine.enter_next();
        machine.report();
        machine.enter_next();
        assert_eq!(machine.fail("parser crashed"), Some(Stage::ParsingSections));
        assert_eq!(
            machine.state(),
            &RunState::Failed {
                stage: Stage::ParsingSections,
                cause: "parser crashed".to_string()
            }
        );
        assert_eq!(machine.enter_next(), None);
        assert!(machine.report().is_none());
        assert!(!machine.is_complete());
    }
}
