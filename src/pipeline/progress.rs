// file: src/pipeline/progress.rs
// description: progress observers for stage events, including an indicatif bar
// reference: uses indicatif for progress bars

use crate::pipeline::stage::ProgressEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Receives one event per stage, in stage order.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Keeps every event it sees.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<ProgressEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn percentages(&self) -> Vec<u8> {
        self.events().iter().map(|e| e.percentage).collect()
    }
}

impl ProgressObserver for EventLog {
    fn on_progress(&self, event: &ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Forwards events into a channel; a closed receiver is ignored.
pub struct ChannelObserver<T> {
    sender: mpsc::UnboundedSender<T>,
    wrap: fn(ProgressEvent) -> T,
}

impl<T> ChannelObserver<T> {
    pub fn new(sender: mpsc::UnboundedSender<T>, wrap: fn(ProgressEvent) -> T) -> Self {
        Self { sender, wrap }
    }
}

impl<T: Send> ProgressObserver for ChannelObserver<T> {
    fn on_progress(&self, event: &ProgressEvent) {
        let _ = self.sender.send((self.wrap)(event.clone()));
    }
}

/// Terminal progress bar that tracks the stage percentage.
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::with_color(true)
    }

    pub fn with_color(colored: bool) -> Self {
        Self {
            bar: create_progress_bar(colored),
        }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressTracker {
    fn on_progress(&self, event: &ProgressEvent) {
        self.bar.set_position(u64::from(event.percentage));
        self.bar.set_message(event.label.clone());
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(100);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos:>3}% {msg}"
    };
    let chars = if colored { "█▓▒░" } else { "=>-" };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(chars)),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}
