//! Per-iteration progress events for build runs.
//!
//! The loop emits one real event per iteration, so callers can render
//! progress from what actually happened instead of simulating it.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Progress event emitted by the build loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildEvent {
    /// An iteration is about to call the model
    IterationStarted { iteration: u32 },
    /// The model call succeeded; `build_complete` is true when the
    /// completion marker was found in this iteration's output
    IterationCompleted { iteration: u32, build_complete: bool },
    /// The model call failed; the loop continues
    IterationErrored { iteration: u32, reason: String },
    /// The run is over, by completion, cancellation, or budget exhaustion
    RunFinished { completed: bool, iterations_run: u32 },
}

/// Receives progress events from a build run
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: BuildEvent);
}

/// Sink that discards all events
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: BuildEvent) {}
}

/// Sink that forwards events into an mpsc channel
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<BuildEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BuildEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: BuildEvent) {
        // A dropped receiver just means nobody is watching
        let _ = self.tx.send(event);
    }
}

/// Sink that records every event, for assertions in tests
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<BuildEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for CollectingSink {
    fn emit(&self, event: BuildEvent) {
        self.events.lock().unwrap().push(event);
    }
}
