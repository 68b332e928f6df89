//! Cancellation signals for build runs.
//!
//! The loop checks the signal at the top of each iteration; an in-flight
//! model call is allowed to finish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Checked between iterations to decide whether to keep going
pub trait StopSignal: Send + Sync {
    fn should_stop(&self) -> bool;
}

/// Signal that never stops the run
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Shared flag for cancelling a run from another task
#[derive(Debug, Default, Clone)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect before the next iteration
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl StopSignal for CancelFlag {
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}
