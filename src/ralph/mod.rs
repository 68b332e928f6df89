//! The build orchestration loop.
//!
//! A bounded, sequential loop of model calls: each iteration feeds the
//! model's latest full output back as context until the model emits the
//! completion marker or the iteration budget runs out. Individual call
//! failures are recorded and never abort the run; the run as a whole only
//! fails on invalid input.
//!
//! Only the most recent response is carried forward. Concatenating the full
//! iteration history would overflow the per-call prompt budget, so the loop
//! trusts the model to preserve earlier progress in each new snapshot.

pub mod progress;
pub mod prompts;
pub mod signal;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BuildrError, Result};
use crate::extract::{Artifact, extract_code_blocks};
use crate::llm::{CompletionRequest, LlmClient};

pub use progress::{BuildEvent, ChannelSink, CollectingSink, NoProgress, ProgressSink};
pub use signal::{CancelFlag, NeverStop, StopSignal};

/// In-band marker the model emits when it considers the build finished
pub const BUILD_COMPLETE_MARKER: &str = "<BUILD_COMPLETE>";

/// Default iteration budget for one build run
pub const DEFAULT_MAX_ITERATIONS: u32 = 15;

/// A request to build one application. Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    /// The product requirements document driving the build
    pub prd: String,
    /// Name of the application being built
    pub app_name: String,
    /// Iteration budget, at least 1
    pub max_iterations: u32,
}

impl BuildRequest {
    pub fn new(prd: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            prd: prd.into(),
            app_name: app_name.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Reject requests that must never enter the loop
    pub fn validate(&self) -> Result<()> {
        if self.prd.trim().is_empty() {
            return Err(BuildrError::InvalidRequest("prd is required".to_string()));
        }
        if self.app_name.trim().is_empty() {
            return Err(BuildrError::InvalidRequest(
                "app name is required".to_string(),
            ));
        }
        if self.max_iterations < 1 {
            return Err(BuildrError::InvalidRequest(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a single iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IterationStatus {
    /// The model call returned output
    Completed,
    /// The model call failed; the reason is recorded, the loop continued
    Errored(String),
}

/// Record of one iteration, appended in order and never mutated afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: u32,
    /// Raw model output for this iteration, empty on failure
    pub output: String,
    pub status: IterationStatus,
}

/// Result of a full build run. Derived once, at loop termination.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Whether the model signalled completion within the budget
    pub completed: bool,
    /// Number of iterations actually performed
    pub iterations_run: u32,
    /// Name of the application, echoed from the request
    pub app_name: String,
    /// The final accumulated output, completion marker stripped
    pub final_code: String,
    /// Artifacts extracted from `final_code`, in discovery order
    pub artifacts: Vec<Artifact>,
    /// Per-iteration records, one per iteration performed
    pub records: Vec<IterationRecord>,
}

impl RunResult {
    /// Human-readable one-line summary of the run
    pub fn status_message(&self) -> String {
        if self.completed {
            format!(
                "Successfully built {} in {} iterations",
                self.app_name, self.iterations_run
            )
        } else {
            format!(
                "Completed {} iterations. App may need further refinement.",
                self.iterations_run
            )
        }
    }
}

/// Configuration for the build loop
#[derive(Debug, Clone)]
pub struct RalphConfig {
    /// Max tokens for each model response
    pub max_tokens: u32,
    /// Pacing delay after every iteration, success or failure alike
    pub iteration_delay: Duration,
}

impl Default for RalphConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            iteration_delay: Duration::from_millis(500),
        }
    }
}

/// Runs the build loop against a model client.
///
/// Each invocation owns its own records and accumulated buffer; concurrent
/// runs share nothing mutable.
pub struct RalphRunner<L: LlmClient> {
    llm: Arc<L>,
    config: RalphConfig,
    progress: Arc<dyn ProgressSink>,
    stop: Arc<dyn StopSignal>,
}

impl<L: LlmClient> RalphRunner<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self {
            llm,
            config: RalphConfig::default(),
            progress: Arc::new(NoProgress),
            stop: Arc::new(NeverStop),
        }
    }

    pub fn with_config(mut self, config: RalphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_stop_signal(mut self, stop: Arc<dyn StopSignal>) -> Self {
        self.stop = stop;
        self
    }

    /// Run the loop to completion, cancellation, or budget exhaustion.
    ///
    /// Fails only on request validation; every in-loop error is absorbed
    /// into the returned result.
    pub async fn run(&self, request: &BuildRequest) -> Result<RunResult> {
        request.validate()?;

        log::info!(
            "Starting build of {} (budget: {} iterations)",
            request.app_name,
            request.max_iterations
        );

        let mut records: Vec<IterationRecord> = Vec::new();
        let mut accumulated = String::new();
        let mut completed = false;

        for iteration in 1..=request.max_iterations {
            if self.stop.should_stop() {
                log::info!("Build of {} cancelled before iteration {}", request.app_name, iteration);
                break;
            }

            self.progress.emit(BuildEvent::IterationStarted { iteration });

            let user_message = if iteration == 1 {
                prompts::initial_prompt(&request.prd)
            } else {
                prompts::continuation_prompt(&accumulated, &request.prd)
            };

            let completion = CompletionRequest::new(prompts::SYSTEM_PROMPT)
                .with_user_message(user_message)
                .with_max_tokens(self.config.max_tokens);

            match self.llm.complete(completion).await {
                Ok(response) => {
                    let output = response.content;
                    records.push(IterationRecord {
                        iteration,
                        output: output.clone(),
                        status: IterationStatus::Completed,
                    });

                    if output.contains(BUILD_COMPLETE_MARKER) {
                        completed = true;
                        accumulated = output
                            .replacen(BUILD_COMPLETE_MARKER, "", 1)
                            .trim()
                            .to_string();
                    } else {
                        // Each snapshot replaces the working context outright
                        accumulated = output;
                    }

                    log::debug!(
                        "Iteration {} of {} produced {} bytes (complete: {})",
                        iteration,
                        request.app_name,
                        accumulated.len(),
                        completed
                    );
                    self.progress.emit(BuildEvent::IterationCompleted {
                        iteration,
                        build_complete: completed,
                    });
                }
                Err(err) => {
                    let reason = err.to_string();
                    log::warn!(
                        "Iteration {} of {} failed: {}",
                        iteration,
                        request.app_name,
                        reason
                    );
                    records.push(IterationRecord {
                        iteration,
                        output: String::new(),
                        status: IterationStatus::Errored(reason.clone()),
                    });
                    self.progress
                        .emit(BuildEvent::IterationErrored { iteration, reason });
                }
            }

            // Pacing between model calls, applied uniformly to successes
            // and failures
            tokio::time::sleep(self.config.iteration_delay).await;

            if completed {
                break;
            }
        }

        let artifacts = extract_code_blocks(&accumulated);
        let iterations_run = records.len() as u32;

        self.progress.emit(BuildEvent::RunFinished {
            completed,
            iterations_run,
        });

        let result = RunResult {
            completed,
            iterations_run,
            app_name: request.app_name.clone(),
            final_code: accumulated,
            artifacts,
            records,
        };
        log::info!("{}", result.status_message());

        Ok(result)
    }
}
