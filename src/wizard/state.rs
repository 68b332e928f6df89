//! Explicit step-state machine for the wizard.
//!
//! Each transition consumes the current state and returns the next one, so
//! the step sequence is enforced by the type flow instead of a shared
//! mutable store. Illegal transitions are errors.

use serde::{Deserialize, Serialize};

use crate::error::{BuildrError, Result};
use crate::ralph::RunResult;
use crate::wizard::estimate::CostEstimate;

/// The wizard's steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// User is describing the app idea
    Description,
    /// Clarifying questions are being answered
    Clarification,
    /// PRD has been synthesized
    Prd,
    /// Cost estimate is awaiting approval
    Cost,
    /// The build loop is running
    Building,
    /// The build run has finished
    Complete,
}

impl Step {
    /// Returns true once the wizard can no longer advance
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Complete)
    }
}

/// Immutable wizard state; transitions return the next state.
#[derive(Debug, Clone)]
pub struct WizardState {
    pub step: Step,
    pub app_description: String,
    pub questions: Vec<String>,
    /// Question/answer pairs in the order they were asked
    pub answers: Vec<(String, String)>,
    pub prd: String,
    pub estimate: Option<CostEstimate>,
    pub result: Option<RunResult>,
}

impl WizardState {
    /// Start a new wizard session from an app description
    pub fn new(app_description: impl Into<String>) -> Self {
        Self {
            step: Step::Description,
            app_description: app_description.into(),
            questions: Vec::new(),
            answers: Vec::new(),
            prd: String::new(),
            estimate: None,
            result: None,
        }
    }

    fn expect_step(&self, expected: Step, action: &str) -> Result<()> {
        if self.step != expected {
            return Err(BuildrError::InvalidState(format!(
                "cannot {} at step {:?}",
                action, self.step
            )));
        }
        Ok(())
    }

    /// Description -> Clarification, once questions are available
    pub fn with_questions(mut self, questions: Vec<String>) -> Result<Self> {
        self.expect_step(Step::Description, "set questions")?;
        self.questions = questions;
        self.step = Step::Clarification;
        Ok(self)
    }

    /// Record the user's answers; stays in Clarification
    pub fn with_answers(mut self, answers: Vec<(String, String)>) -> Result<Self> {
        self.expect_step(Step::Clarification, "record answers")?;
        self.answers = answers;
        Ok(self)
    }

    /// Clarification -> Prd, once the PRD is synthesized
    pub fn with_prd(mut self, prd: impl Into<String>) -> Result<Self> {
        self.expect_step(Step::Clarification, "set prd")?;
        self.prd = prd.into();
        self.step = Step::Prd;
        Ok(self)
    }

    /// Prd -> Cost, once the estimate is computed
    pub fn with_estimate(mut self, estimate: CostEstimate) -> Result<Self> {
        self.expect_step(Step::Prd, "set estimate")?;
        self.estimate = Some(estimate);
        self.step = Step::Cost;
        Ok(self)
    }

    /// Cost -> Building, once the user approves the estimate
    pub fn start_build(mut self) -> Result<Self> {
        self.expect_step(Step::Cost, "start build")?;
        self.step = Step::Building;
        Ok(self)
    }

    /// Building -> Complete, with the run result
    pub fn with_result(mut self, result: RunResult) -> Result<Self> {
        self.expect_step(Step::Building, "finish build")?;
        self.result = Some(result);
        self.step = Step::Complete;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::estimate::Complexity;

    fn sample_estimate() -> CostEstimate {
        Complexity::Simple.estimate("small CRUD app".to_string())
    }

    fn sample_result() -> RunResult {
        RunResult {
            completed: true,
            iterations_run: 2,
            app_name: "TodoApp".to_string(),
            final_code: "const App = 1;".to_string(),
            artifacts: Vec::new(),
            records: Vec::new(),
        }
    }

    #[test]
    fn test_happy_path() {
        let state = WizardState::new("A todo app")
            .with_questions(vec!["Who are the users?".to_string()])
            .unwrap()
            .with_answers(vec![("Who are the users?".to_string(), "Me".to_string())])
            .unwrap()
            .with_prd("# PRD")
            .unwrap()
            .with_estimate(sample_estimate())
            .unwrap()
            .start_build()
            .unwrap()
            .with_result(sample_result())
            .unwrap();

        assert_eq!(state.step, Step::Complete);
        assert!(state.step.is_terminal());
        assert_eq!(state.prd, "# PRD");
        assert!(state.estimate.is_some());
        assert!(state.result.is_some());
    }

    #[test]
    fn test_initial_state() {
        let state = WizardState::new("An app");
        assert_eq!(state.step, Step::Description);
        assert!(!state.step.is_terminal());
        assert!(state.questions.is_empty());
    }

    #[test]
    fn test_prd_before_questions_rejected() {
        let result = WizardState::new("An app").with_prd("# PRD");
        assert!(matches!(result.unwrap_err(), BuildrError::InvalidState(_)));
    }

    #[test]
    fn test_build_before_estimate_rejected() {
        let state = WizardState::new("An app")
            .with_questions(vec![])
            .unwrap()
            .with_prd("# PRD")
            .unwrap();

        let result = state.start_build();
        assert!(matches!(result.unwrap_err(), BuildrError::InvalidState(_)));
    }

    #[test]
    fn test_answers_after_prd_rejected() {
        let state = WizardState::new("An app")
            .with_questions(vec![])
            .unwrap()
            .with_prd("# PRD")
            .unwrap();

        let result = state.with_answers(vec![]);
        assert!(matches!(result.unwrap_err(), BuildrError::InvalidState(_)));
    }

    #[test]
    fn test_result_before_building_rejected() {
        let result = WizardState::new("An app").with_result(sample_result());
        assert!(matches!(result.unwrap_err(), BuildrError::InvalidState(_)));
    }

    #[test]
    fn test_step_serialization() {
        assert_eq!(
            serde_json::to_string(&Step::Clarification).unwrap(),
            "\"clarification\""
        );
    }
}
