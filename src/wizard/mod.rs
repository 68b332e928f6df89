//! Wizard collaborators around the build loop.
//!
//! The wizard walks a user from an app idea to a finished build:
//! clarifying questions, a PRD, a cost estimate, then the build itself.
//! Each collaborator is a single request/response round trip against the
//! model client; the step sequence is an explicit state machine.

pub mod estimate;
pub mod prd;
pub mod questions;
pub mod state;

pub use estimate::{Complexity, CostEstimate, estimate_cost};
pub use prd::generate_prd;
pub use questions::generate_questions;
pub use state::{Step, WizardState};
