//! Build cost estimation.
//!
//! The model classifies the PRD into a complexity tier; fixed per-tier
//! iteration and token profiles plus fixed per-1K pricing turn that into a
//! dollar estimate, rounded to cents.

use serde::{Deserialize, Serialize};

use crate::error::{BuildrError, Result};
use crate::extract::parse_json_object;
use crate::llm::{CompletionRequest, LlmClient};

/// Input price in USD per 1K tokens
const INPUT_COST_PER_1K: f64 = 0.015;

/// Output price in USD per 1K tokens
const OUTPUT_COST_PER_1K: f64 = 0.045;

const SYSTEM_PROMPT: &str = r#"You are an AI cost estimation expert. Analyze the complexity of the app based on its PRD.

Respond with a JSON object in this format:
{
  "complexity": "simple" | "medium" | "complex",
  "reasoning": "Brief explanation of complexity assessment"
}

Factors to consider:
- Number of features and endpoints
- Data model complexity
- User authentication needs
- Integration requirements
- UI/UX complexity
- Testing requirements"#;

const MAX_TOKENS: u32 = 500;

/// Complexity tier assigned by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

/// Per-tier iteration and token profile
#[derive(Debug, Clone, Copy)]
pub struct ComplexityProfile {
    pub iterations: u32,
    pub avg_input_tokens: u32,
    pub avg_output_tokens: u32,
    pub label: &'static str,
}

impl Complexity {
    pub fn profile(&self) -> ComplexityProfile {
        match self {
            Complexity::Simple => ComplexityProfile {
                iterations: 8,
                avg_input_tokens: 2000,
                avg_output_tokens: 1500,
                label: "Simple (API, CRUD app)",
            },
            Complexity::Medium => ComplexityProfile {
                iterations: 15,
                avg_input_tokens: 3000,
                avg_output_tokens: 2500,
                label: "Medium (Web app with features)",
            },
            Complexity::Complex => ComplexityProfile {
                iterations: 25,
                avg_input_tokens: 4000,
                avg_output_tokens: 3500,
                label: "Complex (Full-featured app)",
            },
        }
    }

    /// Expand this tier into a full estimate
    pub fn estimate(&self, reasoning: String) -> CostEstimate {
        let profile = self.profile();

        let total_input_tokens = u64::from(profile.iterations) * u64::from(profile.avg_input_tokens);
        let total_output_tokens =
            u64::from(profile.iterations) * u64::from(profile.avg_output_tokens);

        let input_cost = round_to_cents(total_input_tokens as f64 / 1000.0 * INPUT_COST_PER_1K);
        let output_cost = round_to_cents(total_output_tokens as f64 / 1000.0 * OUTPUT_COST_PER_1K);
        let total_cost = round_to_cents(
            total_input_tokens as f64 / 1000.0 * INPUT_COST_PER_1K
                + total_output_tokens as f64 / 1000.0 * OUTPUT_COST_PER_1K,
        );

        CostEstimate {
            complexity: *self,
            reasoning,
            iterations: profile.iterations,
            total_input_tokens,
            total_output_tokens,
            total_tokens: total_input_tokens + total_output_tokens,
            input_cost,
            output_cost,
            total_cost,
            label: profile.label.to_string(),
        }
    }
}

/// The complete cost estimate for a build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub complexity: Complexity,
    pub reasoning: String,
    pub iterations: u32,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_tokens: u64,
    /// USD, rounded to cents
    pub input_cost: f64,
    /// USD, rounded to cents
    pub output_cost: f64,
    /// USD, rounded to cents
    pub total_cost: f64,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct ComplexityAnalysis {
    complexity: Complexity,
    reasoning: String,
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate the cost of building the app described by `prd`.
pub async fn estimate_cost<L: LlmClient>(llm: &L, prd: &str) -> Result<CostEstimate> {
    if prd.trim().is_empty() {
        return Err(BuildrError::InvalidRequest("prd is required".to_string()));
    }

    let request = CompletionRequest::new(SYSTEM_PROMPT)
        .with_user_message(format!(
            "Please analyze the complexity of building this app:\n\n{}",
            prd
        ))
        .with_max_tokens(MAX_TOKENS);

    let response = llm.complete(request).await?;
    let analysis: ComplexityAnalysis = parse_json_object(&response.content)?;

    Ok(analysis.complexity.estimate(analysis.reasoning))
}
