//! PRD synthesis from a description and answered questions.

use crate::error::{BuildrError, Result};
use crate::llm::{CompletionRequest, LlmClient};

const SYSTEM_PROMPT: &str = r#"You are an expert technical product manager. Create a detailed Product Requirements Document (PRD) based on the user's description and answers.

The PRD should include:
1. Overview & Purpose
2. Core Features & User Stories
3. Data Model & Storage
4. Technical Specifications
5. Acceptance Criteria
6. Deployment Notes

Format the output as a well-structured markdown document with clear sections.
Be specific and detailed enough that a developer could build this exactly as specified."#;

const MAX_TOKENS: u32 = 3000;

/// Render question/answer pairs for the prompt, preserving order.
fn format_answers(answers: &[(String, String)]) -> String {
    answers
        .iter()
        .map(|(q, a)| format!("Q: {}\nA: {}", q, a))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Generate a markdown PRD from the app description and clarifying answers.
pub async fn generate_prd<L: LlmClient>(
    llm: &L,
    app_description: &str,
    answers: &[(String, String)],
) -> Result<String> {
    if app_description.trim().is_empty() {
        return Err(BuildrError::InvalidRequest(
            "app description is required".to_string(),
        ));
    }

    let request = CompletionRequest::new(SYSTEM_PROMPT)
        .with_user_message(format!(
            "App Description:\n{}\n\nAnswers to Clarifying Questions:\n{}\n\nPlease create a detailed PRD for this app.",
            app_description,
            format_answers(answers)
        ))
        .with_max_tokens(MAX_TOKENS);

    let response = llm.complete(request).await?;
    Ok(response.content)
}
