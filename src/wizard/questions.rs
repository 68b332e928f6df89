//! Clarifying-question generation.
//!
//! One round trip: the model is asked for 5-7 strategic questions about the
//! app idea, returned as JSON embedded in free text. A reply without a
//! parseable JSON object is a terminal error for this call; there is no
//! retry.

use serde::Deserialize;

use crate::error::{BuildrError, Result};
use crate::extract::parse_json_object;
use crate::llm::{CompletionRequest, LlmClient};

const SYSTEM_PROMPT: &str = r#"You are an expert product manager helping to clarify app requirements.
Your job is to ask 5-7 strategic questions that will help fully specify what the user wants to build.

Focus on:
- Core functionality and primary user stories
- Technology preferences/constraints
- Data models and storage needs
- User authentication/authorization requirements
- Performance and scalability needs
- Design/UX preferences

Format your response as a JSON object with a "questions" array containing 5-7 string questions.
Example: { "questions": ["What is the primary use case?", "Who are the users?", ...] }"#;

const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<String>,
}

/// Generate clarifying questions for an app description.
pub async fn generate_questions<L: LlmClient>(
    llm: &L,
    app_description: &str,
) -> Result<Vec<String>> {
    if app_description.trim().is_empty() {
        return Err(BuildrError::InvalidRequest(
            "app description is required".to_string(),
        ));
    }

    let request = CompletionRequest::new(SYSTEM_PROMPT)
        .with_user_message(format!(
            "The user wants to build: {}\n\nAsk clarifying questions to fully understand their requirements.",
            app_description
        ))
        .with_max_tokens(MAX_TOKENS);

    let response = llm.complete(request).await?;
    let payload: QuestionsPayload = parse_json_object(&response.content)?;

    Ok(payload.questions)
}
