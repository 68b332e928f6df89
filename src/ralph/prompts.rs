//! Fixed prompts for the build loop.
//!
//! The system prompt establishes the builder persona and the completion
//! marker contract. The two user prompt shapes cover the first iteration
//! (PRD only) and every later one (latest snapshot plus PRD).

/// System prompt for every build iteration
pub const SYSTEM_PROMPT: &str = r#"You are Ralph, an autonomous AI app builder. Your task is to build a production-ready web application based on a PRD.

You will output code in a React/Next.js format. Each iteration, you should:
1. Review the PRD and any previous code
2. Build or improve the application
3. Include tests when possible
4. Output complete, working code
5. When the app is fully complete and working, end with: <BUILD_COMPLETE>

Guidelines:
- Use React/TypeScript for frontend
- Include proper error handling
- Make the UI clean and professional
- Write self-contained code that works immediately
- Use Tailwind CSS for styling
- Include documentation
- Aim for complete implementation in minimal iterations"#;

/// User prompt for the first iteration: build from the PRD alone.
pub fn initial_prompt(prd: &str) -> String {
    format!("Build a React/Next.js application based on this PRD:\n\n{}", prd)
}

/// User prompt for later iterations: the latest full snapshot plus the PRD.
pub fn continuation_prompt(accumulated: &str, prd: &str) -> String {
    format!(
        "Continue building the application. Here's what we have so far:\n\n{}\n\nPRD:\n{}\n\nContinue improving and completing the application until all requirements are met.",
        accumulated, prd
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ralph::BUILD_COMPLETE_MARKER;

    #[test]
    fn test_system_prompt_carries_marker_contract() {
        assert!(SYSTEM_PROMPT.contains(BUILD_COMPLETE_MARKER));
        assert!(SYSTEM_PROMPT.contains("autonomous AI app builder"));
    }

    #[test]
    fn test_initial_prompt() {
        let prompt = initial_prompt("Build a todo app");
        assert!(prompt.contains("Build a todo app"));
        assert!(!prompt.contains("what we have so far"));
    }

    #[test]
    fn test_continuation_prompt_includes_snapshot_and_prd() {
        let prompt = continuation_prompt("const App = 1;", "Build a todo app");
        assert!(prompt.contains("const App = 1;"));
        assert!(prompt.contains("PRD:\nBuild a todo app"));
        assert!(prompt.contains("what we have so far"));
    }
}
