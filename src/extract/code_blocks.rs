//! Fenced code block extraction from build output.
//!
//! The final text of a build run is free-form markdown-ish prose with fenced
//! code regions. Each region becomes a named artifact in discovery order.
//! When no regions are found, a heuristic decides whether the whole text is
//! itself code.

/// A named fragment of generated output, usually one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Artifact name: `code_block_<n>` or `main_code`
    pub name: String,
    /// Content exactly as it appeared, no trimming or dedent
    pub content: String,
}

impl Artifact {
    fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Extract fenced code regions from `text` as ordered artifacts.
///
/// Fences open with three backticks, optionally followed by a language hint
/// (ignored), then a newline; they close at the next three backticks. Inner
/// content is captured verbatim. Blocks are named `code_block_1`,
/// `code_block_2`, ... in order of appearance.
///
/// Fallback: the whole input becomes a single `main_code` artifact when no
/// blocks were found and the text contains `function`, or whenever the text
/// contains `const`. The `const` arm intentionally fires even when fenced
/// blocks were found, so such input yields both kinds of artifact.
pub fn extract_code_blocks(text: &str) -> Vec<Artifact> {
    const FENCE: &str = "```";

    let mut artifacts = Vec::new();
    let mut cursor = 0;
    let mut count = 0;

    while let Some(open) = text[cursor..].find(FENCE) {
        let hint_start = cursor + open + FENCE.len();

        // The opening fence line (with any language hint) ends at a newline;
        // an unterminated fence line means no block.
        let Some(newline) = text[hint_start..].find('\n') else {
            break;
        };
        let content_start = hint_start + newline + 1;

        let Some(close) = text[content_start..].find(FENCE) else {
            break;
        };

        count += 1;
        artifacts.push(Artifact::new(
            format!("code_block_{}", count),
            &text[content_start..content_start + close],
        ));

        cursor = content_start + close + FENCE.len();
    }

    if count == 0 && text.contains("function") || text.contains("const") {
        artifacts.push(Artifact::new("main_code", text));
    }

    artifacts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_blocks_no_heuristic_is_empty() {
        let artifacts = extract_code_blocks("Just a plain sentence about the build.");
        assert!(artifacts.is_empty());
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert!(extract_code_blocks("").is_empty());
    }

    #[test]
    fn test_single_block() {
        let text = "Here is the app:\n```tsx\nexport default App;\n```\nDone.";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "code_block_1");
        assert_eq!(artifacts[0].content, "export default App;\n");
    }

    #[test]
    fn test_three_blocks_in_order() {
        let text = "intro\n```js\nalpha\n```\nmiddle\n```\nbeta\n```\nmore ```python\ngamma\n``` end";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].name, "code_block_1");
        assert_eq!(artifacts[0].content, "alpha\n");
        assert_eq!(artifacts[1].name, "code_block_2");
        assert_eq!(artifacts[1].content, "beta\n");
        assert_eq!(artifacts[2].name, "code_block_3");
        assert_eq!(artifacts[2].content, "gamma\n");
    }

    #[test]
    fn test_content_kept_verbatim() {
        let text = "```\n  indented\n\n  lines  \n```";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].content, "  indented\n\n  lines  \n");
    }

    #[test]
    fn test_unterminated_block_ignored() {
        let text = "```js\nlet x = 1;";
        let artifacts = extract_code_blocks(text);
        assert!(artifacts.is_empty());
    }

    #[test]
    fn test_fence_without_newline_ignored() {
        let artifacts = extract_code_blocks("```js");
        assert!(artifacts.is_empty());
    }

    #[test]
    fn test_fallback_on_function() {
        let text = "function main() { return 1; }";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "main_code");
        assert_eq!(artifacts[0].content, text);
    }

    #[test]
    fn test_fallback_on_const() {
        let text = "const App = () => null;";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "main_code");
        assert_eq!(artifacts[0].content, text);
    }

    #[test]
    fn test_const_fallback_fires_alongside_blocks() {
        // The const arm is not gated on "no blocks found": text with both a
        // fenced block and a bare `const` yields both artifacts.
        let text = "const x = 1;\n```js\nlet y = 2;\n```\n";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "code_block_1");
        assert_eq!(artifacts[0].content, "let y = 2;\n");
        assert_eq!(artifacts[1].name, "main_code");
        assert_eq!(artifacts[1].content, text);
    }

    #[test]
    fn test_function_fallback_suppressed_by_blocks() {
        // Unlike `const`, the `function` arm is gated on zero blocks found.
        let text = "function helper() {}\n```js\nlet y = 2;\n```\n";
        let artifacts = extract_code_blocks(text);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "code_block_1");
    }
}
