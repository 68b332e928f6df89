//! Best-effort JSON extraction from free-form model replies.
//!
//! The wizard collaborators ask for JSON but receive prose around it. This
//! module locates the first balanced `{...}` region (string- and
//! escape-aware) and hands it to serde. Failure to locate or parse the
//! region is a terminal error for the call that needed it.

use serde::de::DeserializeOwned;

use crate::error::{BuildrError, Result};

/// Locate the first balanced `{...}` region in `text`.
///
/// Braces inside JSON strings do not count toward nesting, and escaped
/// quotes do not close a string.
pub fn extract_json_object(text: &str) -> Result<&str> {
    let start = text.find('{').ok_or(BuildrError::JsonNotFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    // Opening brace never closed
    Err(BuildrError::JsonNotFound)
}

/// Extract the first balanced JSON object from `text` and deserialize it.
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> Result<T> {
    let region = extract_json_object(text)?;
    Ok(serde_json::from_str(region)?)
}
