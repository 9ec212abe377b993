//! Pulls the JSON payload out of free-form completion text.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("No valid JSON block found.")]
pub struct ExtractionError;

/// Strips code fences and returns the widest `{ ... }` span of the remaining text.
///
/// The span runs from the first `{` to the last `}`, so prose around a single object
/// is tolerated. Two separate objects are captured together with whatever sits
/// between them; callers see that as a JSON parse failure.
pub fn extract_json_block(text: &str) -> Result<&str, ExtractionError> {
    let text = strip_json_fences(text);

    let start = text.find('{').ok_or(ExtractionError)?;
    let end = text.rfind('}').ok_or(ExtractionError)?;
    if end < start {
        return Err(ExtractionError);
    }

    Ok(&text[start..=end])
}

/// Strips a leading ```json / ``` marker and a trailing ``` marker if present.
fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(stripped) = text.strip_prefix("```") {
        let stripped = stripped.strip_prefix("json").unwrap_or(stripped);
        text = stripped.trim();
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped.trim_end();
    }
    text
}
