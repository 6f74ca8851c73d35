//! JSON Extraction
//!
//! Turns raw model text into a JSON object.
//!
//! Models occasionally wrap the requested JSON in commentary or markdown
//! fences despite being told not to. A single recovery pass retries on the
//! substring between the first `{` and the last `}`; if that still fails to
//! parse the error is returned, never a partial value.

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::llm::ERROR_PREVIEW_CHARS;
use crate::types::{Result, SectorError, take_chars};

// =============================================================================
// Convenience Functions
// =============================================================================

/// Parse model output into a JSON object, with brace-extraction recovery
pub fn extract_json_object(text: &str) -> Result<Value> {
    extract_json_with_recovery_status(text).map(|(value, _)| value)
}

/// Parse model output, also reporting whether the recovery pass was needed
pub fn extract_json_with_recovery_status(text: &str) -> Result<(Value, bool)> {
    let trimmed = text.trim();

    let (value, recovered) = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => (value, false),
        Err(first_err) => {
            debug!("Direct JSON parse failed ({}), trying brace extraction", first_err);
            let candidate = brace_span(trimmed).ok_or_else(|| malformed(&first_err, trimmed))?;
            let value =
                serde_json::from_str::<Value>(candidate).map_err(|e| malformed(&e, trimmed))?;
            warn!("Model output contained text around the JSON object; extracted it");
            (value, true)
        }
    };

    if !value.is_object() {
        return Err(SectorError::MalformedJson {
            message: format!("expected a JSON object, got {}", json_kind(&value)),
            preview: preview(trimmed),
        });
    }

    Ok((value, recovered))
}

/// Substring from the first `{` to the last `}` inclusive
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn malformed(err: &serde_json::Error, text: &str) -> SectorError {
    SectorError::MalformedJson {
        message: err.to_string(),
        preview: preview(text),
    }
}

fn preview(text: &str) -> String {
    let clipped = take_chars(text, ERROR_PREVIEW_CHARS);
    if clipped.len() < text.len() {
        format!("{}...", clipped)
    } else {
        clipped.to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
