//! Best-effort JSON reformatting.
//!
//! Both functions are lenient by contract: text that does not parse as JSON
//! is returned unchanged, so partially-typed input is never rejected, and
//! empty input yields an empty string rather than an error or a literal
//! "null". Object key order is preserved (serde_json `preserve_order`).

use serde_json::Value;

/// Reformats `text` with 2-space indentation if it parses as JSON.
pub fn try_pretty(text: &str) -> String {
    reformat(text, |value| serde_json::to_string_pretty(value))
}

/// Reformats `text` without whitespace if it parses as JSON.
///
/// Used when re-deriving the compact token form right after a manual edit,
/// so hand-prettified JSON does not bloat the encoded segment.
pub fn try_compact(text: &str) -> String {
    reformat(text, |value| serde_json::to_string(value))
}

fn reformat(text: &str, serialize: impl Fn(&Value) -> serde_json::Result<String>) -> String {
    if text.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => serialize(&value).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}
