//! Answer extraction for a research service whose response shape is loose.
//!
//! Each extractor looks at the decoded body and either produces non-empty
//! text or passes. They are tried in order; the first hit wins.

use serde_json::Value;

/// Key the service documents for the answer text.
pub const ANSWER_KEY: &str = "answer";

/// Substrings that mark a key as likely holding the answer.
const FUZZY_KEY_MARKERS: [&str; 3] = ["response", "text", "content"];

pub type AnswerExtractor = fn(&Value) -> Option<String>;

/// Extractors in priority order, named for logging.
pub const EXTRACTORS: &[(&str, AnswerExtractor)] = &[
    ("bare_string", bare_string),
    ("data_field", data_field),
    ("answer_key", answer_key),
    ("fuzzy_key", fuzzy_key),
    ("result_or_output", result_or_output),
];

/// Run the extractor chain against a decoded body.
pub fn extract_answer(body: &Value) -> Option<String> {
    EXTRACTORS.iter().find_map(|(name, extract)| {
        let text = extract(body)?;
        tracing::debug!(extractor = *name, chars = text.len(), "Research answer extracted");
        Some(text)
    })
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A string as-is; any other non-null value as its JSON text.
fn text_or_json(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        other => non_empty(&other.to_string()),
    }
}

fn bare_string(body: &Value) -> Option<String> {
    body.as_str().and_then(non_empty)
}

fn data_field(body: &Value) -> Option<String> {
    body.get("data").and_then(text_or_json)
}

fn answer_key(body: &Value) -> Option<String> {
    body.get(ANSWER_KEY)?.as_str().and_then(non_empty)
}

fn fuzzy_key(body: &Value) -> Option<String> {
    body.as_object()?.iter().find_map(|(key, value)| {
        let key = key.to_ascii_lowercase();
        if FUZZY_KEY_MARKERS.iter().any(|marker| key.contains(marker)) {
            value.as_str().and_then(non_empty)
        } else {
            None
        }
    })
}

fn result_or_output(body: &Value) -> Option<String> {
    ["result", "output"]
        .iter()
        .find_map(|key| body.get(*key).and_then(text_or_json))
}
