use crate::error::{AiError, Result};

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Strip markdown code fences from a model response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parse completion content as a JSON object, tolerating code fences.
pub fn parse_json_content(content: &str) -> Result<serde_json::Value> {
    let body = strip_code_blocks(content);
    if body.is_empty() {
        return Err(AiError::Empty);
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(AiError::Parse(format!(
            "expected a JSON object, got: {}",
            truncate_to_char_boundary(body, 200)
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        let text = "Fonds élite";
        let truncated = truncate_to_char_boundary(text, 8);
        assert!(truncated.len() <= 8);
        assert!(text.starts_with(truncated));
        assert_eq!(truncate_to_char_boundary("short", 100), "short");
    }

    #[test]
    fn strips_fenced_json() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }

    #[test]
    fn parses_fenced_object() {
        let value = parse_json_content("```json\n{\"hq_country\": \"US\"}\n```").unwrap();
        assert_eq!(value["hq_country"], "US");
    }

    #[test]
    fn rejects_non_object_content() {
        assert!(matches!(parse_json_content("[1, 2]"), Err(AiError::Parse(_))));
        assert!(matches!(parse_json_content("   "), Err(AiError::Empty)));
        assert!(matches!(parse_json_content("not json"), Err(AiError::Parse(_))));
    }
}
