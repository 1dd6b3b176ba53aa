use serde_json::Value;

use crate::error::{AppError, Result};

/// Parse a design spec out of a raw model reply.
///
/// Fence markers (```` ``` ```` and ```` ```json ````) are removed wherever
/// they appear. When the model answers with an array, its first element is
/// used. Anything that still fails to parse, or parses to something other
/// than an object, is reported with the raw reply attached. There is no
/// repair beyond fence stripping.
pub fn extract_spec(raw: &str) -> Result<Value> {
    let cleaned = strip_fences(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::warn!(error = %e, raw_len = raw.len(), "model reply is not valid JSON");
        AppError::SpecParse {
            raw: raw.to_string(),
        }
    })?;

    let value = match value {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    match value {
        Some(spec @ Value::Object(_)) => Ok(spec),
        _ => {
            tracing::warn!(raw_len = raw.len(), "model reply is not a JSON object");
            Err(AppError::SpecParse {
                raw: raw.to_string(),
            })
        }
    }
}

/// Remove markdown code-fence artifacts and surrounding whitespace.
pub fn strip_fences(raw: &str) -> String {
    let without_markers = raw.replace("```json", "").replace("```", "");
    without_markers
        .trim()
        .trim_end_matches('`')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_and_bare_replies_parse_the_same() {
        let bare = r#"{"width": 300, "height": 250, "texts": []}"#;
        let fenced = format!("```json\n{bare}\n```");
        assert_eq!(extract_spec(&fenced).unwrap(), extract_spec(bare).unwrap());
    }

    #[test]
    fn plain_fence_without_language_tag() {
        let reply = "```\n{\"design_brief\": \"미니멀\"}\n```\n";
        assert_eq!(
            extract_spec(reply).unwrap(),
            json!({ "design_brief": "미니멀" })
        );
    }

    #[test]
    fn single_element_array_yields_the_object() {
        let reply = r#"[{"width": 728, "height": 90}]"#;
        assert_eq!(
            extract_spec(reply).unwrap(),
            json!({ "width": 728, "height": 90 })
        );
    }

    #[test]
    fn stray_trailing_backticks_are_dropped() {
        assert_eq!(strip_fences("  {\"a\": 1}`` \n"), "{\"a\": 1}");
    }

    #[test]
    fn prose_reply_fails_with_raw_attached() {
        let reply = "죄송합니다, 요청을 이해하지 못했습니다.";
        match extract_spec(reply) {
            Err(AppError::SpecParse { raw }) => assert_eq!(raw, reply),
            other => panic!("expected SpecParse, got {other:?}"),
        }
    }

    #[test]
    fn scalar_replies_fail_with_raw_attached() {
        for reply in ["\"hello\"", "42", "```json\ntrue\n```", "[\"only text\"]", "null"] {
            match extract_spec(reply) {
                Err(AppError::SpecParse { raw }) => assert_eq!(raw, reply),
                other => panic!("expected SpecParse for {reply:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_array_is_a_parse_failure() {
        assert!(matches!(
            extract_spec("[]"),
            Err(AppError::SpecParse { .. })
        ));
    }
}
