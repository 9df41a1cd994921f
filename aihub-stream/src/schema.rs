//! Text delta extraction from the two known response shapes.
//!
//! Each shape gets its own pure extractor; [`extract_delta`] tries them in
//! fixed order and the first match wins. Supporting a third upstream shape
//! means adding a third extractor here, not branching logic in the parser.

use serde_json::Value;

/// A pure extractor for one known response shape.
type Extractor = fn(&Value) -> Option<&str>;

/// Ordered list of known shapes. First match wins.
const EXTRACTORS: &[Extractor] = &[message_content, choices_delta_content];

/// Extract the text delta contributed by one candidate frame, if any.
///
/// A frame matching neither shape (or carrying a non-string content field)
/// yields `None` — not an error; role-only and finish-reason frames
/// legitimately carry no content.
pub fn extract_delta(value: &Value) -> Option<&str> {
    EXTRACTORS.iter().find_map(|extract| extract(value))
}

/// "message" style: `{"message":{"content":"<text>"},...}`.
fn message_content(value: &Value) -> Option<&str> {
    value["message"]["content"].as_str()
}

/// "choices" style: `{"choices":[{"delta":{"content":"<text>"}}],...}`.
fn choices_delta_content(value: &Value) -> Option<&str> {
    value["choices"][0]["delta"]["content"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_shape_extracts_content() {
        let value = json!({"message": {"role": "assistant", "content": "Hello"}, "done": false});
        assert_eq!(extract_delta(&value), Some("Hello"));
    }

    #[test]
    fn choices_shape_extracts_content() {
        let value = json!({"choices": [{"delta": {"content": "Hi"}}]});
        assert_eq!(extract_delta(&value), Some("Hi"));
    }

    #[test]
    fn message_shape_wins_when_both_present() {
        let value = json!({
            "message": {"content": "A"},
            "choices": [{"delta": {"content": "B"}}],
        });
        assert_eq!(extract_delta(&value), Some("A"));
    }

    #[test]
    fn role_only_frame_yields_nothing() {
        let value = json!({"choices": [{"delta": {"role": "assistant"}}]});
        assert_eq!(extract_delta(&value), None);
    }

    #[test]
    fn finish_reason_frame_yields_nothing() {
        let value = json!({"choices": [{"delta": {}, "finish_reason": "stop"}]});
        assert_eq!(extract_delta(&value), None);
    }

    #[test]
    fn non_string_content_yields_nothing() {
        let value = json!({"message": {"content": 42}});
        assert_eq!(extract_delta(&value), None);
    }

    #[test]
    fn unrelated_object_yields_nothing() {
        let value = json!({"done": true, "eval_count": 10});
        assert_eq!(extract_delta(&value), None);
    }

    #[test]
    fn empty_content_is_still_a_match() {
        let value = json!({"message": {"content": ""}});
        assert_eq!(extract_delta(&value), Some(""));
    }
}
