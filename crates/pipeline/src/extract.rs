//! Best-effort structured extraction from free-form model output
//!
//! Models wrap JSON in prose or markdown fences often enough that strict
//! parsing of the whole generation is useless. The extraction here is
//! deliberately simple: locate the widest `{...}` span (or the first `[...]`
//! span for arrays) and hand it to the JSON parser. There is no repair and no
//! partial recovery — if the span does not parse, the caller fails with the
//! raw text attached.

use once_cell::sync::Lazy;
use regex::Regex;

/// The widest object span: first `{` to last `}`, inclusive.
///
/// Returns `None` when the text contains no `{`, or the braces are in the
/// wrong order.
pub fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

static ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    // First bracketed span with no nested brackets; enough for a flat array
    // of strings.
    Regex::new(r"\[[^\[\]]*\]").expect("array pattern is valid")
});

/// The first flat `[...]` span found by pattern search.
pub fn first_json_array(text: &str) -> Option<&str> {
    ARRAY_RE.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_span_ignores_surrounding_prose() {
        let text = r#"Here is the result: {"a": 1} Thanks!"#;
        assert_eq!(json_object_span(text), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_object_span_covers_nested_objects() {
        let text = r#"```json
{"summary": {"criticalIssues": 1}, "clauses": []}
```"#;
        let span = json_object_span(text).unwrap();
        assert!(span.starts_with('{') && span.ends_with('}'));
        assert!(serde_json::from_str::<serde_json::Value>(span).is_ok());
    }

    #[test]
    fn test_no_brace_yields_none() {
        assert_eq!(json_object_span("no json here"), None);
        assert_eq!(json_object_span("} backwards {"), None);
    }

    #[test]
    fn test_first_array_found_in_prose() {
        let text = r#"The matching labels are ["Employment Law", "Contract Law"] as requested."#;
        assert_eq!(
            first_json_array(text),
            Some(r#"["Employment Law", "Contract Law"]"#)
        );
    }

    #[test]
    fn test_empty_array_found() {
        assert_eq!(first_json_array("answer: []"), Some("[]"));
    }

    #[test]
    fn test_no_array_yields_none() {
        assert_eq!(first_json_array("nothing bracketed"), None);
    }
}
