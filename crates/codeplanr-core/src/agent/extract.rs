//! Pulling a JSON array out of free-form model output.
//!
//! Models wrap JSON in prose or code fences, so the array is located by
//! bracket balancing before it is parsed. String literals are skipped while
//! balancing so brackets inside descriptions do not end the span early.

use serde_json::Value;

use crate::error::PlanGenerationError;

/// Extracts the JSON array from a model response.
///
/// The first bracket-balanced `[...]` span is tried first; when there is no
/// such span, or it does not parse, the whole trimmed response is parsed
/// instead. A whole response that is an object with a `steps` array is also
/// accepted.
///
/// ```rust
/// use codeplanr_core::agent::extract_json_array;
///
/// let items = extract_json_array("Here you go:\n```json\n[{\"a\": 1}]\n```").unwrap();
/// assert_eq!(items.len(), 1);
/// assert!(extract_json_array("no json here").is_err());
/// ```
pub fn extract_json_array(text: &str) -> Result<Vec<Value>, PlanGenerationError> {
    if let Some(span) = find_array_span(text) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(span) {
            return Ok(items);
        }
    }

    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(Value::Object(mut object)) => match object.remove("steps") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(parse_error("expected a JSON array of steps")),
        },
        Ok(_) => Err(parse_error("expected a JSON array of steps")),
        Err(e) => Err(parse_error(e.to_string())),
    }
}

fn parse_error(reason: impl Into<String>) -> PlanGenerationError {
    PlanGenerationError::Parse {
        reason: reason.into(),
    }
}

/// Returns the first bracket-balanced `[...]` span of `text`.
fn find_array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: &str = r#"[
        {"description": "Create addition.cpp file", "action": "create_file", "file": "addition.cpp"},
        {"description": "Write C++ code for addition", "action": "write_code", "file": "addition.cpp"}
    ]"#;

    #[test]
    fn test_bare_array() {
        let items = extract_json_array(STEPS).expect("bare array should parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["file"], "addition.cpp");
    }

    #[test]
    fn test_fenced_array() {
        let response = format!("```json\n{STEPS}\n```");
        let items = extract_json_array(&response).expect("fenced array should parse");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_array_surrounded_by_prose() {
        let response = format!("Sure! Here is the plan:\n{STEPS}\nLet me know if you need more.");
        let items = extract_json_array(&response).expect("prose-wrapped array should parse");
        assert_eq!(items[1]["action"], "write_code");
    }

    #[test]
    fn test_brackets_inside_strings_do_not_end_span() {
        let response = r#"Plan: [{"description": "Handle ] and [ in input \"[x]\"", "file": "a.py"}] done"#;
        let items = extract_json_array(response).expect("strings should be skipped");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["file"], "a.py");
    }

    #[test]
    fn test_object_with_steps_array() {
        let response = r#"{"task": "x", "steps": [{"description": "Write code", "file": "x.rs"}]}"#;
        let items = extract_json_array(response).expect("steps object should parse");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_garbage_fails_cleanly() {
        for garbage in ["", "I cannot help with that.", "[not json at all", "{\"a\": 1}", "42"] {
            let err = extract_json_array(garbage).unwrap_err();
            assert!(matches!(err, PlanGenerationError::Parse { .. }), "{garbage:?}");
        }
    }

    #[test]
    fn test_unbalanced_span_falls_back_to_whole_text() {
        assert!(find_array_span("[[1, 2]").is_none());
        assert_eq!(find_array_span("x [1, [2]] y"), Some("[1, [2]]"));
    }
}
