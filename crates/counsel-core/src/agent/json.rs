use super::AgentError;
use serde_json::Value;

/// Extracts a JSON object from free-form model output.
///
/// Tries the whole text first, then the outermost `{ ... }` block (models
/// like to wrap JSON in prose or code fences).
pub fn parse_json_block(text: &str) -> Result<Value, AgentError> {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(value);
    }

    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => {
            match serde_json::from_str::<Value>(&text[start..=end]) {
                Ok(value @ Value::Object(_)) => Ok(value),
                Ok(_) => Err(AgentError::ParseError("JSON block is not an object".into())),
                Err(err) => Err(AgentError::ParseError(format!("invalid JSON block: {err}"))),
            }
        }
        _ => Err(AgentError::ParseError("no JSON object found".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let value = parse_json_block(r#"{"a": 1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_fenced_object() {
        let text = "Here you go:\n```json\n{\"emotion_class\": \"슬픔\"}\n```";
        let value = parse_json_block(text).unwrap();
        assert_eq!(value["emotion_class"], "슬픔");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            parse_json_block("[1, 2, 3]"),
            Err(AgentError::ParseError(_))
        ));
        assert!(matches!(
            parse_json_block("no json here"),
            Err(AgentError::ParseError(_))
        ));
        assert!(matches!(
            parse_json_block("{ broken"),
            Err(AgentError::ParseError(_))
        ));
    }
}
