//! Lenient JSON object extraction from oracle output.

use serde_json::{Map, Value};
use tracing::debug;

/// Extract the JSON object embedded in `raw`.
///
/// Takes everything from the first `{` to the last `}` and parses it. Any
/// failure (no braces, braces in the wrong order, invalid JSON) yields an
/// empty map, which callers treat as "nothing extracted".
pub fn extract_json(raw: &str) -> Map<String, Value> {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        debug!("No JSON object in oracle response ({} chars)", raw.len());
        return Map::new();
    };

    if end < start {
        debug!("Unbalanced braces in oracle response");
        return Map::new();
    }

    match serde_json::from_str::<Map<String, Value>>(&raw[start..=end]) {
        Ok(map) => map,
        Err(e) => {
            debug!("Oracle response is not valid JSON: {}", e);
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_noise_around_object() {
        assert_eq!(extract_json("noise {\"a\":1} noise"), object(json!({"a": 1})));
    }

    #[test]
    fn test_no_json() {
        assert_eq!(extract_json("no json here"), Map::new());
        assert_eq!(extract_json(""), Map::new());
    }

    #[test]
    fn test_prose_wrapped_completion() {
        let raw = r#"Sure! Here is the JSON you asked for:

```json
{
    "category": "money",
    "condition": "greater_than",
    "value": 1000
}
```
Let me know if you need anything else."#;

        assert_eq!(
            extract_json(raw),
            object(json!({"category": "money", "condition": "greater_than", "value": 1000}))
        );
    }

    #[test]
    fn test_nested_object_spans_to_last_brace() {
        assert_eq!(
            extract_json("x {\"a\": {\"b\": 2}} y"),
            object(json!({"a": {"b": 2}}))
        );
    }

    #[test]
    fn test_two_objects_is_soft_failure() {
        // first '{' to last '}' covers both objects, which is not one document
        assert_eq!(extract_json("{\"a\":1} and {\"b\":2}"), Map::new());
    }

    #[test]
    fn test_malformed_json() {
        assert_eq!(extract_json("{\"money\": 12,}"), Map::new());
        assert_eq!(extract_json("{\"money\": }"), Map::new());
        assert_eq!(extract_json("} backwards {"), Map::new());
        assert_eq!(extract_json("only an opening {"), Map::new());
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(extract_json("{}"), Map::new());
    }
}
