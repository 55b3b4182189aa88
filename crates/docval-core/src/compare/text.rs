//! Case-insensitive text comparison.

use serde_json::Value;

use super::{unsupported, Comparator};
use crate::error::CompareError;
use crate::models::{Category, Condition};

/// Render a JSON scalar as text. Numbers and booleans use their JSON spelling.
pub fn coerce_text(value: &Value) -> Result<String, CompareError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CompareError::InvalidOperand {
            kind: "text",
            value: other.to_string(),
        }),
    }
}

/// Compare two strings after lower-casing both.
///
/// `contains` tests whether `expected` occurs in `actual`.
pub fn compare_text(condition: Condition, actual: &str, expected: &str) -> Result<bool, CompareError> {
    let actual = actual.to_lowercase();
    let expected = expected.to_lowercase();

    match condition {
        Condition::Equals => Ok(actual == expected),
        Condition::NotEquals => Ok(actual != expected),
        Condition::Contains => Ok(actual.contains(&expected)),
        Condition::NotContains => Ok(!actual.contains(&expected)),
        other => Err(unsupported(Category::Text, other)),
    }
}

/// Comparator for the text category.
pub struct TextComparator;

impl Comparator for TextComparator {
    type Operand = String;

    fn category(&self) -> Category {
        Category::Text
    }

    fn coerce(&self, value: &Value) -> Result<String, CompareError> {
        coerce_text(value)
    }

    fn compare(&self, condition: Condition, actual: &String, expected: &String) -> Result<bool, CompareError> {
        compare_text(condition, actual, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_insensitive() {
        assert!(compare_text(Condition::Contains, "Invoice ABC", "abc").unwrap());
        assert!(compare_text(Condition::Equals, "ACME Corp", "acme corp").unwrap());
        assert!(!compare_text(Condition::NotEquals, "ACME Corp", "acme corp").unwrap());
        assert!(compare_text(Condition::NotContains, "Invoice ABC", "xyz").unwrap());
    }

    #[test]
    fn test_contains_direction() {
        // expected must be inside actual, not the other way round
        assert!(!compare_text(Condition::Contains, "abc", "Invoice ABC").unwrap());
        assert!(compare_text(Condition::Contains, "anything", "").unwrap());
    }

    #[test]
    fn test_scalars_render_as_text() {
        let comparator = TextComparator;
        assert!(comparator
            .evaluate(Condition::Equals, &json!(1234), &json!("1234"))
            .unwrap());
        assert!(comparator
            .evaluate(Condition::Contains, &json!("flag: TRUE"), &json!(true))
            .unwrap());
        assert!(comparator.coerce(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_foreign_condition_is_error() {
        assert!(compare_text(Condition::GreaterThan, "b", "a").is_err());
    }
}
