//! Rule evaluation against extracted data.

use serde_json::Value;
use tracing::debug;

use crate::compare::compare_values;
use crate::models::{ExtractedData, Rule, ValidationOutcome};

/// Message for an absent rule or empty data.
pub const MISSING_RULE_OR_DATA: &str = "Missing rule or data";

/// Evaluate one rule against extracted data.
///
/// Every problem is reported in the outcome; this never panics or returns
/// an error. Branches, in order:
/// 1. no rule, or no data at all: `Error`
/// 2. no value (or `null`) for the rule's category: `Error`
/// 3. operands that cannot be coerced, or a condition foreign to the
///    category: `Error` carrying the comparator's message
/// 4. otherwise `Pass` or `Fail`
///
/// Present-but-falsy values such as `0` or `""` are compared like any other.
pub fn validate(rule: Option<&Rule>, data: &ExtractedData) -> ValidationOutcome {
    let rule = match rule {
        Some(rule) if !data.is_empty() => rule,
        _ => return ValidationOutcome::error(rule, None, MISSING_RULE_OR_DATA),
    };

    let category = rule.category();
    let actual = match data.get(category.as_str()) {
        None | Some(Value::Null) => {
            return ValidationOutcome::error(Some(rule), None, format!("No {} in document", category));
        }
        Some(actual) => actual,
    };

    match compare_values(category, rule.condition(), actual, rule.value()) {
        Ok(passed) => {
            debug!("{} -> {}", rule, if passed { "pass" } else { "fail" });
            ValidationOutcome::evaluated(rule, passed, actual)
        }
        Err(e) => {
            debug!("{} -> error: {}", rule, e);
            ValidationOutcome::error(Some(rule), Some(actual), e.to_string())
        }
    }
}

/// Evaluate every rule independently, in order.
pub fn validate_all(rules: &[Rule], data: &ExtractedData) -> Vec<ValidationOutcome> {
    rules.iter().map(|rule| validate(Some(rule), data)).collect()
}
