//! Numeric comparison for monetary amounts.

use serde_json::Value;

use super::{unsupported, Comparator};
use crate::error::CompareError;
use crate::models::{Category, Condition};

/// Read a JSON scalar as a float.
///
/// Numbers are taken as-is; strings must parse as a float once trimmed.
/// Currency symbols and thousands separators are not stripped here: the
/// extraction prompt asks the oracle for bare numbers, and anything else is
/// reported rather than guessed at.
pub fn coerce_number(value: &Value) -> Result<f64, CompareError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CompareError::NotANumber(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CompareError::NotANumber(format!("'{}'", s))),
        other => Err(CompareError::InvalidOperand {
            kind: "money",
            value: other.to_string(),
        }),
    }
}

/// Compare two amounts with IEEE-754 semantics. Equality is exact.
pub fn compare_numbers(condition: Condition, actual: f64, expected: f64) -> Result<bool, CompareError> {
    match condition {
        Condition::Equals => Ok(actual == expected),
        Condition::NotEquals => Ok(actual != expected),
        Condition::GreaterThan => Ok(actual > expected),
        Condition::LessThan => Ok(actual < expected),
        other => Err(unsupported(Category::Money, other)),
    }
}

/// Comparator for the money category.
pub struct NumericComparator;

impl Comparator for NumericComparator {
    type Operand = f64;

    fn category(&self) -> Category {
        Category::Money
    }

    fn coerce(&self, value: &Value) -> Result<f64, CompareError> {
        coerce_number(value)
    }

    fn compare(&self, condition: Condition, actual: &f64, expected: &f64) -> Result<bool, CompareError> {
        compare_numbers(condition, *actual, *expected)
    }
}
