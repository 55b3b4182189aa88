//! Category-specific comparators used by the validator.

pub mod numeric;
pub mod patterns;
pub mod temporal;
pub mod text;

pub use numeric::{coerce_number, compare_numbers, NumericComparator};
pub use temporal::{
    compare_dates, compare_times, parse_instant, parse_temporal, parse_time_of_day,
    DateComparator, Temporal, TimeComparator,
};
pub use text::{coerce_text, compare_text, TextComparator};

use serde_json::Value;

use crate::error::CompareError;
use crate::models::{Category, Condition};

/// Trait for category comparators.
pub trait Comparator {
    /// Typed operand both sides are coerced to.
    type Operand;

    /// Category this comparator serves.
    fn category(&self) -> Category;

    /// Coerce a JSON scalar into an operand.
    fn coerce(&self, value: &Value) -> Result<Self::Operand, CompareError>;

    /// Apply `condition` to two coerced operands.
    fn compare(
        &self,
        condition: Condition,
        actual: &Self::Operand,
        expected: &Self::Operand,
    ) -> Result<bool, CompareError>;

    /// Coerce both sides (actual first) and compare.
    fn evaluate(&self, condition: Condition, actual: &Value, expected: &Value) -> Result<bool, CompareError> {
        let actual = self.coerce(actual)?;
        let expected = self.coerce(expected)?;
        self.compare(condition, &actual, &expected)
    }
}

/// Dispatch to the comparator for `category`.
pub fn compare_values(
    category: Category,
    condition: Condition,
    actual: &Value,
    expected: &Value,
) -> Result<bool, CompareError> {
    match category {
        Category::Money => NumericComparator.evaluate(condition, actual, expected),
        Category::Date => DateComparator.evaluate(condition, actual, expected),
        Category::Time => TimeComparator.evaluate(condition, actual, expected),
        Category::Text => TextComparator.evaluate(condition, actual, expected),
    }
}

/// Check that a value can be used as an operand of `category`.
pub fn check_operand(category: Category, value: &Value) -> Result<(), CompareError> {
    match category {
        Category::Money => NumericComparator.coerce(value).map(|_| ()),
        Category::Date => DateComparator.coerce(value).map(|_| ()),
        Category::Time => TimeComparator.coerce(value).map(|_| ()),
        Category::Text => TextComparator.coerce(value).map(|_| ()),
    }
}

pub(crate) fn unsupported(category: Category, condition: Condition) -> CompareError {
    CompareError::UnsupportedCondition {
        category: category.as_str().to_string(),
        condition: condition.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_by_category() {
        assert!(compare_values(Category::Money, Condition::GreaterThan, &json!("150"), &json!(100)).unwrap());
        assert!(compare_values(Category::Date, Condition::AfterDate, &json!("2025-03-01"), &json!("2025-01-01")).unwrap());
        assert!(compare_values(Category::Time, Condition::LessThan, &json!("08:00:00"), &json!("09:00:00")).unwrap());
        assert!(compare_values(Category::Text, Condition::Contains, &json!("ACME Ltd"), &json!("acme")).unwrap());
    }

    #[test]
    fn test_actual_is_coerced_first() {
        let err = compare_values(Category::Money, Condition::Equals, &json!("abc"), &json!("xyz")).unwrap_err();
        assert_eq!(err, CompareError::NotANumber("'abc'".to_string()));
    }

    #[test]
    fn test_check_operand() {
        assert!(check_operand(Category::Money, &json!("12.50")).is_ok());
        assert!(check_operand(Category::Money, &json!("twelve")).is_err());
        assert!(check_operand(Category::Date, &json!("2025-01-01")).is_ok());
        assert!(check_operand(Category::Date, &json!("01/02/2025")).is_err());
        assert!(check_operand(Category::Time, &json!("09:00:00")).is_ok());
        assert!(check_operand(Category::Text, &json!(null)).is_err());
    }
}
