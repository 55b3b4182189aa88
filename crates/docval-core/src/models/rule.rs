//! Typed validation rule.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::{Category, Condition};
use super::scalar_to_string;
use crate::compare::{check_operand, coerce_number};
use crate::error::RuleError;

/// A rule: compare the document's `category` value against `value` using
/// `condition`.
///
/// The condition always belongs to the category's condition set and the
/// value is always usable as an operand of the category. Both invariants are
/// checked on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct Rule {
    category: Category,
    condition: Condition,
    value: Value,
}

/// Wire form of a rule, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRule {
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub condition: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Rule {
    /// Build a rule, checking the condition and the value against the category.
    pub fn new(category: Category, condition: Condition, value: impl Into<Value>) -> Result<Self, RuleError> {
        let value = value.into();

        if !category.supports(condition) {
            return Err(RuleError::ConditionMismatch {
                category: category.to_string(),
                condition: condition.to_string(),
            });
        }

        if value.is_null() {
            return Err(RuleError::MissingField("value"));
        }

        check_operand(category, &value).map_err(|e| RuleError::InvalidValue {
            category: category.to_string(),
            value: scalar_to_string(&value),
            reason: e.to_string(),
        })?;

        Ok(Self {
            category,
            condition,
            value,
        })
    }

    /// Build a rule from the three fields a rule editor works with.
    ///
    /// Money values are stored as JSON numbers; every other category keeps
    /// the text as a string.
    pub fn from_parts(category: &str, condition: &str, value: &str) -> Result<Self, RuleError> {
        let category: Category = category.parse()?;
        let condition: Condition = condition.parse()?;
        let value = value.trim();

        let value = match category {
            Category::Money => match value.parse::<serde_json::Number>() {
                Ok(number) => Value::Number(number),
                Err(_) => Self::money_from_text(category, value)?,
            },
            _ => Value::from(value),
        };

        Self::new(category, condition, value)
    }

    /// Money text serde_json cannot read as a number literal, such as `+5`.
    fn money_from_text(category: Category, value: &str) -> Result<Value, RuleError> {
        let invalid = |reason: String| RuleError::InvalidValue {
            category: category.to_string(),
            value: value.to_string(),
            reason,
        };

        let number = coerce_number(&Value::from(value)).map_err(|e| invalid(e.to_string()))?;
        serde_json::Number::from_f64(number)
            .map(Value::Number)
            .ok_or_else(|| invalid("amount must be finite".to_string()))
    }

    /// Build a rule from a JSON object such as the oracle returns.
    ///
    /// No field is defaulted: a missing or null `category`, `condition` or
    /// `value` is an error.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, RuleError> {
        if map.is_empty() {
            return Err(RuleError::Empty);
        }

        Self::try_from(RawRule {
            category: map.get("category").cloned(),
            condition: map.get("condition").cloned(),
            value: map.get("value").cloned(),
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Expected value, exactly as given.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

fn required_str(field: Option<Value>, name: &'static str) -> Result<String, RuleError> {
    match field {
        None | Some(Value::Null) => Err(RuleError::MissingField(name)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(RuleError::MissingField(name)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(match name {
            "category" => RuleError::UnknownCategory(other.to_string()),
            _ => RuleError::UnknownCondition(other.to_string()),
        }),
    }
}

impl TryFrom<RawRule> for Rule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let category: Category = required_str(raw.category, "category")?.parse()?;
        let condition: Condition = required_str(raw.condition, "condition")?.parse()?;
        let value = raw.value.ok_or(RuleError::MissingField("value"))?;
        Rule::new(category, condition, value)
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        RawRule {
            category: Some(Value::from(rule.category.as_str())),
            condition: Some(Value::from(rule.condition.as_str())),
            value: Some(rule.value),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.category.label(),
            self.condition.symbol(),
            scalar_to_string(&self.value)
        )
    }
}
