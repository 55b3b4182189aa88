//! Validation outcomes and their summary.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rule::Rule;
use super::scalar_to_string;

/// Tri-state result of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The comparison held.
    Pass,
    /// The rule was usable and the comparison did not hold.
    Fail,
    /// The rule or the data was unusable.
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Error => "ERROR",
        })
    }
}

/// Outcome of evaluating one rule against extracted data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    rule: Option<Rule>,
    status: Status,
    #[serde(rename = "expected_value")]
    expected: Option<Value>,
    #[serde(rename = "actual_value")]
    actual: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ValidationOutcome {
    pub(crate) fn evaluated(rule: &Rule, passed: bool, actual: &Value) -> Self {
        Self {
            rule: Some(rule.clone()),
            status: if passed { Status::Pass } else { Status::Fail },
            expected: Some(rule.value().clone()),
            actual: Some(actual.clone()),
            message: None,
        }
    }

    pub(crate) fn error(rule: Option<&Rule>, actual: Option<&Value>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.cloned(),
            status: Status::Error,
            expected: rule.map(|r| r.value().clone()),
            actual: actual.cloned(),
            message: Some(message.into()),
        }
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn expected(&self) -> Option<&Value> {
        self.expected.as_ref()
    }

    pub fn actual(&self) -> Option<&Value> {
        self.actual.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }

    /// One-line sentence for reports, e.g. `FAIL: 50 is not greater than 100`.
    pub fn describe(&self) -> String {
        let phrase = self
            .rule
            .as_ref()
            .map(|r| r.condition().phrase())
            .unwrap_or_default();
        let actual = self.actual.as_ref().map_or_else(|| "N/A".to_string(), scalar_to_string);
        let expected = self.expected.as_ref().map_or_else(|| "N/A".to_string(), scalar_to_string);

        match self.status {
            Status::Pass => format!("PASS: {} is {} {}", actual, phrase, expected),
            Status::Fail => format!("FAIL: {} is not {} {}", actual, phrase, expected),
            Status::Error => format!("ERROR: {}", self.message.as_deref().unwrap_or("Unknown error")),
        }
    }
}

/// Counts over a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl ValidationSummary {
    pub fn from_outcomes(outcomes: &[ValidationOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome.status() {
                Status::Pass => summary.passed += 1,
                Status::Fail => summary.failed += 1,
                Status::Error => summary.errors += 1,
            }
        }

        summary
    }

    /// Percentage of outcomes that passed (0 when there are none).
    pub fn pass_rate(&self) -> f64 {
        percentage(self.passed, self.total)
    }

    /// Percentage of outcomes that failed (0 when there are none).
    pub fn fail_rate(&self) -> f64 {
        percentage(self.failed, self.total)
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rules: {} passed ({:.1}%), {} failed ({:.1}%), {} errors",
            self.total,
            self.passed,
            self.pass_rate(),
            self.failed,
            self.fail_rate(),
            self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Condition};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn money_rule() -> Rule {
        Rule::new(Category::Money, Condition::GreaterThan, 100).unwrap()
    }

    #[test]
    fn test_describe() {
        let rule = money_rule();
        assert_eq!(
            ValidationOutcome::evaluated(&rule, false, &json!("50")).describe(),
            "FAIL: 50 is not greater than 100"
        );
        assert_eq!(
            ValidationOutcome::evaluated(&rule, true, &json!(150)).describe(),
            "PASS: 150 is greater than 100"
        );
        assert_eq!(
            ValidationOutcome::error(Some(&rule), None, "No money in document").describe(),
            "ERROR: No money in document"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let rule = money_rule();
        let outcome = ValidationOutcome::evaluated(&rule, false, &json!("50"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "rule": {"category": "money", "condition": "greater_than", "value": 100},
                "status": "FAIL",
                "expected_value": 100,
                "actual_value": "50"
            })
        );

        let outcome = ValidationOutcome::error(None, None, "Missing rule or data");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "rule": null,
                "status": "ERROR",
                "expected_value": null,
                "actual_value": null,
                "message": "Missing rule or data"
            })
        );
    }

    #[test]
    fn test_summary() {
        let rule = money_rule();
        let outcomes = vec![
            ValidationOutcome::evaluated(&rule, true, &json!(150)),
            ValidationOutcome::evaluated(&rule, true, &json!(200)),
            ValidationOutcome::evaluated(&rule, false, &json!(50)),
            ValidationOutcome::error(Some(&rule), None, "No money in document"),
        ];

        let summary = ValidationSummary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            ValidationSummary {
                total: 4,
                passed: 2,
                failed: 1,
                errors: 1
            }
        );
        assert_eq!(summary.pass_rate(), 50.0);
        assert_eq!(summary.fail_rate(), 25.0);
        assert!(!summary.all_passed());
        assert_eq!(
            summary.to_string(),
            "4 rules: 2 passed (50.0%), 1 failed (25.0%), 1 errors"
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = ValidationSummary::from_outcomes(&[]);
        assert_eq!(summary.pass_rate(), 0.0);
        assert!(summary.all_passed());
    }
}
