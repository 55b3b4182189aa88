//! Oracle-backed rule parser.

use docval_oracle::TextOracle;
use tracing::{debug, warn};

use crate::error::{DocvalError, Result, RuleError};
use crate::extraction::{extract_json, prompts::rule_prompt};
use crate::models::Rule;

/// Turns rule statements such as "Invoice date must be after 2025-01-01"
/// into typed [`Rule`]s.
pub struct RuleParser<O> {
    oracle: O,
}

impl<O: TextOracle> RuleParser<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Parse a rule, reporting why it was rejected.
    pub fn try_parse_rule(&self, text: &str) -> Result<Rule> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RuleError::Empty.into());
        }

        let response = self.oracle.complete(&rule_prompt(text))?;
        let map = extract_json(&response);
        debug!("Rule parse produced {} fields", map.len());

        Ok(Rule::from_json_map(&map)?)
    }

    /// Parse a rule; `None` means "rejected, ask the user to rephrase".
    ///
    /// Oracle failures, unusable completions and incomplete or invalid rule
    /// objects all end up here as `None`.
    pub fn parse_rule(&self, text: &str) -> Option<Rule> {
        match self.try_parse_rule(text) {
            Ok(rule) => Some(rule),
            Err(DocvalError::Oracle(e)) => {
                warn!("Rule parsing failed on {}: {}", self.oracle.name(), e);
                None
            }
            Err(e) => {
                debug!("Rule rejected: {}", e);
                None
            }
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Condition};
    use docval_oracle::{FnOracle, OracleError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn canned(response: &'static str) -> RuleParser<FnOracle<impl Fn(&str) -> docval_oracle::Result<String> + Send + Sync>> {
        RuleParser::new(FnOracle::new(move |_: &str| Ok(response.to_string())))
    }

    #[test]
    fn test_parses_money_rule() {
        let parser = canned(r#"{"category": "money", "condition": "greater_than", "value": 1000}"#);
        let rule = parser.parse_rule("Total must exceed 1000").unwrap();

        assert_eq!(rule.category(), Category::Money);
        assert_eq!(rule.condition(), Condition::GreaterThan);
        assert_eq!(rule.value(), &json!(1000));
    }

    #[test]
    fn test_parses_prose_wrapped_rule() {
        let parser = canned(
            "Here is the rule:\n{\"category\": \"date\", \"condition\": \"after_date\", \"value\": \"2025-01-01\"}\nHope that helps!",
        );
        let rule = parser.parse_rule("Invoice date must be after 2025-01-01").unwrap();
        assert_eq!(rule.condition(), Condition::AfterDate);
    }

    #[test]
    fn test_incomplete_object_is_none() {
        let parser = canned(r#"{"condition": "greater_than", "value": 1000}"#);
        assert_eq!(parser.parse_rule("more than 1000"), None);

        let parser = canned(r#"{"category": "money", "value": 1000}"#);
        assert_eq!(parser.parse_rule("more than 1000"), None);

        let parser = canned("{}");
        assert_eq!(parser.parse_rule("more than 1000"), None);
    }

    #[test]
    fn test_mismatched_condition_is_none() {
        let parser = canned(r#"{"category": "money", "condition": "before_date", "value": 1000}"#);
        let err = parser.try_parse_rule("x").unwrap_err();
        assert!(matches!(
            err,
            DocvalError::Rule(RuleError::ConditionMismatch { .. })
        ));
        assert_eq!(parser.parse_rule("x"), None);
    }

    #[test]
    fn test_garbage_is_none() {
        let parser = canned("I'm sorry, I can't do that.");
        assert!(matches!(
            parser.try_parse_rule("x"),
            Err(DocvalError::Rule(RuleError::Empty))
        ));
        assert_eq!(parser.parse_rule("x"), None);
    }

    #[test]
    fn test_oracle_failure_is_none() {
        let parser = RuleParser::new(FnOracle::new(|_: &str| {
            Err(OracleError::ExitStatus {
                status: "exit status: 1".to_string(),
                stderr: "model not found".to_string(),
            })
        }));
        assert!(matches!(parser.try_parse_rule("x"), Err(DocvalError::Oracle(_))));
        assert_eq!(parser.parse_rule("x"), None);
    }

    #[test]
    fn test_blank_rule_skips_oracle() {
        let parser = RuleParser::new(FnOracle::new(|_: &str| -> docval_oracle::Result<String> {
            panic!("oracle must not be called")
        }));
        assert_eq!(parser.parse_rule("   "), None);
    }

    #[test]
    fn test_prompt_contains_rule_text() {
        let parser = RuleParser::new(FnOracle::new(|prompt: &str| {
            assert!(prompt.contains("Vendor must be ACME"));
            Ok(r#"{"category": "text", "condition": "equals", "value": "ACME"}"#.to_string())
        }));
        assert!(parser.parse_rule("Vendor must be ACME").is_some());
    }
}
