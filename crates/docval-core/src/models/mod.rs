//! Data models: taxonomy, rules, outcomes and configuration.

pub mod category;
pub mod config;
pub mod outcome;
pub mod rule;

pub use category::{display_name, field_category, Category, Condition};
pub use outcome::{Status, ValidationOutcome, ValidationSummary};
pub use rule::{RawRule, Rule};

use serde_json::{Map, Value};

/// Extracted document data: category name to scalar value.
pub type ExtractedData = Map<String, Value>;

/// Render a JSON scalar for humans: strings without quotes, everything else
/// in its JSON spelling.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
