//! WASM bindings for document rule validation.
//!
//! The browser side owns the text oracle: it asks for prompts, sends them to
//! its model and hands the raw completions back here.

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use docval_core::extraction::prompts;
use docval_core::extraction::truncate_chars;
use docval_core::models::config::ExtractionConfig;
use docval_core::{
    validate, validate_all, Category, ExtractedData, Rule, ValidationOutcome, ValidationSummary,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Outcome as handed to JavaScript, with its human-readable description.
#[derive(Serialize)]
struct OutcomeJs<'a> {
    #[serde(flatten)]
    outcome: &'a ValidationOutcome,
    description: String,
}

impl<'a> From<&'a ValidationOutcome> for OutcomeJs<'a> {
    fn from(outcome: &'a ValidationOutcome) -> Self {
        Self {
            outcome,
            description: outcome.describe(),
        }
    }
}

fn outcomes_to_js(outcomes: &[ValidationOutcome]) -> Result<JsValue, JsValue> {
    let outcomes: Vec<OutcomeJs<'_>> = outcomes.iter().map(OutcomeJs::from).collect();
    to_js(&outcomes)
}

/// Pull the JSON object out of a raw completion; `{}` when there is none.
#[wasm_bindgen]
pub fn extract_json(raw: &str) -> Result<JsValue, JsValue> {
    to_js(&docval_core::extract_json(raw))
}

/// Prompt that asks a model to turn a rule statement into a rule object.
#[wasm_bindgen]
pub fn rule_prompt(rule_text: &str) -> String {
    prompts::rule_prompt(rule_text.trim())
}

/// Prompt that asks a model to extract the default fields from a document.
#[wasm_bindgen]
pub fn data_prompt(document_text: &str) -> String {
    let config = ExtractionConfig::default();
    prompts::data_prompt(
        truncate_chars(document_text, config.max_chars),
        &config.fields,
    )
}

/// Build a rule from a completion to [`rule_prompt`].
///
/// Returns `null` when the completion does not hold a complete, valid rule.
#[wasm_bindgen]
pub fn parse_rule_response(raw: &str) -> Result<JsValue, JsValue> {
    match Rule::from_json_map(&docval_core::extract_json(raw)) {
        Ok(rule) => to_js(&rule),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Rule rejected: {}", e)));
            Ok(JsValue::NULL)
        }
    }
}

/// Evaluate one rule object against an extracted-data object.
#[wasm_bindgen]
pub fn validate_rule(rule: JsValue, data: JsValue) -> Result<JsValue, JsValue> {
    let rule: Option<Rule> = if rule.is_null() || rule.is_undefined() {
        None
    } else {
        Some(serde_wasm_bindgen::from_value(rule).map_err(js_error)?)
    };
    let data = data_from_js(data)?;

    let outcome = validate(rule.as_ref(), &data);
    to_js(&OutcomeJs::from(&outcome))
}

/// Evaluate an array of rule objects against an extracted-data object.
#[wasm_bindgen]
pub fn validate_rules(rules: JsValue, data: JsValue) -> Result<JsValue, JsValue> {
    let rules: Vec<Rule> = serde_wasm_bindgen::from_value(rules).map_err(js_error)?;
    let data = data_from_js(data)?;

    outcomes_to_js(&validate_all(&rules, &data))
}

/// Condition names valid for a category.
#[wasm_bindgen]
pub fn conditions_for(category: &str) -> Result<js_sys::Array, JsValue> {
    let category: Category = category.parse().map_err(js_error)?;

    Ok(category
        .conditions()
        .iter()
        .map(|c| JsValue::from_str(c.as_str()))
        .collect())
}

fn data_from_js(data: JsValue) -> Result<ExtractedData, JsValue> {
    if data.is_null() || data.is_undefined() {
        return Ok(ExtractedData::new());
    }
    serde_wasm_bindgen::from_value(data).map_err(js_error)
}

/// An editable rule list for browser use.
#[wasm_bindgen]
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

#[wasm_bindgen]
impl RuleSet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rules from a JSON array string.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<RuleSet, JsValue> {
        let rules: Vec<Rule> = serde_json::from_str(json).map_err(js_error)?;
        Ok(Self { rules })
    }

    /// Add a rule object.
    #[wasm_bindgen]
    pub fn add(&mut self, rule: JsValue) -> Result<(), JsValue> {
        let rule: Rule = serde_wasm_bindgen::from_value(rule).map_err(js_error)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Add a rule from form inputs, e.g. `("money", "greater_than", "1000")`.
    #[wasm_bindgen(js_name = addParts)]
    pub fn add_parts(&mut self, category: &str, condition: &str, value: &str) -> Result<(), JsValue> {
        let rule = Rule::from_parts(category, condition, value).map_err(js_error)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Remove the rule at `index`.
    #[wasm_bindgen]
    pub fn remove(&mut self, index: usize) -> Result<(), JsValue> {
        if index >= self.rules.len() {
            return Err(js_error(format!(
                "rule index {} out of range ({} rules)",
                index,
                self.rules.len()
            )));
        }
        self.rules.remove(index);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.rules.len()
    }

    /// Rules as display strings, e.g. "Money > 1000".
    #[wasm_bindgen]
    pub fn labels(&self) -> js_sys::Array {
        self.rules
            .iter()
            .map(|r| JsValue::from_str(&r.to_string()))
            .collect()
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.rules).map_err(js_error)
    }

    /// Evaluate every rule against an extracted-data object.
    #[wasm_bindgen]
    pub fn validate(&self, data: JsValue) -> Result<JsValue, JsValue> {
        let data = data_from_js(data)?;
        outcomes_to_js(&validate_all(&self.rules, &data))
    }

    /// Pass/fail/error counts for an extracted-data object.
    #[wasm_bindgen]
    pub fn summary(&self, data: JsValue) -> Result<JsValue, JsValue> {
        let data = data_from_js(data)?;
        let outcomes = validate_all(&self.rules, &data);
        to_js(&ValidationSummary::from_outcomes(&outcomes))
    }
}
