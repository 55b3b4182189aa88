//! Application state shared between pipeline stages.
//!
//! The core functions are stateless; a front end keeps one [`Session`] per
//! user and passes it by reference to each stage.

use serde_json::Value;
use tracing::info;

use crate::error::SessionError;
use crate::extraction::DataExtractor;
use crate::models::{ExtractedData, Rule, ValidationOutcome, ValidationSummary};
use crate::validator::validate_all;

/// Document, rules and results of one validation session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document_text: String,
    document_data: ExtractedData,
    editable_data: ExtractedData,
    rules: Vec<Rule>,
    results: Vec<ValidationOutcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the document text and re-extract its data.
    ///
    /// Manual edits are discarded: the editable copy starts again from the
    /// fresh extraction.
    pub fn load_document(&mut self, text: impl Into<String>, extractor: &impl DataExtractor) {
        let text = text.into();
        let data = extractor.extract_data(&text);
        self.load_extracted(text, data);
    }

    /// Replace the document text with data extracted elsewhere, e.g. on a
    /// worker thread.
    pub fn load_extracted(&mut self, text: impl Into<String>, data: ExtractedData) {
        self.document_text = text.into();
        self.document_data = data;
        self.editable_data = self.document_data.clone();
        info!("Loaded document with {} extracted fields", self.document_data.len());
    }

    /// Use already-extracted data, e.g. loaded from a file.
    pub fn set_data(&mut self, data: ExtractedData) {
        self.document_data = data;
        self.editable_data = self.document_data.clone();
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn document_data(&self) -> &ExtractedData {
        &self.document_data
    }

    pub fn editable_data(&self) -> &ExtractedData {
        &self.editable_data
    }

    /// Edit one extracted value.
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        self.editable_data.insert(key.into(), value);
    }

    /// Editable data as pretty JSON, for text editing.
    pub fn data_json(&self) -> String {
        serde_json::to_string_pretty(&self.editable_data).unwrap_or_else(|_| "{}".to_string())
    }

    /// Replace the editable data from edited JSON text.
    ///
    /// On error the current data is left untouched.
    pub fn replace_data_json(&mut self, text: &str) -> Result<(), SessionError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SessionError::InvalidJson(e.to_string()))?;

        match value {
            Value::Object(map) => {
                self.editable_data = map;
                Ok(())
            }
            _ => Err(SessionError::NotAnObject),
        }
    }

    /// Data rules are checked against: the edited copy, or the extracted
    /// data when nothing is left in the edited copy.
    pub fn effective_data(&self) -> &ExtractedData {
        if self.editable_data.is_empty() {
            &self.document_data
        } else {
            &self.editable_data
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Replace the rule at `index`.
    pub fn update_rule(&mut self, index: usize, rule: Rule) -> Result<(), SessionError> {
        let len = self.rules.len();
        let slot = self
            .rules
            .get_mut(index)
            .ok_or(SessionError::RuleIndex { index, len })?;
        *slot = rule;
        Ok(())
    }

    /// Remove and return the rule at `index`.
    pub fn remove_rule(&mut self, index: usize) -> Result<Rule, SessionError> {
        if index >= self.rules.len() {
            return Err(SessionError::RuleIndex {
                index,
                len: self.rules.len(),
            });
        }
        Ok(self.rules.remove(index))
    }

    /// Re-run every rule against the effective data.
    pub fn run_validations(&mut self) -> &[ValidationOutcome] {
        self.results = validate_all(&self.rules, self.effective_data());
        &self.results
    }

    pub fn results(&self) -> &[ValidationOutcome] {
        &self.results
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary::from_outcomes(&self.results)
    }
}
