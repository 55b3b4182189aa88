//! Oracle-backed field extractor.

use std::time::Instant;

use docval_oracle::TextOracle;
use tracing::{debug, info, warn};

use super::json::extract_json;
use super::prompts::data_prompt;
use super::DataExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::ExtractedData;

/// Extractor asking a [`TextOracle`] for a JSON object of field values.
pub struct OracleExtractor<O> {
    oracle: O,
    /// Only this many leading characters reach the oracle.
    max_chars: usize,
    /// Keys requested in the prompt.
    fields: Vec<String>,
}

impl<O: TextOracle> OracleExtractor<O> {
    /// Create an extractor with default settings.
    pub fn new(oracle: O) -> Self {
        Self::from_config(oracle, &ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn from_config(oracle: O, config: &ExtractionConfig) -> Self {
        Self {
            oracle,
            max_chars: config.max_chars,
            fields: config.fields.clone(),
        }
    }

    /// Set the character limit.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the requested fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<O: TextOracle> DataExtractor for OracleExtractor<O> {
    fn extract_data(&self, document_text: &str) -> ExtractedData {
        if document_text.trim().is_empty() {
            debug!("Empty document text, nothing to extract");
            return ExtractedData::new();
        }

        let start = Instant::now();
        let truncated = truncate_chars(document_text, self.max_chars);
        if truncated.len() < document_text.len() {
            debug!(
                "Truncated document from {} to {} chars",
                document_text.chars().count(),
                self.max_chars
            );
        }

        let prompt = data_prompt(truncated, &self.fields);
        let response = match self.oracle.complete(&prompt) {
            Ok(response) => response,
            Err(e) => {
                warn!("Data extraction failed on {}: {}", self.oracle.name(), e);
                return ExtractedData::new();
            }
        };

        let data = extract_json(&response);
        if data.is_empty() {
            warn!("Oracle returned no usable data");
        } else {
            info!(
                "Extracted {} fields in {}ms",
                data.len(),
                start.elapsed().as_millis()
            );
        }

        data
    }
}

/// Leading `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docval_oracle::{FnOracle, OracleError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("zł€ab", 2), "zł");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_extracts_first_object() {
        let oracle = FnOracle::new(|_: &str| {
            Ok("Here you go: {\"money\": \"1230.00\", \"date\": \"2024-01-15\"} done".to_string())
        });
        let extractor = OracleExtractor::new(oracle);

        let data = extractor.extract_data("Invoice total $1,230.00 dated 15 Jan 2024");
        assert_eq!(data.get("money"), Some(&json!("1230.00")));
        assert_eq!(data.get("date"), Some(&json!("2024-01-15")));
        assert_eq!(data.get("time"), None);
    }

    #[test]
    fn test_only_prefix_reaches_oracle() {
        let seen = Mutex::new(String::new());
        let oracle = FnOracle::new(|prompt: &str| {
            *seen.lock().unwrap() = prompt.to_string();
            Ok("{}".to_string())
        });
        let extractor = OracleExtractor::new(&oracle).with_max_chars(10);

        let document = format!("0123456789{}", "X".repeat(100));
        extractor.extract_data(&document);

        let prompt = seen.lock().unwrap().clone();
        assert!(prompt.contains("0123456789"));
        assert!(!prompt.contains('X'));
    }

    #[test]
    fn test_default_limit_is_5000_chars() {
        let seen = Mutex::new(0usize);
        let oracle = FnOracle::new(|prompt: &str| {
            *seen.lock().unwrap() = prompt.matches('é').count();
            Ok("{}".to_string())
        });
        let extractor = OracleExtractor::new(&oracle);

        extractor.extract_data(&"é".repeat(6000));
        assert_eq!(*seen.lock().unwrap(), 5000);
    }

    #[test]
    fn test_oracle_failure_is_empty() {
        let oracle = FnOracle::new(|_: &str| Err(OracleError::Unavailable("down".to_string())));
        let extractor = OracleExtractor::new(oracle);
        assert!(extractor.extract_data("Total: 10").is_empty());
    }

    #[test]
    fn test_refusal_is_empty() {
        let oracle = FnOracle::new(|_: &str| Ok("I cannot help with that.".to_string()));
        let extractor = OracleExtractor::new(oracle);
        assert!(extractor.extract_data("Total: 10").is_empty());
    }

    #[test]
    fn test_empty_document_skips_oracle() {
        let oracle = FnOracle::new(|_: &str| -> docval_oracle::Result<String> {
            panic!("oracle must not be called")
        });
        let extractor = OracleExtractor::new(oracle);
        assert!(extractor.extract_data("   ").is_empty());
    }

    #[test]
    fn test_custom_fields_in_prompt() {
        let seen = Mutex::new(String::new());
        let oracle = FnOracle::new(|prompt: &str| {
            *seen.lock().unwrap() = prompt.to_string();
            Ok("{\"text\": \"ACME\"}".to_string())
        });
        let extractor = OracleExtractor::new(&oracle).with_fields(["text"]);

        let data = extractor.extract_data("Vendor: ACME");
        assert_eq!(data.get("text"), Some(&json!("ACME")));
        assert!(seen.lock().unwrap().contains("\"text\": \"extracted text value\""));
    }
}
