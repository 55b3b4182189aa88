//! Document field extraction through the text oracle.

mod extractor;
pub mod json;
pub mod prompts;

pub use extractor::{truncate_chars, OracleExtractor};
pub use json::extract_json;

use crate::models::ExtractedData;

/// Trait for document data extractors.
pub trait DataExtractor {
    /// Extract field values from plain document text.
    ///
    /// Never fails: anything that goes wrong yields an empty (or partial)
    /// mapping.
    fn extract_data(&self, document_text: &str) -> ExtractedData;
}
