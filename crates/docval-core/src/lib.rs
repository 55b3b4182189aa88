//! Core library for document rule validation.
//!
//! This crate provides:
//! - A field taxonomy (money, date, time, text) with category-scoped conditions
//! - Lenient JSON extraction from text-oracle completions
//! - Natural-language rule parsing into typed rules
//! - Document field extraction through the oracle
//! - A pure rule validator with numeric, temporal and textual comparators
//! - A session struct holding the state a front end needs between stages

pub mod compare;
pub mod error;
pub mod extraction;
pub mod models;
pub mod rules;
pub mod session;
pub mod validator;

pub use error::{DocvalError, Result};
pub use extraction::{extract_json, DataExtractor, OracleExtractor};
pub use models::{Category, Condition, ExtractedData, Rule, Status, ValidationOutcome, ValidationSummary};
pub use models::config::DocvalConfig;
pub use rules::RuleParser;
pub use session::Session;
pub use validator::{validate, validate_all};

/// Re-export oracle types.
pub use docval_oracle::{FnOracle, OracleError, TextOracle};

#[cfg(feature = "native")]
pub use docval_oracle::OllamaOracle;

#[cfg(feature = "http")]
pub use docval_oracle::HttpOracle;
