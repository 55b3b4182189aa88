//! Text-completion oracle abstraction for docval.
//!
//! The validation core never talks to a language model directly. It hands a
//! prompt to a [`TextOracle`] and re-validates whatever text comes back.
//! This crate provides:
//! - [`OllamaOracle`] running `ollama run <model> <prompt>` as a child process (native)
//! - [`HttpOracle`] calling the ollama `/api/generate` endpoint (http)
//! - [`FnOracle`] wrapping a closure, mostly for tests and embedding

mod backend;
mod error;

pub use backend::{FnOracle, TextOracle};
pub use error::OracleError;

#[cfg(feature = "native")]
pub use backend::process::OllamaOracle;

#[cfg(feature = "http")]
pub use backend::http::{HttpOracle, DEFAULT_ENDPOINT};

/// Default model used by the ollama backends.
pub const DEFAULT_MODEL: &str = "llama3:8b";

/// Result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;
