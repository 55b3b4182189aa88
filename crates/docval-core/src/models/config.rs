//! Configuration structures for the validation pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for docval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocvalConfig {
    /// Text-completion oracle configuration.
    pub oracle: OracleConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Validation configuration.
    pub validation: ValidationConfig,
}

/// Which oracle backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    /// Spawn `<command> run <model> <prompt>` per completion.
    Process,
    /// POST to the ollama HTTP API.
    Http,
}

/// Oracle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Backend kind.
    pub backend: OracleBackend,

    /// Executable for the process backend.
    pub command: String,

    /// Model name passed to the backend.
    pub model: String,

    /// Server address for the HTTP backend.
    pub endpoint: String,

    /// Seconds to wait for one completion (0 = no limit).
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: OracleBackend::Process,
            command: "ollama".to_string(),
            model: "llama3:8b".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            timeout_secs: 120,
        }
    }
}

impl OracleConfig {
    /// Completion timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Only this many leading characters of a document reach the oracle.
    pub max_chars: usize,

    /// Keys requested from the oracle.
    pub fields: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chars: 5000,
            fields: vec!["money".to_string(), "date".to_string(), "time".to_string()],
        }
    }
}

/// Validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Count error outcomes as failures when deciding the exit status.
    pub fail_on_error: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { fail_on_error: true }
    }
}

impl DocvalConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocvalError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: DocvalConfig =
            serde_json::from_str(r#"{"oracle": {"backend": "http", "model": "mistral"}}"#).unwrap();

        assert_eq!(config.oracle.backend, OracleBackend::Http);
        assert_eq!(config.oracle.model, "mistral");
        assert_eq!(config.oracle.command, "ollama");
        assert_eq!(config.extraction.max_chars, 5000);
        assert!(config.validation.fail_on_error);
    }

    #[test]
    fn test_timeout() {
        let mut oracle = OracleConfig::default();
        assert_eq!(oracle.timeout(), Some(Duration::from_secs(120)));
        oracle.timeout_secs = 0;
        assert_eq!(oracle.timeout(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocvalConfig::default();
        config.extraction.max_chars = 1200;
        config.save(&path).unwrap();

        assert_eq!(DocvalConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = DocvalConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, DocvalError::Json(_)), "{}", err);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocvalConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DocvalError::Io(_)), "{}", err);
    }
}
