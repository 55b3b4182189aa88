//! Ollama HTTP API backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OracleError;
use crate::{Result, TextOracle, DEFAULT_MODEL};

/// Default ollama server address.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Backend posting prompts to `<endpoint>/api/generate`.
pub struct HttpOracle {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    timeout: Option<Duration>,
}

impl HttpOracle {
    /// Create a backend for the given server and model, with no request
    /// timeout.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: None,
        })
    }

    /// Create a backend whose requests give up after `timeout`.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: Some(timeout),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }
}

impl Default for HttpOracle {
    fn default() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl TextOracle for HttpOracle {
    fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.generate_url();
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .map_err(|e| match self.timeout {
                Some(limit) if e.is_timeout() => OracleError::Timeout(limit),
                _ => OracleError::Request(e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::Request(format!("HTTP {}: {}", status, body.trim())));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        Ok(body.response.trim().to_string())
    }

    fn name(&self) -> &str {
        "ollama-http"
    }
}
