//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod parse_rule;
pub mod report;
pub mod rules;
pub mod validate;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use docval_core::models::config::{DocvalConfig, OracleBackend, OracleConfig};
use docval_core::{ExtractedData, HttpOracle, OllamaOracle, Rule, TextOracle};

/// Shared oracle handle, movable into blocking tasks.
pub type SharedOracle = Arc<dyn TextOracle>;

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docval")
        .join("config.json")
}

/// Load the config given with `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocvalConfig> {
    if let Some(path) = config_path {
        return DocvalConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to read config {}", path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config {}", default_path.display());
        return DocvalConfig::from_file(&default_path)
            .with_context(|| format!("Failed to read config {}", default_path.display()));
    }

    Ok(DocvalConfig::default())
}

/// Build the configured oracle backend, with the configured timeout enforced
/// by the backend itself.
pub fn build_oracle(config: &OracleConfig) -> anyhow::Result<SharedOracle> {
    let oracle: SharedOracle = match config.backend {
        OracleBackend::Process => {
            debug!("Using oracle process {} ({})", config.command, config.model);
            let oracle = OllamaOracle::new(&config.model).with_program(&config.command);
            match config.timeout() {
                Some(timeout) => Arc::new(oracle.with_timeout(timeout)),
                None => Arc::new(oracle),
            }
        }
        OracleBackend::Http => {
            debug!("Using oracle endpoint {} ({})", config.endpoint, config.model);
            let oracle = match config.timeout() {
                Some(timeout) => HttpOracle::with_timeout(&config.endpoint, &config.model, timeout)?,
                None => HttpOracle::new(&config.endpoint, &config.model)?,
            };
            Arc::new(oracle)
        }
    };
    Ok(oracle)
}

/// Run an oracle-bound job off the async runtime.
///
/// Jobs are awaited one at a time, so oracle calls never overlap.
pub async fn call_oracle<T, F>(job: F) -> anyhow::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(job).await?)
}

/// Read document text from a file, or from stdin for `-`.
pub fn read_document(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

/// Load a JSON array of rules.
pub fn load_rules(path: &Path) -> anyhow::Result<Vec<Rule>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules {}", path.display()))?;
    let rules: Vec<Rule> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid rule set {}", path.display()))?;
    debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// Save rules as a pretty JSON array.
pub fn save_rules(path: &Path, rules: &[Rule]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(rules)?)?;
    Ok(())
}

/// Load extracted data from a JSON object file.
pub fn load_data(path: &Path) -> anyhow::Result<ExtractedData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data {}", path.display()))?;
    let data: ExtractedData = serde_json::from_str(&content)
        .with_context(|| format!("Data file {} must hold a JSON object", path.display()))?;
    Ok(data)
}

/// Write `output` to a file, or print it.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output)?;
            println!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }
    Ok(())
}
