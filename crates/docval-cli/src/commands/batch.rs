//! Batch command - validate many documents against one rule set.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use docval_core::models::config::DocvalConfig;
use docval_core::{validate_all, ExtractedData, Rule, ValidationOutcome, ValidationSummary};

use super::extract::extract_document;
use super::report::{format_report, has_failures, OutputFormat};
use super::{load_config, load_rules, read_document};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Rule-set file (JSON array of rules)
    #[arg(short, long, required = true)]
    rules: PathBuf,

    /// Output directory for per-document reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each report
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of validating a single document.
struct DocumentResult {
    path: PathBuf,
    data: ExtractedData,
    outcomes: Vec<ValidationOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl DocumentResult {
    fn summary(&self) -> ValidationSummary {
        ValidationSummary::from_outcomes(&self.outcomes)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let rules = load_rules(&args.rules)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} documents to validate against {} rules",
        style("ℹ").blue(),
        files.len(),
        rules.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = validate_document(&path, &rules, &config).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((data, outcomes)) => results.push(DocumentResult {
                path,
                data,
                outcomes,
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to validate {}: {}", path.display(), error_msg);
                    results.push(DocumentResult {
                        path,
                        data: ExtractedData::new(),
                        outcomes: Vec::new(),
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to validate {}: {}", path.display(), error_msg);
                    anyhow::bail!("Validation failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in results.iter().filter(|r| r.error.is_none()) {
            write_report(output_dir, result, args.format)?;
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let fail_on_error = config.validation.fail_on_error;
    let failing: Vec<&DocumentResult> = results
        .iter()
        .filter(|r| r.error.is_some() || has_failures(&r.summary(), fail_on_error))
        .collect();

    println!();
    println!(
        "{} Validated {} documents in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} passed, {} failed",
        style(results.len() - failing.len()).green(),
        style(failing.len()).red()
    );

    if !failing.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for result in &failing {
            let reason = match &result.error {
                Some(error) => error.clone(),
                None => result.summary().to_string(),
            };
            println!("  - {}: {}", result.path.display(), reason);
        }
        anyhow::bail!("{} of {} documents failed validation", failing.len(), results.len());
    }

    Ok(())
}

async fn validate_document(
    path: &Path,
    rules: &[Rule],
    config: &DocvalConfig,
) -> anyhow::Result<(ExtractedData, Vec<ValidationOutcome>)> {
    let text = read_document(path)?;
    let data = extract_document(text, config).await?;
    debug!("Extracted {} fields from {}", data.len(), path.display());

    let outcomes = validate_all(rules, &data);
    Ok((data, outcomes))
}

fn write_report(output_dir: &Path, result: &DocumentResult, format: OutputFormat) -> anyhow::Result<()> {
    let output_name = result
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };

    let output_path = output_dir.join(format!("{}.{}", output_name, extension));
    let source = result.path.display().to_string();
    let content = format_report(Some(&source), &result.data, &result.outcomes, format)?;

    fs::write(&output_path, content)?;
    debug!("Wrote report to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[DocumentResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "total",
        "passed",
        "failed",
        "errors",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let summary = result.summary();
        let status = match &result.error {
            Some(_) => "error",
            None if summary.all_passed() => "pass",
            None => "fail",
        };

        wtr.write_record([
            filename,
            status,
            &summary.total.to_string(),
            &summary.passed.to_string(),
            &summary.failed.to_string(),
            &summary.errors.to_string(),
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
