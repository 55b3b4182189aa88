//! Rendering validation results.

use console::style;
use serde::Serialize;

use docval_core::models::scalar_to_string;
use docval_core::{ExtractedData, Status, ValidationOutcome, ValidationSummary};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    data: &'a ExtractedData,
    summary: ValidationSummary,
    results: &'a [ValidationOutcome],
}

/// Render outcomes in the requested format.
pub fn format_report(
    source: Option<&str>,
    data: &ExtractedData,
    outcomes: &[ValidationOutcome],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(source, data, outcomes),
        OutputFormat::Csv => format_csv(outcomes),
        OutputFormat::Text => Ok(format_text(outcomes)),
    }
}

fn format_json(
    source: Option<&str>,
    data: &ExtractedData,
    outcomes: &[ValidationOutcome],
) -> anyhow::Result<String> {
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        source,
        data,
        summary: ValidationSummary::from_outcomes(outcomes),
        results: outcomes,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn format_csv(outcomes: &[ValidationOutcome]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "rule",
        "category",
        "condition",
        "expected",
        "actual",
        "status",
        "message",
    ])?;

    for outcome in outcomes {
        let (rule, category, condition) = match outcome.rule() {
            Some(rule) => (
                rule.to_string(),
                rule.category().to_string(),
                rule.condition().to_string(),
            ),
            None => Default::default(),
        };

        wtr.write_record([
            rule,
            category,
            condition,
            outcome.expected().map(scalar_to_string).unwrap_or_default(),
            outcome.actual().map(scalar_to_string).unwrap_or_default(),
            outcome.status().to_string(),
            outcome.message().unwrap_or_default().to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcomes: &[ValidationOutcome]) -> String {
    let mut output = String::new();

    for (i, outcome) in outcomes.iter().enumerate() {
        let icon = match outcome.status() {
            Status::Pass => style("✓").green(),
            Status::Fail => style("✗").red(),
            Status::Error => style("⚠").yellow(),
        };
        let rule = outcome
            .rule()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "(missing rule)".to_string());

        output.push_str(&format!("{} Rule #{}: {}\n", icon, i + 1, rule));
        output.push_str(&format!("    {}\n", outcome.describe()));
    }

    let summary = ValidationSummary::from_outcomes(outcomes);
    output.push('\n');
    output.push_str(&format!("Summary: {}\n", summary));

    output
}

/// Whether the outcomes should make the process exit unsuccessfully.
pub fn has_failures(summary: &ValidationSummary, fail_on_error: bool) -> bool {
    summary.failed > 0 || (fail_on_error && summary.errors > 0)
}
