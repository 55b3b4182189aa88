//! Validate and run commands - check data against a rule set.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use docval_core::{Session, ValidationSummary};

use super::extract::{extract_document, spinner};
use super::report::{format_report, has_failures, OutputFormat};
use super::{emit, load_config, load_data, load_rules, read_document};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Rule-set file (JSON array of rules)
    #[arg(short, long, required = true)]
    rules: PathBuf,

    /// Extracted data file (JSON object)
    #[arg(short, long, required = true)]
    data: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Input text file (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Rule-set file (JSON array of rules)
    #[arg(short, long, required = true)]
    rules: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut session = Session::new();
    session.set_data(load_data(&args.data)?);
    for rule in load_rules(&args.rules)? {
        session.add_rule(rule);
    }

    session.run_validations();
    let source = args.data.display().to_string();
    let report = format_report(
        Some(&source),
        session.effective_data(),
        session.results(),
        args.format,
    )?;
    emit(&report, args.output.as_deref())?;

    finish(&session.summary(), config.validation.fail_on_error)
}

pub async fn run_document(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let rules = load_rules(&args.rules)?;
    let text = read_document(&args.input)?;
    info!("Validating {} against {} rules", args.input.display(), rules.len());

    let pb = spinner("Extracting fields...");
    let data = extract_document(text.clone(), &config).await?;
    pb.finish_and_clear();

    let mut session = Session::new();
    session.load_extracted(text, data);
    for rule in rules {
        session.add_rule(rule);
    }

    session.run_validations();
    let source = args.input.display().to_string();
    let report = format_report(
        Some(&source),
        session.effective_data(),
        session.results(),
        args.format,
    )?;
    emit(&report, args.output.as_deref())?;

    debug!("Total run time: {:?}", start.elapsed());
    finish(&session.summary(), config.validation.fail_on_error)
}

fn finish(summary: &ValidationSummary, fail_on_error: bool) -> anyhow::Result<()> {
    if has_failures(summary, fail_on_error) {
        eprintln!("{} {}", style("✗").red(), summary);
        anyhow::bail!("Validation failed: {}", summary);
    }
    eprintln!("{} {}", style("✓").green(), summary);
    Ok(())
}
