//! Extract command - pull field values out of document text.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use docval_core::models::config::DocvalConfig;
use docval_core::{DataExtractor, ExtractedData, OracleExtractor};

use super::{build_oracle, call_oracle, emit, load_config, read_document};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fields to extract (default: from config)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if !args.fields.is_empty() {
        config.extraction.fields = args.fields.clone();
    }

    let text = read_document(&args.input)?;
    info!("Extracting fields from {}", args.input.display());

    let pb = spinner("Extracting fields...");
    let data = extract_document(text, &config).await?;
    pb.finish_and_clear();

    emit(&serde_json::to_string_pretty(&data)?, args.output.as_deref())?;

    debug!("Total extraction time: {:?}", start.elapsed());
    Ok(())
}

/// Extract data from document text with the configured oracle.
///
/// Oracle failures, timeouts included, yield empty data.
pub async fn extract_document(text: String, config: &DocvalConfig) -> anyhow::Result<ExtractedData> {
    let oracle = build_oracle(&config.oracle)?;
    let extractor = OracleExtractor::from_config(oracle, &config.extraction);

    call_oracle(move || extractor.extract_data(&text)).await
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
