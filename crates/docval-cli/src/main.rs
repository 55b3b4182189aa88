//! CLI application for validating document data against natural-language rules.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, parse_rule, rules, validate};

/// Document validator - check extracted document fields against plain-language rules
#[derive(Parser)]
#[command(name = "docval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract field values from document text
    Extract(extract::ExtractArgs),

    /// Turn a natural-language rule into a typed rule
    ParseRule(parse_rule::ParseRuleArgs),

    /// Validate extracted data against a rule set
    Validate(validate::ValidateArgs),

    /// Extract data from a document and validate it in one go
    Run(validate::RunArgs),

    /// Validate many documents against one rule set
    Batch(batch::BatchArgs),

    /// Inspect rule sets and the field taxonomy
    Rules(rules::RulesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::ParseRule(args) => parse_rule::run(args, config_path).await,
        Commands::Validate(args) => validate::run(args, config_path).await,
        Commands::Run(args) => validate::run_document(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Rules(args) => rules::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
