//! Parse-rule command - turn a rule statement into a typed rule.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use docval_core::{DocvalError, Rule, RuleParser};

use super::{build_oracle, call_oracle, load_config, load_rules, save_rules};

/// Arguments for the parse-rule command.
#[derive(Args)]
pub struct ParseRuleArgs {
    /// Rule statement, e.g. "Total must be over 1000"
    #[arg(required = true)]
    text: String,

    /// Append the parsed rule to this rule-set file
    #[arg(short, long)]
    append: Option<PathBuf>,
}

pub async fn run(args: ParseRuleArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = RuleParser::new(build_oracle(&config.oracle)?);

    let text = args.text.clone();
    let parsed: Result<Rule, DocvalError> =
        call_oracle(move || parser.try_parse_rule(&text)).await?;

    let rule = match parsed {
        Ok(rule) => rule,
        Err(DocvalError::Oracle(e)) => anyhow::bail!("Rule parsing failed: {}", e),
        Err(e) => anyhow::bail!("Rule rejected ({}), please rephrase it", e),
    };

    eprintln!("{} Parsed rule: {}", style("✓").green(), rule);
    println!("{}", serde_json::to_string_pretty(&rule)?);

    if let Some(path) = &args.append {
        let mut rules = if path.exists() { load_rules(path)? } else { Vec::new() };
        rules.push(rule);
        save_rules(path, &rules)?;
        info!("Rule set {} now has {} rules", path.display(), rules.len());
        eprintln!(
            "{} Appended to {} ({} rules)",
            style("✓").green(),
            path.display(),
            rules.len()
        );
    }

    Ok(())
}
