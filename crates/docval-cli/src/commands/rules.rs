//! Rules command - inspect rule sets and the field taxonomy.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use docval_core::models::display_name;
use docval_core::Category;

use super::load_rules;

/// Arguments for the rules command.
#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// List the rules in a rule-set file
    List {
        /// Rule-set file (JSON array of rules)
        rules: PathBuf,
    },

    /// Show the conditions valid for each category
    Conditions {
        /// Only this category (money, date, time, text)
        category: Option<String>,
    },

    /// Show the known document fields and their categories
    Fields,
}

pub async fn run(args: RulesArgs) -> anyhow::Result<()> {
    match args.command {
        RulesCommand::List { rules } => list_rules(&rules),
        RulesCommand::Conditions { category } => show_conditions(category.as_deref()),
        RulesCommand::Fields => show_fields(),
    }
}

fn list_rules(path: &Path) -> anyhow::Result<()> {
    let rules = load_rules(path)?;

    if rules.is_empty() {
        println!("{} No rules in {}", style("ℹ").blue(), path.display());
        return Ok(());
    }

    println!("{}", style(format!("Rules in {}:", path.display())).bold());
    for (i, rule) in rules.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, rule);
    }

    Ok(())
}

fn show_conditions(category: Option<&str>) -> anyhow::Result<()> {
    let categories: Vec<Category> = match category {
        Some(name) => vec![name.parse()?],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{} ({})", style(category.label()).bold(), category);
        for condition in category.conditions() {
            println!("  {:<14} {}", condition.as_str(), condition.phrase());
        }
    }

    Ok(())
}

fn show_fields() -> anyhow::Result<()> {
    println!("{}", style("Fields:").bold());
    for category in Category::ALL {
        for &field in category.fields() {
            let name = display_name(field).unwrap_or(field);
            println!("  {:<14} {:<16} {}", field, name, category);
        }
    }

    Ok(())
}
