//! Natural-language rule interpretation.

mod parser;

pub use parser::RuleParser;
