//! Prompt templates sent to the oracle.

use crate::models::Category;

/// Prompt asking the oracle to turn a natural-language rule into JSON.
pub fn rule_prompt(rule_text: &str) -> String {
    let mut categories = String::new();
    let mut conditions = String::new();
    for category in Category::ALL {
        categories.push_str(&format!("- \"{}\"\n", category));
        let names: Vec<String> = category
            .conditions()
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect();
        conditions.push_str(&format!("- {}: {}\n", category, names.join(", ")));
    }

    format!(
        r#"Convert the rule below to a JSON object with exactly three fields: category, condition, value.

CATEGORIES (pick one):
{categories}
CONDITIONS allowed per category:
{conditions}
EXAMPLES:
{{"category": "money", "condition": "greater_than", "value": 1000}}
{{"category": "date", "condition": "before_date", "value": "2025-01-01"}}
{{"category": "time", "condition": "less_than", "value": "17:00:00"}}
{{"category": "text", "condition": "contains", "value": "ACME"}}

REQUIREMENTS:
1. Money values are bare numbers without currency symbols or separators
2. Dates use YYYY-MM-DD
3. Times use HH:MM:SS
4. Reply with the JSON object only, no other text

Rule: "{rule_text}"
"#
    )
}

/// Prompt asking the oracle to pull field values out of document text.
///
/// `document_text` is embedded as given; truncation is the caller's job.
pub fn data_prompt(document_text: &str, fields: &[String]) -> String {
    let format_lines: Vec<String> = fields
        .iter()
        .map(|field| format!("  \"{}\": \"extracted {} value\"", field, field))
        .collect();

    format!(
        r#"Extract structured data from the document below and reply with a JSON object only.

OUTPUT FORMAT:
{{
{format}
}}

RULES:
1. Remove all currency symbols ($, €, £, ...) and thousands separators from amounts
2. Write dates as YYYY-MM-DD
3. Write times as HH:MM:SS
4. Use the first value found for each field; leave a field out if it is not present
5. Reply with the JSON object only, no other text

Document text:
{document_text}
"#,
        format = format_lines.join(",\n")
    )
}
