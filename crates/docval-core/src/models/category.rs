//! Field taxonomy: categories, their conditions, and the document fields
//! each category covers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Semantic type of a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Monetary amount, compared numerically.
    Money,
    /// Calendar date, compared as an instant.
    Date,
    /// Time of day, compared temporally.
    Time,
    /// Free text, compared case-insensitively.
    Text,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [Category::Money, Category::Date, Category::Time, Category::Text];

    /// Key used for this category in rules and extracted data.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Money => "money",
            Category::Date => "date",
            Category::Time => "time",
            Category::Text => "text",
        }
    }

    /// Capitalized name for reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Money => "Money",
            Category::Date => "Date",
            Category::Time => "Time",
            Category::Text => "Text",
        }
    }

    /// Conditions valid for this category.
    pub fn conditions(self) -> &'static [Condition] {
        use Condition::*;
        match self {
            Category::Money => &[Equals, NotEquals, GreaterThan, LessThan],
            Category::Date => &[Equals, NotEquals, BeforeDate, AfterDate],
            Category::Time => &[Equals, NotEquals, GreaterThan, LessThan],
            Category::Text => &[Equals, NotEquals, Contains, NotContains],
        }
    }

    /// Whether `condition` may be used with this category.
    pub fn supports(self, condition: Condition) -> bool {
        self.conditions().contains(&condition)
    }

    /// Named document fields belonging to this category.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Category::Money => &["total_amount", "payment_amount", "subtotal", "tax_amount"],
            Category::Date => &["invoice_date", "due_date", "payment_date"],
            Category::Time => &["issue_time", "processing_time"],
            Category::Text => &["invoice_number", "customer", "vendor"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "money" => Ok(Category::Money),
            "date" => Ok(Category::Date),
            "time" => Ok(Category::Time),
            "text" => Ok(Category::Text),
            _ => Err(RuleError::UnknownCategory(s.to_string())),
        }
    }
}

/// Comparison operator applied within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    BeforeDate,
    AfterDate,
    Contains,
    NotContains,
}

impl Condition {
    pub const ALL: [Condition; 8] = [
        Condition::Equals,
        Condition::NotEquals,
        Condition::GreaterThan,
        Condition::LessThan,
        Condition::BeforeDate,
        Condition::AfterDate,
        Condition::Contains,
        Condition::NotContains,
    ];

    /// Wire name, e.g. `greater_than`.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::NotEquals => "not_equals",
            Condition::GreaterThan => "greater_than",
            Condition::LessThan => "less_than",
            Condition::BeforeDate => "before_date",
            Condition::AfterDate => "after_date",
            Condition::Contains => "contains",
            Condition::NotContains => "not_contains",
        }
    }

    /// Compact symbol used when listing rules.
    pub fn symbol(self) -> &'static str {
        match self {
            Condition::Equals => "=",
            Condition::NotEquals => "≠",
            Condition::GreaterThan => ">",
            Condition::LessThan => "<",
            Condition::BeforeDate => "before",
            Condition::AfterDate => "after",
            Condition::Contains => "contains",
            Condition::NotContains => "does not contain",
        }
    }

    /// Wire name with spaces, used in outcome sentences.
    pub fn phrase(self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| RuleError::UnknownCondition(s.to_string()))
    }
}

/// Category a named document field belongs to.
pub fn field_category(field: &str) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|category| category.fields().contains(&field))
}

/// Display name of a named document field.
pub fn display_name(field: &str) -> Option<&'static str> {
    let name = match field {
        "total_amount" => "Total Amount",
        "payment_amount" => "Payment Amount",
        "subtotal" => "Subtotal",
        "tax_amount" => "Tax Amount",
        "invoice_date" => "Invoice Date",
        "due_date" => "Due Date",
        "payment_date" => "Payment Date",
        "issue_time" => "Issue Time",
        "processing_time" => "Processing Time",
        "invoice_number" => "Invoice Number",
        "customer" => "Customer",
        "vendor" => "Vendor",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_condition_sets() {
        assert!(Category::Money.supports(Condition::GreaterThan));
        assert!(!Category::Money.supports(Condition::BeforeDate));
        assert!(Category::Date.supports(Condition::AfterDate));
        assert!(!Category::Date.supports(Condition::Contains));
        assert!(Category::Time.supports(Condition::LessThan));
        assert!(Category::Text.supports(Condition::NotContains));
        assert!(!Category::Text.supports(Condition::GreaterThan));

        for category in Category::ALL {
            assert!(category.supports(Condition::Equals));
            assert!(category.supports(Condition::NotEquals));
            assert_eq!(category.conditions().len(), 4);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("money".parse::<Category>().unwrap(), Category::Money);
        assert_eq!(" Date ".parse::<Category>().unwrap(), Category::Date);
        assert!(matches!(
            "amount".parse::<Category>(),
            Err(RuleError::UnknownCategory(_))
        ));

        assert_eq!("greater_than".parse::<Condition>().unwrap(), Condition::GreaterThan);
        assert_eq!("not contains".parse::<Condition>().unwrap(), Condition::NotContains);
        assert_eq!("Before-Date".parse::<Condition>().unwrap(), Condition::BeforeDate);
        assert!(matches!(
            "between".parse::<Condition>(),
            Err(RuleError::UnknownCondition(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Category::Money).unwrap(), "\"money\"");
        assert_eq!(serde_json::to_string(&Condition::NotEquals).unwrap(), "\"not_equals\"");
        let c: Condition = serde_json::from_str("\"after_date\"").unwrap();
        assert_eq!(c, Condition::AfterDate);
    }

    #[test]
    fn test_field_registry() {
        assert_eq!(field_category("due_date"), Some(Category::Date));
        assert_eq!(field_category("vendor"), Some(Category::Text));
        assert_eq!(field_category("colour"), None);
        assert_eq!(display_name("tax_amount"), Some("Tax Amount"));
        assert_eq!(display_name("colour"), None);

        for category in Category::ALL {
            for field in category.fields() {
                assert!(display_name(field).is_some(), "{} has no display name", field);
            }
        }
    }

    #[test]
    fn test_symbols_and_phrases() {
        assert_eq!(Condition::NotEquals.symbol(), "≠");
        assert_eq!(Condition::NotContains.symbol(), "does not contain");
        assert_eq!(Condition::BeforeDate.phrase(), "before date");
    }
}
