//! Error types for the docval-core library.

use thiserror::Error;

/// Main error type for the docval library.
#[derive(Error, Debug)]
pub enum DocvalError {
    /// Rule construction or parsing error.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    /// Error from the text-completion oracle.
    #[error("oracle error: {0}")]
    Oracle(#[from] docval_oracle::OracleError),

    /// Malformed JSON, e.g. in a config file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to building a typed rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// Nothing usable came back for the rule.
    #[error("no rule could be extracted")]
    Empty,

    /// A required field is absent or null.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The category name is not part of the taxonomy.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The condition name is not known at all.
    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    /// The condition exists but does not apply to the category.
    #[error("condition {condition} is not valid for {category}")]
    ConditionMismatch { category: String, condition: String },

    /// The rule value cannot be used with its category.
    #[error("invalid {category} value {value}: {reason}")]
    InvalidValue {
        category: String,
        value: String,
        reason: String,
    },
}

/// Errors raised while coercing or comparing operands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// The operand could not be read as a number.
    #[error("could not convert {0} to a number")]
    NotANumber(String),

    /// The operand has a JSON type the comparator cannot handle.
    #[error("unsupported {kind} operand: {value}")]
    InvalidOperand { kind: &'static str, value: String },

    /// The operand could not be read as a date or time.
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    /// The condition does not belong to the comparator's category.
    #[error("condition {condition} is not supported for {category}")]
    UnsupportedCondition { category: String, condition: String },
}

/// Errors raised by the date/time parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemporalError {
    /// Empty input.
    #[error("empty date/time value")]
    Empty,

    /// The input matches a form whose field order cannot be decided.
    #[error("ambiguous date: {0}")]
    Ambiguous(String),

    /// The input is not in any supported form.
    #[error("unrecognized date/time: {0}")]
    Unrecognized(String),

    /// The input has the right shape but names an impossible date or time.
    #[error("date/time out of range: {0}")]
    OutOfRange(String),

    /// A date was required but only a time was given.
    #[error("no date in {0}")]
    MissingDate(String),

    /// A time of day was required but only a date was given.
    #[error("no time of day in {0}")]
    MissingTime(String),
}

/// Errors related to editing the application session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Rule index outside the rule list.
    #[error("no rule at index {index} (have {len})")]
    RuleIndex { index: usize, len: usize },

    /// Edited data is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Edited data is valid JSON but not an object.
    #[error("extracted data must be a JSON object")]
    NotAnObject,
}

/// Result type for the docval library.
pub type Result<T> = std::result::Result<T, DocvalError>;
