//! Regex patterns for the date/time parser.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // YYYY-MM-DD
    pub static ref DATE_ISO: Regex = Regex::new(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})$"
    ).unwrap();

    // YYYY/MM/DD or YYYY.MM.DD (year first is never ambiguous)
    pub static ref DATE_YMD: Regex = Regex::new(
        r"^(\d{4})[/.](\d{1,2})[/.](\d{1,2})$"
    ).unwrap();

    // DD.MM.YYYY
    pub static ref DATE_DMY_DOTTED: Regex = Regex::new(
        r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$"
    ).unwrap();

    // 01/02/2025, 01-02-25: day and month order cannot be decided
    pub static ref DATE_AMBIGUOUS: Regex = Regex::new(
        r"^\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}$"
    ).unwrap();

    // [Weekday,] 15[th] January[,] 2024
    pub static ref DATE_DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)^(?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+)?(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]+)\.?,?\s+(\d{4})$"
    ).unwrap();

    // [Weekday,] January 15[th][,] 2024
    pub static ref DATE_MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)^(?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+)?([a-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$"
    ).unwrap();

    // YYYY-MM-DD followed by T or whitespace and a time
    pub static ref DATETIME_ISO: Regex = Regex::new(
        r"^(\d{4}-\d{1,2}-\d{1,2})(?:T|\s+)(.+)$"
    ).unwrap();

    // Any date form followed by a trailing time, e.g. "15 Jan 2024, 10:30"
    pub static ref TRAILING_TIME: Regex = Regex::new(
        r"(?i)^(.+?)[\s,]+(?:at\s+)?(\d{1,2}:\d{2}(?::\d{2}(?:\.\d{1,9})?)?(?:\s*[ap]\.?m\.?)?)$"
    ).unwrap();

    // HH:MM[:SS[.fff]]
    pub static ref TIME_24H: Regex = Regex::new(
        r"^(\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?$"
    ).unwrap();

    // 10 PM, 10:30 a.m., 10:30:15pm
    pub static ref TIME_12H: Regex = Regex::new(
        r"(?i)^(\d{1,2})(?::(\d{2}))?(?::(\d{2}))?\s*([ap])\.?m\.?$"
    ).unwrap();
}
