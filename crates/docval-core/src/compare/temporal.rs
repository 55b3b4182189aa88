//! Date and time comparison.
//!
//! Parsing is permissive about human phrasing but never guesses: forms whose
//! day/month order cannot be decided (`01/02/2025`) are rejected, and no value
//! is ever anchored to the current date. All values are timezone-naive; an
//! explicit UTC offset is dropped and the wall-clock time kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use super::patterns::{
    DATETIME_ISO, DATE_AMBIGUOUS, DATE_DAY_MONTH_YEAR, DATE_DMY_DOTTED, DATE_ISO,
    DATE_MONTH_DAY_YEAR, DATE_YMD, TIME_12H, TIME_24H, TRAILING_TIME,
};
use super::{unsupported, Comparator};
use crate::error::{CompareError, TemporalError};
use crate::models::{Category, Condition};

type Result<T> = std::result::Result<T, TemporalError>;

/// Date and/or time read from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temporal {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl Temporal {
    /// Instant for date comparisons; a missing time means midnight.
    pub fn instant(&self, source: &str) -> Result<NaiveDateTime> {
        let date = self
            .date
            .ok_or_else(|| TemporalError::MissingDate(source.to_string()))?;
        Ok(date.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }

    /// Time of day for time comparisons.
    pub fn time_of_day(&self, source: &str) -> Result<NaiveTime> {
        self.time
            .ok_or_else(|| TemporalError::MissingTime(source.to_string()))
    }
}

/// Parse a date, a time, or both.
pub fn parse_temporal(input: &str) -> Result<Temporal> {
    let s = input.trim();
    if s.is_empty() {
        return Err(TemporalError::Empty);
    }

    if let Some(dt) = parse_with_offset(s) {
        return Ok(Temporal {
            date: Some(dt.date()),
            time: Some(dt.time()),
        });
    }

    if let Some(caps) = DATETIME_ISO.captures(s) {
        let date = parse_date(&caps[1])?;
        let time = parse_time(&caps[2])?;
        return Ok(Temporal {
            date: Some(date),
            time: Some(time),
        });
    }

    match parse_date(s) {
        Ok(date) => {
            return Ok(Temporal {
                date: Some(date),
                time: None,
            });
        }
        Err(TemporalError::Unrecognized(_)) => {}
        Err(e) => return Err(e),
    }

    match parse_time(s) {
        Ok(time) => {
            return Ok(Temporal {
                date: None,
                time: Some(time),
            });
        }
        Err(TemporalError::Unrecognized(_)) => {}
        Err(e) => return Err(e),
    }

    if let Some(caps) = TRAILING_TIME.captures(s) {
        let date = parse_date(caps[1].trim_end_matches(','))?;
        let time = parse_time(&caps[2])?;
        return Ok(Temporal {
            date: Some(date),
            time: Some(time),
        });
    }

    Err(TemporalError::Unrecognized(s.to_string()))
}

/// Parse a value that must contain a date into a naive instant.
pub fn parse_instant(input: &str) -> Result<NaiveDateTime> {
    parse_temporal(input)?.instant(input.trim())
}

/// Parse a value that must contain a time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    parse_temporal(input)?.time_of_day(input.trim())
}

fn parse_with_offset(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z"))
        .ok()
        .map(|dt| dt.naive_local())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Some(caps) = DATE_ISO.captures(s).or_else(|| DATE_YMD.captures(s)) {
        return ymd(s, &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = DATE_DMY_DOTTED.captures(s) {
        return ymd(s, &caps[3], &caps[2], &caps[1]);
    }

    if DATE_AMBIGUOUS.is_match(s) {
        return Err(TemporalError::Ambiguous(s.to_string()));
    }

    if let Some(caps) = DATE_DAY_MONTH_YEAR.captures(s) {
        if let Some(month) = month_number(&caps[2]) {
            return ymd(s, &caps[3], &month.to_string(), &caps[1]);
        }
    }

    if let Some(caps) = DATE_MONTH_DAY_YEAR.captures(s) {
        if let Some(month) = month_number(&caps[1]) {
            return ymd(s, &caps[3], &month.to_string(), &caps[2]);
        }
    }

    Err(TemporalError::Unrecognized(s.to_string()))
}

fn ymd(source: &str, year: &str, month: &str, day: &str) -> Result<NaiveDate> {
    let out_of_range = || TemporalError::OutOfRange(source.to_string());
    let year: i32 = year.parse().map_err(|_| out_of_range())?;
    let month: u32 = month.parse().map_err(|_| out_of_range())?;
    let day: u32 = day.parse().map_err(|_| out_of_range())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();

    if let Some(caps) = TIME_24H.captures(s) {
        let hour: u32 = caps[1].parse().unwrap_or(u32::MAX);
        let minute: u32 = caps[2].parse().unwrap_or(u32::MAX);
        let second: u32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).unwrap_or(u32::MAX);
        let nanos = caps.get(4).map_or(0, |m| fraction_to_nanos(m.as_str()));
        return NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
            .ok_or_else(|| TemporalError::OutOfRange(s.to_string()));
    }

    if let Some(caps) = TIME_12H.captures(s) {
        let hour: u32 = caps[1].parse().unwrap_or(u32::MAX);
        let minute: u32 = caps.get(2).map_or(Ok(0), |m| m.as_str().parse()).unwrap_or(u32::MAX);
        let second: u32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).unwrap_or(u32::MAX);
        if !(1..=12).contains(&hour) {
            return Err(TemporalError::OutOfRange(s.to_string()));
        }
        let pm = caps[4].eq_ignore_ascii_case("p");
        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        return NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TemporalError::OutOfRange(s.to_string()));
    }

    Err(TemporalError::Unrecognized(s.to_string()))
}

fn fraction_to_nanos(digits: &str) -> u32 {
    // right-pad to nine digits: "5" -> 500_000_000
    let padded = format!("{:0<9}", digits);
    padded[..9].parse().unwrap_or(0)
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn operand_str<'a>(value: &'a Value, kind: &'static str) -> std::result::Result<&'a str, CompareError> {
    value.as_str().ok_or_else(|| CompareError::InvalidOperand {
        kind,
        value: value.to_string(),
    })
}

/// Compare two instants. `before_date`/`after_date` are strict.
pub fn compare_dates(
    condition: Condition,
    actual: NaiveDateTime,
    expected: NaiveDateTime,
) -> std::result::Result<bool, CompareError> {
    match condition {
        Condition::Equals => Ok(actual == expected),
        Condition::NotEquals => Ok(actual != expected),
        Condition::BeforeDate => Ok(actual < expected),
        Condition::AfterDate => Ok(actual > expected),
        other => Err(unsupported(Category::Date, other)),
    }
}

/// Compare two times of day. `less_than` means earlier.
pub fn compare_times(
    condition: Condition,
    actual: NaiveTime,
    expected: NaiveTime,
) -> std::result::Result<bool, CompareError> {
    match condition {
        Condition::Equals => Ok(actual == expected),
        Condition::NotEquals => Ok(actual != expected),
        Condition::LessThan => Ok(actual < expected),
        Condition::GreaterThan => Ok(actual > expected),
        other => Err(unsupported(Category::Time, other)),
    }
}

/// Comparator for the date category.
pub struct DateComparator;

impl Comparator for DateComparator {
    type Operand = NaiveDateTime;

    fn category(&self) -> Category {
        Category::Date
    }

    fn coerce(&self, value: &Value) -> std::result::Result<NaiveDateTime, CompareError> {
        Ok(parse_instant(operand_str(value, "date")?)?)
    }

    fn compare(
        &self,
        condition: Condition,
        actual: &NaiveDateTime,
        expected: &NaiveDateTime,
    ) -> std::result::Result<bool, CompareError> {
        compare_dates(condition, *actual, *expected)
    }
}

/// Comparator for the time category.
pub struct TimeComparator;

impl Comparator for TimeComparator {
    type Operand = NaiveTime;

    fn category(&self) -> Category {
        Category::Time
    }

    fn coerce(&self, value: &Value) -> std::result::Result<NaiveTime, CompareError> {
        Ok(parse_time_of_day(operand_str(value, "time")?)?)
    }

    fn compare(
        &self,
        condition: Condition,
        actual: &NaiveTime,
        expected: &NaiveTime,
    ) -> std::result::Result<bool, CompareError> {
        compare_times(condition, *actual, *expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = date(2024, 1, 15).and_time(NaiveTime::MIN);
        for input in [
            "2024-01-15",
            "2024-1-15",
            "2024/01/15",
            "15.01.2024",
            "15 January 2024",
            "15th Jan 2024",
            "15 Jan. 2024",
            "January 15, 2024",
            "Jan 15 2024",
            "Monday, January 15, 2024",
            "  2024-01-15  ",
        ] {
            assert_eq!(parse_instant(input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_parse_datetime_forms() {
        let expected = date(2024, 1, 15).and_time(hms(10, 30, 0));
        for input in [
            "2024-01-15T10:30:00",
            "2024-01-15 10:30",
            "2024-01-15T10:30:00Z",
            "2024-01-15T10:30:00+02:00",
            "January 15, 2024 10:30",
            "15 Jan 2024, 10:30 AM",
            "15.01.2024 at 10:30",
        ] {
            assert_eq!(parse_instant(input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_parse_time_forms() {
        assert_eq!(parse_time_of_day("14:05:09").unwrap(), hms(14, 5, 9));
        assert_eq!(parse_time_of_day("9:05").unwrap(), hms(9, 5, 0));
        assert_eq!(parse_time_of_day("2 PM").unwrap(), hms(14, 0, 0));
        assert_eq!(parse_time_of_day("12:15 a.m.").unwrap(), hms(0, 15, 0));
        assert_eq!(parse_time_of_day("12:00pm").unwrap(), hms(12, 0, 0));
        assert_eq!(
            parse_time_of_day("10:00:00.5").unwrap(),
            NaiveTime::from_hms_milli_opt(10, 0, 0, 500).unwrap()
        );
        assert_eq!(parse_time_of_day("2024-01-15T08:00:00").unwrap(), hms(8, 0, 0));
    }

    #[test]
    fn test_ambiguous_dates_rejected() {
        assert_eq!(
            parse_instant("01/02/2025"),
            Err(TemporalError::Ambiguous("01/02/2025".to_string()))
        );
        assert!(matches!(parse_instant("01-02-25"), Err(TemporalError::Ambiguous(_))));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(parse_instant(""), Err(TemporalError::Empty));
        assert!(matches!(parse_instant("2024-02-30"), Err(TemporalError::OutOfRange(_))));
        assert!(matches!(parse_instant("31.13.2024"), Err(TemporalError::OutOfRange(_))));
        assert!(matches!(parse_time_of_day("25:00"), Err(TemporalError::OutOfRange(_))));
        assert!(matches!(parse_time_of_day("13 PM"), Err(TemporalError::OutOfRange(_))));
        assert!(matches!(parse_instant("next tuesday"), Err(TemporalError::Unrecognized(_))));
        assert!(matches!(parse_instant("15 Smarch 2024"), Err(TemporalError::Unrecognized(_))));
    }

    #[test]
    fn test_missing_components() {
        assert!(matches!(parse_instant("10:30"), Err(TemporalError::MissingDate(_))));
        assert!(matches!(parse_time_of_day("2024-01-15"), Err(TemporalError::MissingTime(_))));
    }

    #[test]
    fn test_date_conditions_are_strict() {
        let a = parse_instant("2024-01-15").unwrap();
        let b = parse_instant("2024-01-16").unwrap();

        assert!(compare_dates(Condition::BeforeDate, a, b).unwrap());
        assert!(!compare_dates(Condition::AfterDate, a, b).unwrap());
        assert!(!compare_dates(Condition::Equals, a, b).unwrap());
        assert!(compare_dates(Condition::NotEquals, a, b).unwrap());

        assert!(!compare_dates(Condition::BeforeDate, a, a).unwrap());
        assert!(!compare_dates(Condition::AfterDate, a, a).unwrap());
        assert!(compare_dates(Condition::Equals, a, a).unwrap());
    }

    #[test]
    fn test_date_rejects_foreign_conditions() {
        let a = parse_instant("2024-01-15").unwrap();
        let err = compare_dates(Condition::GreaterThan, a, a).unwrap_err();
        assert_eq!(
            err,
            CompareError::UnsupportedCondition {
                category: "date".to_string(),
                condition: "greater_than".to_string(),
            }
        );
    }

    #[test]
    fn test_equivalent_phrasings_are_equal() {
        let comparator = DateComparator;
        assert!(comparator
            .evaluate(Condition::Equals, &json!("January 15, 2024"), &json!("2024-01-15"))
            .unwrap());
    }

    #[test]
    fn test_time_comparator() {
        let comparator = TimeComparator;
        assert!(comparator
            .evaluate(Condition::GreaterThan, &json!("14:00:00"), &json!("09:30:00"))
            .unwrap());
        assert!(comparator
            .evaluate(Condition::LessThan, &json!("2 AM"), &json!("09:30:00"))
            .unwrap());
        assert!(comparator
            .evaluate(Condition::Equals, &json!("14:00"), &json!("2 PM"))
            .unwrap());
        assert!(comparator
            .evaluate(Condition::BeforeDate, &json!("14:00"), &json!("15:00"))
            .is_err());
    }

    #[test]
    fn test_non_string_operand() {
        let err = DateComparator.coerce(&json!(20240115)).unwrap_err();
        assert!(matches!(err, CompareError::InvalidOperand { kind: "date", .. }));
    }
}
