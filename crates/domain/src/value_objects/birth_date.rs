//! Birth date value object
//!
//! Directory exports encode birthdays in several textual forms. A raw value
//! is run through an ordered list of parse strategies; the first one that
//! succeeds wins and exhaustion yields [`BirthdateParse::Unparsable`].
//!
//! # Examples
//!
//! ```
//! use domain::{BirthDate, BirthdateParse};
//!
//! let parsed = BirthDate::parse("1990-03-15");
//! assert!(parsed.is_parsed());
//!
//! let compact = BirthDate::parse("19850101").into_option().unwrap();
//! assert_eq!(compact.year(), Some(1985));
//!
//! assert_eq!(BirthDate::parse("15.03.1990"), BirthdateParse::Unparsable);
//! ```

use std::{fmt, ops::RangeInclusive};

use chrono::{Datelike, Days, NaiveDate};

use crate::errors::DomainError;

/// Placeholder year for birthdays recorded without a year.
///
/// 1604 is a leap year, so `--0229` stays representable.
pub const SENTINEL_YEAR: i32 = 1604;

/// Supported birth years
///
/// iCalendar `DATE` values have exactly four year digits, and the exclusive
/// end of a birthday event lies one day later, so 9998 is the last year
/// whose event still fits.
pub const YEAR_RANGE: RangeInclusive<i32> = 1..=9998;

/// A birthday as a calendar date
///
/// When the source carried no year, the date uses [`SENTINEL_YEAR`] and
/// [`BirthDate::year`] returns `None`. The year always lies in
/// [`YEAR_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthDate {
    date: NaiveDate,
    year_known: bool,
}

/// Outcome of running a raw birthdate through the parse cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdateParse {
    /// One of the strategies accepted the value
    Parsed(BirthDate),
    /// No strategy accepted the value
    Unparsable,
}

impl BirthdateParse {
    /// Whether a strategy accepted the value
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Convert into an `Option`, dropping the unparsable tag
    #[must_use]
    pub const fn into_option(self) -> Option<BirthDate> {
        match self {
            Self::Parsed(date) => Some(date),
            Self::Unparsable => None,
        }
    }
}

type ParseStrategy = fn(&str) -> Option<BirthDate>;

/// Ordered parse cascade: ISO `YYYY-MM-DD`, compact `YYYYMMDD`, yearless `--MMDD`
const PARSE_STRATEGIES: &[(&str, ParseStrategy)] = &[
    ("iso", parse_iso),
    ("compact", parse_compact),
    ("yearless", parse_yearless),
];

impl BirthDate {
    /// Create a birth date with a known year
    pub fn from_date(date: NaiveDate) -> Result<Self, DomainError> {
        if !YEAR_RANGE.contains(&date.year()) {
            return Err(DomainError::InvalidDateTime(format!(
                "birth year {} outside {}..={}",
                date.year(),
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            )));
        }
        Ok(Self {
            date,
            year_known: true,
        })
    }

    /// Create a birth date from year, month and day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DomainError::InvalidDateTime(format!("{year:04}-{month:02}-{day:02}")))
            .and_then(Self::from_date)
    }

    /// Create a birth date whose year is unknown
    pub fn without_year(month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(SENTINEL_YEAR, month, day)
            .map(|date| Self {
                date,
                year_known: false,
            })
            .ok_or_else(|| DomainError::InvalidDateTime(format!("--{month:02}-{day:02}")))
    }

    /// Run a raw directory value through the parse cascade
    pub fn parse(raw: &str) -> BirthdateParse {
        let value = raw.trim();
        PARSE_STRATEGIES
            .iter()
            .find_map(|(_, strategy)| strategy(value))
            .map_or(BirthdateParse::Unparsable, BirthdateParse::Parsed)
    }

    /// The underlying calendar date (sentinel year if the year is unknown)
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether the source carried a real birth year
    #[must_use]
    pub const fn year_known(&self) -> bool {
        self.year_known
    }

    /// The birth year, if known
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.year_known.then(|| self.date.year())
    }

    /// Month (1-12)
    #[must_use]
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of month (1-31)
    #[must_use]
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Whether this is a February 29 birthday
    #[must_use]
    pub fn is_leap_day(&self) -> bool {
        self.month() == 2 && self.day() == 29
    }

    /// The day after the birthday, i.e. the exclusive end of its all-day event
    #[must_use]
    pub fn day_after(&self) -> NaiveDate {
        // cannot overflow within YEAR_RANGE
        self.date
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether the birthday is observed on the given day
    ///
    /// Month and day must match; the year is ignored. February 29
    /// birthdays are observed on February 28 in non-leap years.
    #[must_use]
    pub fn falls_on(&self, day: NaiveDate) -> bool {
        if self.month() == day.month() && self.day() == day.day() {
            return true;
        }
        self.is_leap_day() && day.month() == 2 && day.day() == 28 && !is_leap_year(day.year())
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year_known {
            write!(f, "{}", self.date.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.date.format("--%m-%d"))
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// `YYYY-MM-DD` with exactly four unsigned year digits
fn parse_iso(value: &str) -> Option<BirthDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| BirthDate::from_date(date).ok())
}

fn parse_compact(value: &str) -> Option<BirthDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .and_then(|date| BirthDate::from_date(date).ok())
}

fn parse_yearless(value: &str) -> Option<BirthDate> {
    let rest = value.strip_prefix("--")?;
    let digits: String = match rest.len() {
        4 => rest.to_string(),
        5 if rest.as_bytes()[2] == b'-' => rest.replacen('-', "", 1),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = digits[..2].parse().ok()?;
    let day = digits[2..].parse().ok()?;
    BirthDate::without_year(month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_format() {
        let parsed = BirthDate::parse("1990-03-15").into_option().unwrap();
        assert_eq!(parsed.date(), date(1990, 3, 15));
        assert!(parsed.year_known());
    }

    #[test]
    fn parses_compact_format() {
        let parsed = BirthDate::parse("19850101").into_option().unwrap();
        assert_eq!(parsed.date(), date(1985, 1, 1));
        assert_eq!(parsed.year(), Some(1985));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(BirthDate::parse("  1990-03-15 ").is_parsed());
    }

    #[test]
    fn parses_yearless_formats() {
        let short = BirthDate::parse("--0315").into_option().unwrap();
        let dashed = BirthDate::parse("--03-15").into_option().unwrap();
        assert_eq!(short, dashed);
        assert!(!short.year_known());
        assert_eq!(short.year(), None);
        assert_eq!(short.date(), date(SENTINEL_YEAR, 3, 15));
    }

    #[test]
    fn yearless_leap_day_is_representable() {
        let leap = BirthDate::parse("--0229").into_option().unwrap();
        assert!(leap.is_leap_day());
    }

    #[test]
    fn rejects_unknown_encodings() {
        for raw in [
            "",
            "15.03.1990",
            "1990/03/15",
            "1990-13-01",
            "19900230",
            "1990315",
            "--1301",
            "--03-1",
            "1990-03-15T00:00:00Z",
        ] {
            assert_eq!(BirthDate::parse(raw), BirthdateParse::Unparsable, "{raw}");
        }
    }

    #[test]
    fn iso_requires_four_unsigned_year_digits() {
        for raw in ["-0001-03-15", "+12345-03-15", "+1990-03-15", "990-03-15", "1990-3-15"] {
            assert_eq!(BirthDate::parse(raw), BirthdateParse::Unparsable, "{raw}");
        }
    }

    #[test]
    fn years_outside_calendar_range_are_rejected() {
        assert_eq!(BirthDate::parse("9999-12-31"), BirthdateParse::Unparsable);
        assert_eq!(BirthDate::parse("99991231"), BirthdateParse::Unparsable);
        assert_eq!(BirthDate::parse("0000-03-15"), BirthdateParse::Unparsable);
        assert!(BirthDate::from_ymd(9999, 1, 1).is_err());
        assert!(BirthDate::from_ymd(0, 1, 1).is_err());

        let last = BirthDate::parse("9998-12-31").into_option().unwrap();
        assert_eq!(last.day_after(), date(9999, 1, 1));
        assert!(BirthDate::parse("0001-01-01").is_parsed());
    }

    #[test]
    fn day_after_crosses_month_and_year() {
        let eve = BirthDate::from_ymd(1990, 12, 31).unwrap();
        assert_eq!(eve.day_after(), date(1991, 1, 1));
        let leap = BirthDate::without_year(2, 29).unwrap();
        assert_eq!(leap.day_after(), date(SENTINEL_YEAR, 3, 1));
    }

    #[test]
    fn falls_on_ignores_year() {
        let bday = BirthDate::from_ymd(1990, 3, 15).unwrap();
        assert!(bday.falls_on(date(2024, 3, 15)));
        assert!(bday.falls_on(date(1990, 3, 15)));
        assert!(!bday.falls_on(date(2024, 3, 16)));
        assert!(!bday.falls_on(date(2024, 4, 15)));
    }

    #[test]
    fn leap_day_observed_on_feb_28_in_common_years() {
        let bday = BirthDate::from_ymd(2000, 2, 29).unwrap();
        assert!(bday.falls_on(date(2024, 2, 29)));
        assert!(bday.falls_on(date(2023, 2, 28)));
        assert!(!bday.falls_on(date(2024, 2, 28)));
        assert!(!bday.falls_on(date(2023, 3, 1)));
    }

    #[test]
    fn display_formats() {
        let known = BirthDate::from_ymd(1990, 3, 15).unwrap();
        let unknown = BirthDate::without_year(3, 15).unwrap();
        assert_eq!(known.to_string(), "1990-03-15");
        assert_eq!(unknown.to_string(), "--03-15");
    }

    #[test]
    fn invalid_components_are_rejected() {
        assert!(BirthDate::from_ymd(1990, 2, 30).is_err());
        assert!(BirthDate::without_year(13, 1).is_err());
    }
}
