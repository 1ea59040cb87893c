//! Notification subject formatting
//!
//! Subjects read `"<label> <name> (*<birth date>)"`, with the birth date
//! rendered through a user-configurable strftime pattern.

use std::fmt::Write;

use chrono::NaiveDate;
use domain::{BirthDate, BirthdayRecord};
use tracing::warn;

/// Date pattern used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

const YEARLESS_FALLBACK: &str = "%d.%m";

/// Build the subject line for one birthday
#[must_use]
pub fn format_subject(label: &str, record: &BirthdayRecord, date_format: &str) -> String {
    format!(
        "{label} {} (*{})",
        record.name(),
        format_birth_date(record.birth_date(), date_format)
    )
}

/// Render a birth date with `date_format`
///
/// Year tokens are removed from the pattern when the year is unknown. An
/// unusable pattern, or one that renders nothing, falls back to
/// [`DEFAULT_DATE_FORMAT`] (`%d.%m` for yearless dates).
#[must_use]
pub fn format_birth_date(birth_date: BirthDate, date_format: &str) -> String {
    let date = birth_date.date();
    let (pattern, fallback) = if birth_date.year_known() {
        (date_format.to_string(), DEFAULT_DATE_FORMAT)
    } else {
        (strip_year_tokens(date_format), YEARLESS_FALLBACK)
    };

    render(date, &pattern).unwrap_or_else(|| {
        warn!(pattern = %date_format, "Unusable date format, using fallback");
        date.format(fallback).to_string()
    })
}

/// Whether `pattern` can render a plain calendar date
#[must_use]
pub fn is_valid_date_format(pattern: &str) -> bool {
    !pattern.trim().is_empty()
        && NaiveDate::from_ymd_opt(2000, 1, 31).is_some_and(|d| render(d, pattern).is_some())
}

/// Remove year tokens together with one adjacent separator
///
/// Composite specifiers such as `%F` or `%D` are expanded first. A separator
/// before the token is preferred, so `%d.%m.%Y` becomes `%d.%m` and
/// `%Y-%m-%d` becomes `%m-%d`.
#[must_use]
pub fn strip_year_tokens(pattern: &str) -> String {
    let expanded = expand_composites(pattern);
    let pattern = expanded.as_str();
    let mut tokens: Vec<Option<Token<'_>>> = tokenize(pattern).into_iter().map(Some).collect();

    for i in 0..tokens.len() {
        if !matches!(tokens[i], Some(Token::Spec(spec)) if is_year_spec(spec)) {
            continue;
        }
        tokens[i] = None;
        if i > 0 && matches!(tokens[i - 1], Some(Token::Literal(c)) if is_separator(c)) {
            tokens[i - 1] = None;
        } else if matches!(tokens.get(i + 1), Some(Some(Token::Literal(c))) if is_separator(*c)) {
            tokens[i + 1] = None;
        }
    }

    let stripped: String = tokens
        .into_iter()
        .flatten()
        .map(|token| match token {
            Token::Spec(spec) => spec.to_string(),
            Token::Literal(c) => c.to_string(),
        })
        .collect();
    stripped.trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Spec(&'a str),
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = pattern.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c != '%' {
            tokens.push(Token::Literal(c));
            continue;
        }
        // optional padding flag, then the specifier itself
        chars.next_if(|&(_, f)| matches!(f, '-' | '_' | '0' | '#'));
        let end = chars
            .next()
            .map_or(pattern.len(), |(i, spec)| i + spec.len_utf8());
        tokens.push(Token::Spec(&pattern[start..end]));
    }
    tokens
}

/// Rewrite composite specifiers into their component tokens
fn expand_composites(pattern: &str) -> String {
    tokenize(pattern)
        .into_iter()
        .map(|token| match token {
            Token::Spec(spec) => match spec.chars().last() {
                Some('F') => "%Y-%m-%d".to_string(),
                Some('D' | 'x') => "%m/%d/%y".to_string(),
                Some('v') => "%e-%b-%Y".to_string(),
                Some('c') => "%a %b %e %H:%M:%S %Y".to_string(),
                _ => spec.to_string(),
            },
            Token::Literal(c) => c.to_string(),
        })
        .collect()
}

fn is_year_spec(spec: &str) -> bool {
    matches!(spec.chars().last(), Some('Y' | 'y' | 'C' | 'G' | 'g'))
}

fn is_separator(c: char) -> bool {
    !c.is_alphanumeric() && c != '%'
}

fn render(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    (!out.trim().is_empty()).then_some(out)
}
