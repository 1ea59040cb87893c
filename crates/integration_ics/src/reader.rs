//! Reading exported birthday calendars back
//!
//! Used to verify exports and by `export` callers that want to report what
//! was written.

use chrono::NaiveDate;
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::IcsError;

/// A VEVENT as found in an exported calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedEvent {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub rrule: Option<String>,
    pub status: Option<String>,
    pub alarms: Vec<ExportedAlarm>,
}

/// A VALARM nested in an exported event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedAlarm {
    pub action: String,
    pub trigger: String,
    pub description: Option<String>,
}

/// Parse all VEVENTs of an iCalendar document
pub fn read_calendar_events(content: &str) -> Result<Vec<ExportedEvent>, IcsError> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| IcsError::Parse(e.to_string()))?;

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_event)
        .collect()
}

fn parse_event(component: &Component<'_>) -> Result<ExportedEvent, IcsError> {
    let uid = text(component, "UID").ok_or(IcsError::MissingProperty("UID"))?;
    let summary = text(component, "SUMMARY").ok_or(IcsError::MissingProperty("SUMMARY"))?;

    let alarms = component
        .components
        .iter()
        .filter(|c| c.name == "VALARM")
        .map(|alarm| ExportedAlarm {
            action: text(alarm, "ACTION").unwrap_or_default(),
            trigger: text(alarm, "TRIGGER").unwrap_or_default(),
            description: text(alarm, "DESCRIPTION"),
        })
        .collect();

    Ok(ExportedEvent {
        uid,
        summary,
        description: text(component, "DESCRIPTION"),
        start: date(component, "DTSTART"),
        end: date(component, "DTEND"),
        rrule: text(component, "RRULE"),
        status: text(component, "STATUS"),
        alarms,
    })
}

fn text(component: &Component<'_>, name: &str) -> Option<String> {
    component
        .find_prop(name)
        .map(|p| unescape_text(p.val.as_ref()))
}

fn date(component: &Component<'_>, name: &str) -> Option<NaiveDate> {
    let prop = component.find_prop(name)?;
    match DatePerhapsTime::try_from(prop).ok()? {
        DatePerhapsTime::Date(date) => Some(date),
        DatePerhapsTime::DateTime(_) => None,
    }
}

/// Undo RFC 5545 TEXT escaping
fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
