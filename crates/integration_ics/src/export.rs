//! Birthday calendar generation
//!
//! Every birthday becomes an all-day VEVENT that recurs yearly and carries
//! a single DISPLAY alarm nine hours after the start of the day.

use std::fmt::Write;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use domain::{BirthDate, BirthdayRecord, Language};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};
use tracing::debug;

/// Product identifier written into every exported calendar
pub const PRODID: &str = "-//Birthday Reminder//Birthday Calendar//EN";

const ALARM_TRIGGER: &str = "PT9H";
const RRULE_YEARLY: &str = "FREQ=YEARLY";
/// Feb 29 birthdays recur on the last day of February
const RRULE_LAST_DAY_OF_FEBRUARY: &str = "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=-1";

/// Serialize all birthdays as an iCalendar document
///
/// `dtstamp` is written as each event's DTSTAMP, which keeps the output
/// reproducible for a given input.
pub fn export_calendar(
    records: &[BirthdayRecord],
    language: Language,
    dtstamp: DateTime<Utc>,
) -> String {
    let mut calendar = Calendar::new();
    for record in records {
        calendar.push(birthday_event(record, language, dtstamp));
    }
    let calendar = calendar.done();

    debug!(events = records.len(), "Generated birthday calendar");
    strip_ics_bloat(&calendar.to_string())
}

/// Deterministic event UID: `<sanitized name>_<YYYYMMDD>`
pub fn event_uid(name: &str, birth_date: BirthDate) -> String {
    format!(
        "{}_{}",
        sanitize_uid(name),
        birth_date.date().format("%Y%m%d")
    )
}

/// Injective, prefix-free encoding of a name for use in a UID
///
/// Spaces become `_`; `_` and `~` are escaped with `~`; any other
/// whitespace becomes `~` plus its hex code point.
pub fn sanitize_uid(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            ' ' => out.push('_'),
            '_' => out.push_str("~_"),
            '~' => out.push_str("~~"),
            c if c.is_whitespace() => {
                let code = u32::from(c);
                // writing into a String cannot fail
                let _ = if code <= 0xFF {
                    write!(out, "~{code:02x}")
                } else {
                    write!(out, "~u{{{code:x}}}")
                };
            },
            c => out.push(c),
        }
    }
    out
}

/// `🎂 <name> (*DD.MM.YYYY)`, or `(*DD.MM.)` when the year is unknown
pub fn event_summary(record: &BirthdayRecord) -> String {
    let birth_date = record.birth_date();
    let pattern = if birth_date.year_known() {
        "%d.%m.%Y"
    } else {
        "%d.%m."
    };
    format!(
        "🎂 {} (*{})",
        record.name(),
        birth_date.date().format(pattern)
    )
}

fn recurrence_rule(birth_date: BirthDate) -> &'static str {
    if birth_date.is_leap_day() {
        RRULE_LAST_DAY_OF_FEBRUARY
    } else {
        RRULE_YEARLY
    }
}

fn birthday_event(
    record: &BirthdayRecord,
    language: Language,
    dtstamp: DateTime<Utc>,
) -> icalendar::Event {
    let birth_date = record.birth_date();
    let start = birth_date.date();
    let end = birth_date.day_after();
    let summary = event_summary(record);

    let mut event = icalendar::Event::new();
    event.uid(&event_uid(record.name(), birth_date));
    event.summary(&summary);
    event.description(&language.greeting(record.name()));
    event.add_property("DTSTAMP", dtstamp.format("%Y%m%dT%H%M%SZ").to_string());
    add_date_property(&mut event, "DTSTART", start);
    add_date_property(&mut event, "DTEND", end);
    event.add_property("RRULE", recurrence_rule(birth_date));
    event.add_property("STATUS", "CONFIRMED");

    // DISPLAY alarms require a DESCRIPTION; reuse the summary
    let mut alarm = Alarm::display(&summary, Trigger::after_start(Duration::hours(9)));
    alarm.add_property("TRIGGER", ALARM_TRIGGER);
    event.alarm(alarm);

    event.done()
}

fn add_date_property(event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    event.append_property(prop);
}

/// Post-process the icalendar crate's output
///
/// Sets our PRODID and removes the UID and DTSTAMP lines the crate adds to
/// VALARM components.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        match line {
            "BEGIN:VALARM" => in_valarm = true,
            "END:VALARM" => in_valarm = false,
            _ if line.starts_with("PRODID:") => {
                result.push_str("PRODID:");
                result.push_str(PRODID);
                result.push_str("\r\n");
                continue;
            },
            _ if in_valarm && (line.starts_with("UID:") || line.starts_with("DTSTAMP:")) => {
                continue;
            },
            _ => {},
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
