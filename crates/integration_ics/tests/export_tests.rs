//! End-to-end tests: generate a calendar, write it and read it back

use chrono::{NaiveDate, TimeZone, Utc};
use domain::{BirthDate, BirthdayRecord, Language};
use integration_ics::{PRODID, export_calendar, read_calendar_events, write_calendar};

fn dtstamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
}

fn records() -> Vec<BirthdayRecord> {
    vec![
        BirthdayRecord::new("Anna Schmidt", BirthDate::from_ymd(1990, 3, 15).unwrap()),
        BirthdayRecord::new("Max Müller", BirthDate::from_ymd(1985, 1, 1).unwrap()),
        BirthdayRecord::new("Erika", BirthDate::without_year(12, 24).unwrap()),
        BirthdayRecord::new("Leap Kid", BirthDate::from_ymd(2000, 2, 29).unwrap()),
    ]
}

#[test]
fn exported_calendar_reads_back() {
    let ics = export_calendar(&records(), Language::De, dtstamp());
    let events = read_calendar_events(&ics).unwrap();
    assert_eq!(events.len(), 4);

    let anna = &events[0];
    assert_eq!(anna.uid, "Anna_Schmidt_19900315");
    assert_eq!(anna.summary, "🎂 Anna Schmidt (*15.03.1990)");
    assert_eq!(anna.start, NaiveDate::from_ymd_opt(1990, 3, 15));
    assert_eq!(anna.end, NaiveDate::from_ymd_opt(1990, 3, 16));
    assert_eq!(anna.rrule.as_deref(), Some("FREQ=YEARLY"));
    assert_eq!(anna.status.as_deref(), Some("CONFIRMED"));
    assert_eq!(
        anna.description.as_deref(),
        Some(Language::De.greeting("Anna Schmidt").as_str())
    );

    assert_eq!(events[1].uid, "Max_Müller_19850101");
    assert_eq!(events[1].summary, "🎂 Max Müller (*01.01.1985)");
}

#[test]
fn every_event_has_one_display_alarm_at_nine() {
    let ics = export_calendar(&records(), Language::En, dtstamp());
    for event in read_calendar_events(&ics).unwrap() {
        assert_eq!(event.alarms.len(), 1, "{}", event.uid);
        assert_eq!(event.alarms[0].action, "DISPLAY");
        assert_eq!(event.alarms[0].trigger, "PT9H");
        let rrule = event.rrule.unwrap_or_default();
        assert!(!rrule.contains("COUNT"));
        assert!(!rrule.contains("UNTIL"));
    }
}

#[test]
fn yearless_birthday_uses_sentinel_year() {
    let ics = export_calendar(&records(), Language::En, dtstamp());
    let events = read_calendar_events(&ics).unwrap();
    let erika = events.iter().find(|e| e.uid == "Erika_16041224").unwrap();
    assert_eq!(erika.summary, "🎂 Erika (*24.12.)");
    assert_eq!(erika.start, NaiveDate::from_ymd_opt(1604, 12, 24));
}

#[test]
fn leap_day_recurs_on_last_day_of_february() {
    let ics = export_calendar(&records(), Language::En, dtstamp());
    let events = read_calendar_events(&ics).unwrap();
    let leap = events.iter().find(|e| e.uid == "Leap_Kid_20000229").unwrap();
    assert_eq!(
        leap.rrule.as_deref(),
        Some("FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=-1")
    );
    assert_eq!(leap.end, NaiveDate::from_ymd_opt(2000, 3, 1));
}

#[test]
fn output_is_deterministic_for_fixed_dtstamp() {
    let first = export_calendar(&records(), Language::De, dtstamp());
    let second = export_calendar(&records(), Language::De, dtstamp());
    assert_eq!(first, second);
    assert!(first.contains("DTSTAMP:20240601T083000Z"));
    assert!(first.contains(&format!("PRODID:{PRODID}")));
    assert!(first.lines().all(|line| !line.ends_with('\r')));
    assert!(first.contains("\r\n"));
}

#[test]
fn empty_calendar_is_valid() {
    let ics = export_calendar(&[], Language::En, dtstamp());
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    assert!(!ics.contains("BEGIN:VEVENT"));
    assert!(read_calendar_events(&ics).unwrap().is_empty());
}

#[test]
fn written_file_matches_generated_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("birthdays.ics");
    let ics = export_calendar(&records(), Language::En, dtstamp());

    write_calendar(&path, &ics).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, ics);
    assert_eq!(read_calendar_events(&written).unwrap().len(), 4);
}

#[test]
fn boundary_years_keep_four_digit_dates() {
    let raw_dates = ["0001-01-01", "9998-12-31", "-0001-03-15", "+12345-03-15", "9999-12-31"];
    let records: Vec<BirthdayRecord> = raw_dates
        .iter()
        .filter_map(|raw| BirthDate::parse(raw).into_option())
        .map(|bday| BirthdayRecord::new("Edge", bday))
        .collect();
    assert_eq!(records.len(), 2);

    let ics = export_calendar(&records, Language::En, dtstamp());
    for line in ics.lines().filter(|l| l.starts_with("DTSTART") || l.starts_with("DTEND")) {
        let value = line.rsplit(':').next().unwrap();
        assert_eq!(value.len(), 8, "{line}");
        assert!(value.bytes().all(|b| b.is_ascii_digit()), "{line}");
    }

    let events = read_calendar_events(&ics).unwrap();
    assert_eq!(events[0].start, NaiveDate::from_ymd_opt(1, 1, 1));
    assert_eq!(events[0].end, NaiveDate::from_ymd_opt(1, 1, 2));
    assert_eq!(events[1].start, NaiveDate::from_ymd_opt(9998, 12, 31));
    assert_eq!(events[1].end, NaiveDate::from_ymd_opt(9999, 1, 1));
}
