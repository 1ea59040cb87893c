//! Birthday matching against a given day

use chrono::NaiveDate;
use domain::BirthdayRecord;

/// Select the records whose birthday is observed on `today`
///
/// The birth year is ignored. February 29 birthdays also match February 28
/// in non-leap years. Input order is preserved.
#[must_use]
pub fn match_today(records: &[BirthdayRecord], today: NaiveDate) -> Vec<BirthdayRecord> {
    records
        .iter()
        .filter(|record| record.is_on(today))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use domain::BirthDate;
    use proptest::prelude::*;

    use super::*;

    fn record(name: &str, y: i32, m: u32, d: u32) -> BirthdayRecord {
        BirthdayRecord::new(name, BirthDate::from_ymd(y, m, d).unwrap())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn matches_month_and_day_only() {
        let records = vec![
            record("Anna Schmidt", 1990, 3, 15),
            record("Max Müller", 1985, 1, 1),
        ];
        let matched = match_today(&records, day(2024, 3, 15));
        assert_eq!(matched, vec![records[0].clone()]);
    }

    #[test]
    fn no_match_gives_empty_vec() {
        let records = vec![record("Anna Schmidt", 1990, 3, 15)];
        assert!(match_today(&records, day(2024, 3, 14)).is_empty());
    }

    #[test]
    fn preserves_insertion_order() {
        let records = vec![
            record("Zoe", 2001, 7, 4),
            record("Adam", 1970, 7, 4),
            record("Mia", 1999, 7, 4),
        ];
        let matched = match_today(&records, day(2030, 7, 4));
        let names: Vec<_> = matched.iter().map(BirthdayRecord::name).collect();
        assert_eq!(names, ["Zoe", "Adam", "Mia"]);
    }

    #[test]
    fn leap_day_policy() {
        let records = vec![record("Leap", 2000, 2, 29)];
        assert_eq!(match_today(&records, day(2023, 2, 28)).len(), 1);
        assert_eq!(match_today(&records, day(2024, 2, 29)).len(), 1);
        assert!(match_today(&records, day(2024, 2, 28)).is_empty());
        assert!(match_today(&records, day(2023, 3, 1)).is_empty());
    }

    #[test]
    fn yearless_birthdays_match() {
        let records = vec![BirthdayRecord::new(
            "Unknown Year",
            BirthDate::without_year(12, 24).unwrap(),
        )];
        assert_eq!(match_today(&records, day(2025, 12, 24)).len(), 1);
    }

    proptest! {
        #[test]
        fn year_is_irrelevant(
            birth_year in 1900i32..2100,
            today_year in 1900i32..2100,
            month in 1u32..=12,
            dom in 1u32..=28,
        ) {
            let records = vec![record("P", birth_year, month, dom)];
            let matched = match_today(&records, day(today_year, month, dom));
            prop_assert_eq!(matched.len(), 1);
        }
    }
}
