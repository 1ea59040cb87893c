//! Birthday extraction
//!
//! Turns contact records into birthday records. Contacts without a
//! birthdate, or with one no parse strategy accepts, are skipped.

use domain::{BirthDate, BirthdateParse, BirthdayRecord, ContactRecord};
use tracing::{debug, warn};

/// Extract one birthday record per contact with a parsable birthdate
///
/// Output order follows input order.
pub fn extract_birthdays<'a, I>(contacts: I) -> Vec<BirthdayRecord>
where
    I: IntoIterator<Item = &'a ContactRecord>,
{
    contacts.into_iter().filter_map(extract_birthday).collect()
}

/// Extract a single birthday record
pub fn extract_birthday(contact: &ContactRecord) -> Option<BirthdayRecord> {
    let Some(raw) = contact.raw_birthdate() else {
        debug!(name = %contact.display_name(), "Contact has no birthdate");
        return None;
    };

    match BirthDate::parse(raw) {
        BirthdateParse::Parsed(birth_date) => {
            Some(BirthdayRecord::new(contact.display_name(), birth_date))
        },
        BirthdateParse::Unparsable => {
            warn!(
                name = %contact.display_name(),
                raw_birthdate = %raw,
                "Skipping contact with unparsable birthdate"
            );
            None
        },
    }
}
