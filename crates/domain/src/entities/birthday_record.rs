//! Birthday record entity

use chrono::NaiveDate;

use crate::value_objects::BirthDate;

/// A contact name paired with a normalized birth date
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BirthdayRecord {
    name: String,
    birth_date: BirthDate,
}

impl BirthdayRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, birth_date: BirthDate) -> Self {
        Self {
            name: name.into(),
            birth_date,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    /// Whether this birthday is observed on `today`
    #[must_use]
    pub fn is_on(&self, today: NaiveDate) -> bool {
        self.birth_date.falls_on(today)
    }
}
