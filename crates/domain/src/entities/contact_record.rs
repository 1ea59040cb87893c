//! Contact record entity
//!
//! One entry from a directory export, reduced to the fields the reminder
//! cares about.

use crate::errors::DomainError;

/// A parsed directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    /// Formatted name (vCard `FN`), never empty
    display_name: String,
    /// `BDAY` value with parameters stripped, unparsed
    raw_birthdate: Option<String>,
}

impl ContactRecord {
    /// Create a contact record
    ///
    /// The name is trimmed; an empty name is rejected. A blank birthdate is
    /// treated as absent.
    pub fn new(
        display_name: impl Into<String>,
        raw_birthdate: Option<String>,
    ) -> Result<Self, DomainError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(DomainError::ValidationError(
                "contact display name must not be empty".to_string(),
            ));
        }
        let raw_birthdate = raw_birthdate
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());
        Ok(Self {
            display_name,
            raw_birthdate,
        })
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn raw_birthdate(&self) -> Option<&str> {
        self.raw_birthdate.as_deref()
    }
}
