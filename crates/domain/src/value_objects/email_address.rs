//! Email address value objects
//!
//! # Examples
//!
//! ```
//! use domain::{EmailAddress, Mailbox};
//!
//! let email = EmailAddress::new("Reminder@Example.COM").unwrap();
//! assert_eq!(email.as_str(), "reminder@example.com");
//!
//! let sender = Mailbox::named("Birthday Bot", email);
//! assert_eq!(sender.to_string(), "\"Birthday Bot\" <reminder@example.com>");
//!
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated, lowercased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let candidate = Self {
            value: email.into().trim().to_lowercase(),
        };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;
        Ok(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Domain part (after @), used for the SMTP `Message-ID`
    pub fn domain(&self) -> &str {
        self.value.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An address with an optional display name, as used in `From:` headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    name: Option<String>,
    address: EmailAddress,
}

impl Mailbox {
    /// A bare address without display name
    #[must_use]
    pub const fn new(address: EmailAddress) -> Self {
        Self {
            name: None,
            address,
        }
    }

    /// An address with a display name; blank names are dropped
    #[must_use]
    pub fn named(name: impl Into<String>, address: EmailAddress) -> Self {
        let name = name.into();
        let name = name.trim();
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            address,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn address(&self) -> &EmailAddress {
        &self.address
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => {
                let quoted = name.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{quoted}\" <{}>", self.address)
            },
            None => write!(f, "{}", self.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_is_normalized() {
        let email = EmailAddress::new("  Anna@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "anna@example.com");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert!(EmailAddress::new("not-an-email").is_err());
        assert!(EmailAddress::new("@nodomain.com").is_err());
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let email = EmailAddress::new("test@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"test@example.com\"");
        let parsed: EmailAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(email, parsed);
    }

    #[test]
    fn mailbox_without_name_is_bare_address() {
        let mailbox = Mailbox::new(EmailAddress::new("bot@example.com").unwrap());
        assert_eq!(mailbox.to_string(), "bot@example.com");
        assert_eq!(mailbox.name(), None);
    }

    #[test]
    fn mailbox_blank_name_is_dropped() {
        let mailbox = Mailbox::named("   ", EmailAddress::new("bot@example.com").unwrap());
        assert_eq!(mailbox.to_string(), "bot@example.com");
    }

    #[test]
    fn mailbox_quotes_display_name() {
        let mailbox = Mailbox::named(
            "Bot \"Reminder\"",
            EmailAddress::new("bot@example.com").unwrap(),
        );
        assert_eq!(
            mailbox.to_string(),
            "\"Bot \\\"Reminder\\\"\" <bot@example.com>"
        );
    }
}
