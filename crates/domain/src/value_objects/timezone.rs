//! Timezone value object

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// An IANA timezone, validated against the chrono-tz database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA identifier such as `Europe/Berlin`
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        Tz::from_str(name.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// The local calendar date at the given instant
    #[must_use]
    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        today_in(self.0, now)
    }
}

/// Resolve "today" in `tz` for the instant `now`
#[must_use]
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Europe::Berlin)
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Timezone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timezone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}
