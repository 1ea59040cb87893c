//! Value Objects - Immutable, identity-less domain primitives

mod birth_date;
mod email_address;
mod language;
mod timezone;

pub use birth_date::{BirthDate, BirthdateParse, SENTINEL_YEAR, YEAR_RANGE};
pub use email_address::{EmailAddress, Mailbox};
pub use language::{Language, TextBundle};
pub use timezone::{Timezone, today_in};
