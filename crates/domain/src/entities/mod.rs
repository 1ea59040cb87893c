//! Domain entities - records flowing through the reminder pipeline

mod birthday_record;
mod contact_record;

pub use birthday_record::BirthdayRecord;
pub use contact_record::ContactRecord;
