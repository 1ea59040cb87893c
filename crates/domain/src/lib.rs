//! Domain layer for the birthday reminder
//!
//! Contains the contact and birthday records, the birthdate parsing rules,
//! the localized text bundles and the value objects shared by every layer.
//! Nothing in here performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
