//! Application layer - Use cases and orchestration
//!
//! Contains the birthday pipeline (extraction, matching, subject
//! formatting), the port definitions and the service that runs one
//! reminder batch against those ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
