//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Unknown IANA timezone identifier
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_error_message() {
        let err = DomainError::InvalidEmailAddress("bad-email".to_string());
        assert_eq!(err.to_string(), "Invalid email address: bad-email");
    }

    #[test]
    fn invalid_timezone_error_message() {
        let err = DomainError::InvalidTimezone("Mars/Olympus".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }

    #[test]
    fn invalid_datetime_error_message() {
        let err = DomainError::InvalidDateTime("not a date".to_string());
        assert_eq!(err.to_string(), "Invalid date/time: not a date");
    }
}
