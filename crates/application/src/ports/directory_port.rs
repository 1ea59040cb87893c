//! Directory port for application layer
//!
//! Loads a snapshot of the contact directory. Implemented by the vCard
//! adapter in the infrastructure layer.

use async_trait::async_trait;
use domain::ContactRecord;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Directory port errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The source could not be reached
    #[error("Directory service unavailable: {0}")]
    Unavailable(String),

    /// The source answered with a non-success status
    #[error("Directory responded with HTTP {0}")]
    HttpStatus(u16),

    /// Credentials were rejected
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The request exceeded its timeout
    #[error("Directory request timed out")]
    Timeout,

    /// A local export file could not be read
    #[error("Failed to read directory file: {0}")]
    Io(String),
}

/// Port for loading contact records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Fetch and parse the whole directory
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, DirectoryError>;
}
