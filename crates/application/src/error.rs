//! Application-level errors

use thiserror::Error;

use crate::ports::DirectoryError;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The contact directory could not be loaded; fatal for the run
    #[error("Directory unavailable: {0}")]
    Directory(#[from] DirectoryError),
}
