//! Notification port for application layer
//!
//! Transport-only delivery of a rendered message. Implemented by the SMTP
//! adapter in the infrastructure layer.

use async_trait::async_trait;
use domain::EmailAddress;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Notification port errors
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Mail service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Recipient rejected: {0}")]
    RecipientRejected(String),

    #[error("Delivery timed out")]
    Timeout,

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Port for delivering one notification
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Send an HTML message to `recipient`
    async fn send(
        &self,
        subject: &str,
        body: &str,
        recipient: &EmailAddress,
    ) -> Result<(), NotificationError>;
}
