//! SMTP notification adapter - Implements `NotificationPort` using `integration_smtp`

use application::ports::{NotificationError, NotificationPort};
use async_trait::async_trait;
use domain::{EmailAddress, Mailbox};
use integration_smtp::{HtmlMessage, SmtpClient, SmtpConfig, SmtpError};
use tracing::instrument;

/// Sends notifications as HTML mails from a fixed sender
#[derive(Debug, Clone)]
pub struct SmtpNotificationAdapter {
    client: SmtpClient,
    sender: Mailbox,
}

impl SmtpNotificationAdapter {
    pub const fn new(config: SmtpConfig, sender: Mailbox) -> Self {
        Self {
            client: SmtpClient::new(config),
            sender,
        }
    }

    pub const fn sender(&self) -> &Mailbox {
        &self.sender
    }

    /// Map [`SmtpError`] to [`NotificationError`]
    fn map_error(error: SmtpError) -> NotificationError {
        match error {
            SmtpError::ConnectionFailed(msg) | SmtpError::Tls(msg) => {
                NotificationError::ServiceUnavailable(msg)
            },
            SmtpError::AuthenticationFailed(msg) => NotificationError::AuthenticationFailed(msg),
            SmtpError::RecipientRejected(msg) => NotificationError::RecipientRejected(msg),
            SmtpError::Timeout(_) => NotificationError::Timeout,
            SmtpError::Protocol(msg) => NotificationError::DeliveryFailed(msg),
        }
    }
}

#[async_trait]
impl NotificationPort for SmtpNotificationAdapter {
    #[instrument(skip(self, body), fields(recipient = %recipient))]
    async fn send(
        &self,
        subject: &str,
        body: &str,
        recipient: &EmailAddress,
    ) -> Result<(), NotificationError> {
        let message = HtmlMessage::new(self.sender.clone(), recipient.clone(), subject, body);
        self.client.send(&message).await.map_err(Self::map_error)
    }
}
