//! Directory adapter - Implements `DirectoryPort` using `integration_carddav`

use application::ports::{DirectoryError, DirectoryPort};
use async_trait::async_trait;
use domain::ContactRecord;
use integration_carddav::{CardDavError, DirectoryClient, DirectoryConfig, VcfDirectoryClient};
use tracing::{debug, instrument};

/// Adapter for vCard directory exports (HTTP(S) or local file)
#[derive(Debug)]
pub struct VcfDirectoryAdapter {
    client: VcfDirectoryClient,
}

impl VcfDirectoryAdapter {
    /// Create a new adapter from the given configuration
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = VcfDirectoryClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map [`CardDavError`] to [`DirectoryError`]
    fn map_error(error: CardDavError) -> DirectoryError {
        match error {
            CardDavError::AuthenticationFailed => DirectoryError::AuthenticationFailed,
            CardDavError::Timeout => DirectoryError::Timeout,
            CardDavError::HttpStatus(status) => DirectoryError::HttpStatus(status),
            CardDavError::NotFound(_) => DirectoryError::HttpStatus(404),
            CardDavError::Io { path, reason } => DirectoryError::Io(format!("{path}: {reason}")),
            CardDavError::ConnectionFailed(msg) | CardDavError::RequestFailed(msg) => {
                DirectoryError::Unavailable(msg)
            },
        }
    }
}

#[async_trait]
impl DirectoryPort for VcfDirectoryAdapter {
    #[instrument(skip(self), fields(url = %self.client.config().url))]
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, DirectoryError> {
        let contacts = self
            .client
            .fetch_contacts()
            .await
            .map_err(Self::map_error)?;
        debug!(count = contacts.len(), "Fetched contacts");
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_mapping() {
        assert!(matches!(
            VcfDirectoryAdapter::map_error(CardDavError::AuthenticationFailed),
            DirectoryError::AuthenticationFailed
        ));
        assert!(matches!(
            VcfDirectoryAdapter::map_error(CardDavError::NotFound("x".to_string())),
            DirectoryError::HttpStatus(404)
        ));
        assert!(matches!(
            VcfDirectoryAdapter::map_error(CardDavError::HttpStatus(503)),
            DirectoryError::HttpStatus(503)
        ));
        assert!(matches!(
            VcfDirectoryAdapter::map_error(CardDavError::Timeout),
            DirectoryError::Timeout
        ));
        assert!(matches!(
            VcfDirectoryAdapter::map_error(CardDavError::ConnectionFailed("refused".to_string())),
            DirectoryError::Unavailable(ref m) if m == "refused"
        ));
        assert!(matches!(
            VcfDirectoryAdapter::map_error(CardDavError::Io {
                path: "/x.vcf".to_string(),
                reason: "gone".to_string()
            }),
            DirectoryError::Io(ref m) if m == "/x.vcf: gone"
        ));
    }

    #[tokio::test]
    async fn reads_local_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.vcf");
        std::fs::write(
            &path,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Anna Schmidt\r\nBDAY:1990-03-15\r\nEND:VCARD\r\n\
             BEGIN:VCARD\r\nVERSION:3.0\r\nFN:No Birthday\r\nEND:VCARD\r\n",
        )
        .unwrap();

        let adapter =
            VcfDirectoryAdapter::new(DirectoryConfig::new(path.display().to_string())).unwrap();
        let contacts = adapter.fetch_contacts().await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].raw_birthdate(), Some("1990-03-15"));
    }

    #[tokio::test]
    async fn missing_local_export_is_io_error() {
        let adapter =
            VcfDirectoryAdapter::new(DirectoryConfig::new("/nonexistent/contacts.vcf")).unwrap();
        assert!(matches!(
            adapter.fetch_contacts().await,
            Err(DirectoryError::Io(_))
        ));
    }
}
