//! Directory client
//!
//! Downloads a vCard export over HTTP(S), optionally with basic auth, or
//! reads it from disk for `file://` URLs and plain paths.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use domain::ContactRecord;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::vcard::parse_directory;

/// Directory client errors
#[derive(Debug, Error)]
pub enum CardDavError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Directory export not found: {0}")]
    NotFound(String),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Request timed out")]
    Timeout,
}

/// Directory source configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// `http(s)://` URL, `file://` URL or plain path of the vCard export
    pub url: String,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password (excluded from serialization to prevent leaks)
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certs: bool,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("verify_certs", &self.verify_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DirectoryConfig {
    /// Config for an unauthenticated source with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            verify_certs: default_true(),
            timeout_secs: default_timeout(),
        }
    }

    /// Local file location, if the source is not an HTTP URL
    fn local_path(&self) -> Option<PathBuf> {
        let url = self.url.trim();
        if let Some(path) = url.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        (!url.contains("://")).then(|| PathBuf::from(url))
    }
}

const fn default_true() -> bool {
    true
}

const fn default_timeout() -> u64 {
    30
}

/// Source of a vCard directory export
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch the raw export bytes
    async fn fetch_export(&self) -> Result<Vec<u8>, CardDavError>;

    /// Fetch and parse the export
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, CardDavError> {
        let raw = self.fetch_export().await?;
        Ok(parse_directory(&raw))
    }
}

/// Directory client for HTTP(S) and local vCard exports
#[derive(Debug)]
pub struct VcfDirectoryClient {
    client: Client,
    config: DirectoryConfig,
}

impl VcfDirectoryClient {
    /// Create a new directory client
    pub fn new(config: DirectoryConfig) -> Result<Self, CardDavError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()
            .map_err(|e| CardDavError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    async fn read_file(path: PathBuf) -> Result<Vec<u8>, CardDavError> {
        tokio::fs::read(&path).await.map_err(|e| CardDavError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn download(&self) -> Result<Vec<u8>, CardDavError> {
        let mut request = self
            .client
            .get(&self.config.url)
            .header("Accept", "text/vcard, text/x-vcard, */*");
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                return CardDavError::Timeout;
            }
            CardDavError::ConnectionFailed(e.to_string())
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(CardDavError::AuthenticationFailed);
            },
            StatusCode::NOT_FOUND => {
                return Err(CardDavError::NotFound(self.config.url.clone()));
            },
            status if !status.is_success() => {
                return Err(CardDavError::HttpStatus(status.as_u16()));
            },
            _ => {},
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                return CardDavError::Timeout;
            }
            CardDavError::RequestFailed(e.to_string())
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl DirectoryClient for VcfDirectoryClient {
    #[instrument(skip(self), fields(url = %self.config.url))]
    async fn fetch_export(&self) -> Result<Vec<u8>, CardDavError> {
        let raw = match self.config.local_path() {
            Some(path) => Self::read_file(path).await?,
            None => self.download().await?,
        };
        debug!(bytes = raw.len(), "Fetched directory export");
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_redacts_password() {
        let config = DirectoryConfig {
            username: Some("user".to_string()),
            password: Some("secret123".to_string()),
            ..DirectoryConfig::new("https://dav.example.com/contacts.vcf")
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret123"));
    }

    #[test]
    fn config_serialization_excludes_password() {
        let config = DirectoryConfig {
            password: Some("secret".to_string()),
            ..DirectoryConfig::new("https://dav.example.com/contacts.vcf")
        };
        let json = serde_json::to_string(&config).expect("serialize");
        assert!(!json.contains("secret"));
    }

    #[test]
    fn local_paths_are_detected() {
        assert_eq!(
            DirectoryConfig::new("file:///tmp/contacts.vcf").local_path(),
            Some(PathBuf::from("/tmp/contacts.vcf"))
        );
        assert_eq!(
            DirectoryConfig::new("contacts.vcf").local_path(),
            Some(PathBuf::from("contacts.vcf"))
        );
        assert_eq!(
            DirectoryConfig::new("https://example.com/c.vcf").local_path(),
            None
        );
    }

    #[test]
    fn client_construction() {
        let client = VcfDirectoryClient::new(DirectoryConfig::new("https://example.com/c.vcf"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn reads_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.vcf");
        std::fs::write(
            &path,
            "BEGIN:VCARD\nFN:Anna Schmidt\nBDAY:1990-03-15\nEND:VCARD\n",
        )
        .unwrap();

        let url = format!("file://{}", path.display());
        let client = VcfDirectoryClient::new(DirectoryConfig::new(url)).unwrap();
        let contacts = client.fetch_contacts().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].display_name(), "Anna Schmidt");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let client =
            VcfDirectoryClient::new(DirectoryConfig::new("/nonexistent/dir/contacts.vcf")).unwrap();
        let err = client.fetch_export().await.unwrap_err();
        assert!(matches!(err, CardDavError::Io { .. }));
    }
}
