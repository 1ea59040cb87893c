//! External service configurations: contact directory and SMTP.

use domain::{EmailAddress, Mailbox};
use integration_carddav::DirectoryConfig;
use integration_smtp::SmtpConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Directory Configuration
// ==============================

/// vCard directory source
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectoryAppConfig {
    /// `http(s)://` URL, `file://` URL or plain path of the vCard export
    #[serde(default)]
    pub url: String,

    /// Basic auth username (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Basic auth password (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default)]
    pub password: Option<SecretString>,

    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certs: bool,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for DirectoryAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryAppConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("verify_certs", &self.verify_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for DirectoryAppConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            password: None,
            verify_certs: true,
            timeout_secs: default_timeout(),
        }
    }
}

impl DirectoryAppConfig {
    /// Convert to `integration_carddav`'s `DirectoryConfig`
    #[must_use]
    pub fn to_directory_config(&self) -> DirectoryConfig {
        DirectoryConfig {
            url: self.url.trim().to_string(),
            username: self.username.clone().filter(|u| !u.is_empty()),
            password: self
                .password
                .as_ref()
                .map(|p| p.expose_secret().to_string()),
            verify_certs: self.verify_certs,
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// SMTP Configuration
// ==============================

/// Outgoing mail server and addresses
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpAppConfig {
    #[serde(default)]
    pub host: String,

    /// 587 uses STARTTLS, any other port implicit TLS (default: 587)
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[serde(default)]
    pub username: String,

    /// Password (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default = "empty_secret")]
    pub password: SecretString,

    /// Address the notifications are sent from
    #[serde(default)]
    pub sender_email: String,

    /// Display name of the sender
    #[serde(default)]
    pub sender_name: String,

    /// Address that receives the notifications
    #[serde(default)]
    pub receiver_email: String,

    /// Whole-session timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certificates: bool,
}

impl std::fmt::Debug for SmtpAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpAppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("receiver_email", &self.receiver_email)
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_certificates", &self.verify_certificates)
            .finish()
    }
}

impl Default for SmtpAppConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_smtp_port(),
            username: String::new(),
            password: empty_secret(),
            sender_email: String::new(),
            sender_name: String::new(),
            receiver_email: String::new(),
            timeout_secs: default_timeout(),
            verify_certificates: true,
        }
    }
}

impl SmtpAppConfig {
    /// Convert to `integration_smtp`'s `SmtpConfig`
    #[must_use]
    pub fn to_smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.host.trim().to_string(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.expose_secret().to_string(),
            timeout_secs: self.timeout_secs,
            verify_certificates: self.verify_certificates,
        }
    }

    /// The `From` mailbox
    pub fn sender(&self) -> Result<Mailbox, domain::DomainError> {
        let address = EmailAddress::new(&self.sender_email)?;
        Ok(Mailbox::named(&self.sender_name, address))
    }

    /// The notification recipient
    pub fn receiver(&self) -> Result<EmailAddress, domain::DomainError> {
        EmailAddress::new(&self.receiver_email)
    }
}

const fn default_timeout() -> u64 {
    30
}

const fn default_smtp_port() -> u16 {
    587
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}
