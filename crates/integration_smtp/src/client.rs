//! SMTP client for notification delivery
//!
//! Port 587 uses STARTTLS, every other port uses implicit TLS. The whole
//! session runs under a single `tokio::time::timeout`.

use std::time::Duration;

use base64::Engine;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpStream,
};
use tokio_native_tls::TlsConnector;
use tracing::{debug, instrument, trace, warn};

use crate::message::HtmlMessage;

/// Submission port; everything else is treated as implicit TLS
pub const STARTTLS_PORT: u16 = 587;

/// SMTP client errors
#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Recipient rejected: {0}")]
    RecipientRejected(String),

    #[error("SMTP protocol error: {0}")]
    Protocol(String),

    #[error("SMTP session timed out after {0}s")]
    Timeout(u64),
}

/// SMTP server settings
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Login name; an empty name skips AUTH
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
    pub verify_certificates: bool,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_certificates", &self.verify_certificates)
            .finish()
    }
}

/// Sends HTML mails over an authenticated TLS session
#[derive(Debug, Clone)]
pub struct SmtpClient {
    config: SmtpConfig,
}

impl SmtpClient {
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &SmtpConfig {
        &self.config
    }

    /// Deliver one message
    #[instrument(skip(self, message), fields(host = %self.config.host, port = self.config.port, to = %message.to))]
    pub async fn send(&self, message: &HtmlMessage) -> Result<(), SmtpError> {
        let limit = Duration::from_secs(self.config.timeout_secs);
        tokio::time::timeout(limit, self.deliver(message))
            .await
            .map_err(|_| SmtpError::Timeout(self.config.timeout_secs))??;

        debug!(message_id = %message.message_id, "Mail delivered");
        Ok(())
    }

    fn tls_connector(&self) -> Result<TlsConnector, SmtpError> {
        let mut builder = native_tls::TlsConnector::builder();
        if !self.config.verify_certificates {
            warn!("TLS certificate verification disabled for SMTP");
            builder.danger_accept_invalid_certs(true);
        }
        builder.min_protocol_version(Some(native_tls::Protocol::Tlsv12));

        let connector = builder
            .build()
            .map_err(|e| SmtpError::Tls(format!("TLS builder failed: {e}")))?;
        Ok(TlsConnector::from(connector))
    }

    async fn deliver(&self, message: &HtmlMessage) -> Result<(), SmtpError> {
        let stream = TcpStream::connect((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| SmtpError::ConnectionFailed(e.to_string()))?;
        let tls = self.tls_connector()?;

        if self.config.port == STARTTLS_PORT {
            let stream = starttls_prelude(stream).await?;
            let stream = tls
                .connect(&self.config.host, stream)
                .await
                .map_err(|e| SmtpError::Tls(format!("STARTTLS upgrade failed: {e}")))?;
            let mut session = Session::new(stream);
            session.ehlo().await?;
            self.transaction(&mut session, message).await
        } else {
            let stream = tls
                .connect(&self.config.host, stream)
                .await
                .map_err(|e| SmtpError::Tls(format!("TLS handshake failed: {e}")))?;
            self.session(stream, message).await
        }
    }

    /// Full session on an already secured stream, starting at the greeting
    async fn session<S>(&self, stream: S, message: &HtmlMessage) -> Result<(), SmtpError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut session = Session::new(stream);
        session.expect_greeting().await?;
        session.ehlo().await?;
        self.transaction(&mut session, message).await
    }

    async fn transaction<S>(
        &self,
        session: &mut Session<S>,
        message: &HtmlMessage,
    ) -> Result<(), SmtpError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        if !self.config.username.is_empty() {
            let credentials = format!("\0{}\0{}", self.config.username, self.config.password);
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            let reply = session.send_line(&format!("AUTH PLAIN {encoded}")).await?;
            if reply.code != 235 {
                return Err(SmtpError::AuthenticationFailed(reply.to_string()));
            }
        }

        session
            .command(&format!("MAIL FROM:<{}>", message.from.address()), &[250])
            .await?;

        let reply = session
            .send_line(&format!("RCPT TO:<{}>", message.to))
            .await?;
        if !matches!(reply.code, 250 | 251) {
            return Err(SmtpError::RecipientRejected(reply.to_string()));
        }

        session.command("DATA", &[354]).await?;
        session.write_data(&message.to_rfc5322()).await?;
        session.expect(&[250]).await?;

        // the server may close the connection before answering
        session.quit().await;
        Ok(())
    }
}

/// One SMTP reply, possibly multi-line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reply {
    code: u16,
    text: String,
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

/// Plaintext part of a STARTTLS session: greeting, `EHLO`, `STARTTLS`
///
/// Returns the raw stream, ready for the TLS handshake.
async fn starttls_prelude<S>(stream: S) -> Result<S, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = Session::new(stream);
    session.expect_greeting().await?;
    session.ehlo().await?;
    session.command("STARTTLS", &[220]).await?;
    Ok(session.into_inner())
}

struct Session<S> {
    stream: BufReader<S>,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    fn into_inner(self) -> S {
        self.stream.into_inner()
    }

    async fn expect_greeting(&mut self) -> Result<(), SmtpError> {
        self.expect(&[220]).await.map(|_| ())
    }

    async fn ehlo(&mut self) -> Result<(), SmtpError> {
        let hostname = hostname::get().map_or_else(
            |_| "localhost".to_string(),
            |h| h.to_string_lossy().to_string(),
        );
        self.command(&format!("EHLO {hostname}"), &[250]).await.map(|_| ())
    }

    async fn quit(&mut self) {
        if let Err(e) = self.write_line("QUIT").await {
            trace!(error = %e, "QUIT not delivered");
        }
    }

    async fn command(&mut self, command: &str, expected: &[u16]) -> Result<Reply, SmtpError> {
        self.write_line(command).await?;
        self.expect(expected).await
    }

    async fn send_line(&mut self, command: &str) -> Result<Reply, SmtpError> {
        self.write_line(command).await?;
        self.read_reply().await
    }

    async fn expect(&mut self, expected: &[u16]) -> Result<Reply, SmtpError> {
        let reply = self.read_reply().await?;
        if expected.contains(&reply.code) {
            Ok(reply)
        } else {
            Err(SmtpError::Protocol(format!(
                "expected {expected:?}, got: {reply}"
            )))
        }
    }

    async fn write_line(&mut self, command: &str) -> Result<(), SmtpError> {
        trace!(command = %command.split(' ').next().unwrap_or(command), "Sending SMTP command");
        self.write_raw(format!("{command}\r\n").as_bytes()).await
    }

    /// Dot-stuffed message body terminated by `<CRLF>.<CRLF>`
    async fn write_data(&mut self, content: &str) -> Result<(), SmtpError> {
        let mut data = content.replace("\r\n.", "\r\n..");
        if data.starts_with('.') {
            data.insert(0, '.');
        }
        if !data.ends_with("\r\n") {
            data.push_str("\r\n");
        }
        data.push_str(".\r\n");
        self.write_raw(data.as_bytes()).await
    }

    async fn write_raw(&mut self, bytes: &[u8]) -> Result<(), SmtpError> {
        let stream = self.stream.get_mut();
        stream
            .write_all(bytes)
            .await
            .map_err(|e| SmtpError::ConnectionFailed(format!("write failed: {e}")))?;
        stream
            .flush()
            .await
            .map_err(|e| SmtpError::ConnectionFailed(format!("flush failed: {e}")))
    }

    async fn read_reply(&mut self) -> Result<Reply, SmtpError> {
        let mut text = Vec::new();
        loop {
            let mut line = String::new();
            let read = self
                .stream
                .read_line(&mut line)
                .await
                .map_err(|e| SmtpError::ConnectionFailed(format!("read failed: {e}")))?;
            if read == 0 {
                return Err(SmtpError::Protocol("connection closed by server".to_string()));
            }

            let line = line.trim_end();
            trace!(line = %line, "SMTP response");
            let code = line
                .get(..3)
                .and_then(|c| c.parse::<u16>().ok())
                .ok_or_else(|| SmtpError::Protocol(format!("malformed reply: {line}")))?;
            text.push(line.get(4..).unwrap_or_default().to_string());

            if line.as_bytes().get(3) != Some(&b'-') {
                return Ok(Reply {
                    code,
                    text: text.join(" "),
                });
            }
        }
    }
}
