#![forbid(unsafe_code)]
//! SMTP delivery of birthday notifications
//!
//! A small async SMTP client (STARTTLS or implicit TLS, AUTH PLAIN) and the
//! MIME assembly for single-part HTML mails.

pub mod client;
pub mod message;

pub use client::{STARTTLS_PORT, SmtpClient, SmtpConfig, SmtpError};
pub use message::{HtmlMessage, encode_header};
