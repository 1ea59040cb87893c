//! RFC 5322 assembly of HTML notification mails

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use domain::{EmailAddress, Mailbox};

/// Maximum raw bytes per RFC 2047 encoded word (encodes to 60 base64 chars)
const ENCODED_WORD_BYTES: usize = 45;
/// Base64 body line length
const BODY_LINE_LEN: usize = 76;

/// A single-part HTML mail
#[derive(Debug, Clone)]
pub struct HtmlMessage {
    pub from: Mailbox,
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub date: DateTime<Utc>,
    pub message_id: String,
}

impl HtmlMessage {
    /// Creates a message dated now with a fresh Message-ID
    pub fn new(
        from: Mailbox,
        to: EmailAddress,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        let date = Utc::now();
        let message_id = format!(
            "<{}.{}@{}>",
            date.timestamp_millis(),
            uuid::Uuid::new_v4(),
            from.address().domain()
        );
        Self {
            from,
            to,
            subject: subject.into(),
            html_body: html_body.into(),
            date,
            message_id,
        }
    }

    /// Renders headers and base64 body, CRLF line endings
    pub fn to_rfc5322(&self) -> String {
        let mut out = format!(
            "From: {}\r\n\
             To: {}\r\n\
             Subject: {}\r\n\
             Date: {}\r\n\
             Message-ID: {}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             Content-Transfer-Encoding: base64\r\n\
             \r\n",
            format_mailbox(&self.from),
            self.to,
            encode_header(&self.subject),
            self.date.format("%a, %d %b %Y %H:%M:%S +0000"),
            self.message_id,
        );

        let encoded = STANDARD.encode(self.html_body.as_bytes());
        for line in encoded.as_bytes().chunks(BODY_LINE_LEN) {
            // base64 output is ASCII
            out.push_str(&String::from_utf8_lossy(line));
            out.push_str("\r\n");
        }
        out
    }
}

fn format_mailbox(mailbox: &Mailbox) -> String {
    match mailbox.name() {
        Some(name) if needs_encoding(name) => {
            format!("{} <{}>", encode_header(name), mailbox.address())
        },
        _ => mailbox.to_string(),
    }
}

fn needs_encoding(value: &str) -> bool {
    !value.is_ascii() || value.chars().any(char::is_control)
}

/// RFC 2047 B-encoding for header values that are not plain ASCII
///
/// Words never split a UTF-8 sequence and are joined by folding whitespace.
pub fn encode_header(value: &str) -> String {
    if !needs_encoding(value) {
        return value.to_string();
    }

    let mut words = Vec::new();
    let mut start = 0;
    let mut end = 0;
    for (idx, c) in value.char_indices() {
        let next = idx + c.len_utf8();
        if next - start > ENCODED_WORD_BYTES && end > start {
            words.push(&value[start..end]);
            start = end;
        }
        end = next;
    }
    if end > start {
        words.push(&value[start..end]);
    }

    words
        .iter()
        .map(|word| format!("=?UTF-8?B?{}?=", STANDARD.encode(word.as_bytes())))
        .collect::<Vec<_>>()
        .join("\r\n ")
}
