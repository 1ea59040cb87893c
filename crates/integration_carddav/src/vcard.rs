//! vCard directory parser
//!
//! Reads a whole vCard export (2.1, 3.0 or 4.0) and yields one
//! [`ContactRecord`] per entry with a formatted name. Only `FN` and `BDAY`
//! are interpreted; every other property is ignored.

use domain::ContactRecord;
use tracing::{debug, warn};

const BOM: char = '\u{feff}';

/// Parse a raw directory export into contact records
///
/// Invalid UTF-8 is replaced, a leading BOM is stripped and folded lines
/// are joined. Entries without `FN` are skipped; a trailing entry without
/// `END:VCARD` is dropped.
pub fn parse_directory(raw: &[u8]) -> Vec<ContactRecord> {
    let text = String::from_utf8_lossy(raw);
    let text = text.strip_prefix(BOM).unwrap_or(&text);

    let mut records = Vec::new();
    let mut entry: Option<Entry> = None;
    let mut entries = 0usize;

    for line in unfold_vcard_lines(text) {
        let Some(property) = Property::parse(&line) else {
            continue;
        };

        match property.name.as_str() {
            "BEGIN" if property.value.trim().eq_ignore_ascii_case("VCARD") => {
                if entry.replace(Entry::default()).is_some() {
                    warn!("vCard entry without END:VCARD dropped");
                }
            },
            "END" if property.value.trim().eq_ignore_ascii_case("VCARD") => {
                if let Some(finished) = entry.take() {
                    entries += 1;
                    records.extend(finished.into_record());
                }
            },
            "FN" => {
                if let Some(current) = entry.as_mut() {
                    current
                        .display_name
                        .get_or_insert_with(|| property.decoded_value());
                }
            },
            "BDAY" => {
                if let Some(current) = entry.as_mut() {
                    current
                        .birthdate
                        .get_or_insert_with(|| property.decoded_value());
                }
            },
            _ => {},
        }
    }

    if entry.is_some() {
        warn!("Trailing vCard entry without END:VCARD dropped");
    }

    debug!(entries, contacts = records.len(), "Parsed vCard directory");
    records
}

/// Fields collected for the entry currently being parsed
#[derive(Debug, Default)]
struct Entry {
    display_name: Option<String>,
    birthdate: Option<String>,
}

impl Entry {
    fn into_record(self) -> Option<ContactRecord> {
        let name = self.display_name.unwrap_or_default();
        match ContactRecord::new(name, self.birthdate) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "Skipping vCard entry without formatted name");
                None
            },
        }
    }
}

/// One content line split into name, parameters and value
#[derive(Debug)]
struct Property<'a> {
    /// Uppercased name with any group prefix removed
    name: String,
    params: Vec<&'a str>,
    value: &'a str,
}

impl<'a> Property<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let colon = value_separator(line)?;
        let (head, value) = (&line[..colon], &line[colon + 1..]);

        let mut parts = head.split(';');
        let qualified = parts.next()?.trim();
        if qualified.is_empty() {
            return None;
        }
        // item1.FN -> FN
        let name = qualified
            .rsplit_once('.')
            .map_or(qualified, |(_, name)| name)
            .to_ascii_uppercase();

        Some(Self {
            name,
            params: parts.collect(),
            value,
        })
    }

    fn is_quoted_printable(&self) -> bool {
        self.params.iter().any(|param| {
            let param = param.trim();
            param.eq_ignore_ascii_case("ENCODING=QUOTED-PRINTABLE")
                || param.eq_ignore_ascii_case("QUOTED-PRINTABLE")
        })
    }

    fn decoded_value(&self) -> String {
        if self.is_quoted_printable() {
            decode_quoted_printable(self.value)
        } else {
            unescape_value(self.value)
        }
    }
}

/// Position of the first `:` outside double-quoted parameter values
fn value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {},
        }
    }
    None
}

/// Unfold vCard continuation lines (RFC 6350 §3.2)
///
/// Also joins vCard 2.1 quoted-printable soft line breaks (a trailing `=`).
fn unfold_vcard_lines(data: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for line in data.lines() {
        if current.ends_with('=') && is_quoted_printable_line(&current) {
            current.pop();
            current.push_str(line);
        } else if !current.is_empty() && (line.starts_with(' ') || line.starts_with('\t')) {
            // Continuation line: drop the single folding whitespace
            current.push_str(&line[1..]);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = line.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn is_quoted_printable_line(line: &str) -> bool {
    value_separator(line).is_some_and(|colon| {
        line[..colon]
            .to_ascii_uppercase()
            .contains("QUOTED-PRINTABLE")
    })
}

/// Resolve `\,` `\;` `\\` and `\n` escapes in a text value
fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }
    out
}

/// Decode a quoted-printable value as UTF-8
fn decode_quoted_printable(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'=' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok());
            if let Some(byte) = hex {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}
