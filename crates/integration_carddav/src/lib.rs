#![forbid(unsafe_code)]
//! vCard directory integration
//!
//! Fetches a contact directory export (HTTP(S) or local file) and parses
//! it into contact records.

pub mod client;
pub mod vcard;

pub use client::{CardDavError, DirectoryClient, DirectoryConfig, VcfDirectoryClient};
pub use vcard::parse_directory;
