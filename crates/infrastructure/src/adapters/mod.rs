//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod directory_adapter;
mod ics_export_adapter;
mod smtp_notification_adapter;
mod template_adapter;

pub use directory_adapter::VcfDirectoryAdapter;
pub use ics_export_adapter::IcsFileExportAdapter;
pub use smtp_notification_adapter::SmtpNotificationAdapter;
pub use template_adapter::TeraTemplateAdapter;
