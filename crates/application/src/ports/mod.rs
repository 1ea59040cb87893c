//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod calendar_export_port;
mod directory_port;
mod notification_port;
mod template_port;

#[cfg(test)]
pub use calendar_export_port::MockCalendarExportPort;
pub use calendar_export_port::{CalendarExportPort, ExportError, ExportReceipt};
#[cfg(test)]
pub use directory_port::MockDirectoryPort;
pub use directory_port::{DirectoryError, DirectoryPort};
#[cfg(test)]
pub use notification_port::MockNotificationPort;
pub use notification_port::{NotificationError, NotificationPort};
#[cfg(test)]
pub use template_port::MockTemplatePort;
pub use template_port::{BirthdayBindings, RenderError, TemplatePort};
