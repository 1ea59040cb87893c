//! Template port for application layer
//!
//! Renders the notification body from a closed set of placeholders.

use domain::{Language, TextBundle};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Template rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template could not be loaded
    #[error("Template unavailable: {0}")]
    Unavailable(String),

    /// Rendering failed, e.g. because of an unknown placeholder
    #[error("Template rendering failed: {0}")]
    Render(String),
}

/// Values bound to the birthday template placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayBindings {
    /// `lang`: `de` or `en`
    pub lang: &'static str,
    pub name: String,
    pub header: &'static str,
    pub body1: &'static str,
    pub body2: &'static str,
    pub footer: &'static str,
}

impl BirthdayBindings {
    /// Bindings for `name` in the given language
    #[must_use]
    pub fn new(language: Language, name: impl Into<String>) -> Self {
        let TextBundle {
            header,
            body1,
            body2,
            footer,
            ..
        } = *language.texts();
        Self {
            lang: language.code(),
            name: name.into(),
            header,
            body1,
            body2,
            footer,
        }
    }
}

/// Port for rendering the notification body
#[cfg_attr(test, automock)]
pub trait TemplatePort: Send + Sync {
    fn render_birthday(&self, bindings: &BirthdayBindings) -> Result<String, RenderError>;
}
