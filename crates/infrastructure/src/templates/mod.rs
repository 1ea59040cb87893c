//! Template engine for the notification mail body
//!
//! Uses Tera over a closed set of placeholders: `lang`, `name`, `header`,
//! `body1`, `body2`, `footer`. Templates written as `{{name}}` are valid
//! Tera; any other variable is a render error, never silently left blank.
//!
//! # Template Locations
//!
//! The template is loaded from the configured file. When that file does not
//! exist, the embedded default is used unless the fallback is disabled.

use std::{
    error::Error as _,
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::Arc,
};

use application::BirthdayBindings;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Placeholders available to templates
pub const PLACEHOLDERS: [&str; 6] = ["lang", "name", "header", "body1", "body2", "footer"];

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file missing and fallback disabled, or unreadable
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(ref name) => Self::NotFound(name.clone()),
            _ => Self::Render(describe(&e)),
        }
    }
}

/// Tera's top-level message plus its causes, e.g. the missing variable
fn describe(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template file; `None` uses the embedded template
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Whether to use the embedded template when `path` does not exist
    #[serde(default = "default_true")]
    pub use_embedded_fallback: bool,

    /// Whether to auto-escape `.html`/`.htm` templates
    #[serde(default = "default_true")]
    pub auto_escape: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: None,
            use_embedded_fallback: true,
            auto_escape: true,
        }
    }
}

/// Where the active template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    File(PathBuf),
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const BIRTHDAY_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}">
<head>
    <meta charset="UTF-8">
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
        .card { max-width: 480px; margin: 24px auto; padding: 24px; border-radius: 8px; background: #fff8e7; }
        h1 { font-size: 22px; margin-top: 0; }
        .footer { color: #888; font-size: 12px; margin-top: 24px; }
    </style>
</head>
<body>
    <div class="card">
        <h1>🎂 {{header}}</h1>
        <p>{{body1}} <strong>{{name}}</strong>{{body2}}</p>
        <p class="footer">{{footer}}</p>
    </div>
</body>
</html>
"#;
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    name: String,
    source: TemplateSource,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Engine with the embedded template
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_config(&TemplateConfig::default())
    }

    /// Engine for the configured template file
    pub fn with_config(config: &TemplateConfig) -> Result<Self, TemplateError> {
        let (body, source) = match &config.path {
            Some(path) => Self::read_template(path, config.use_embedded_fallback)?,
            None => (embedded::BIRTHDAY_HTML.to_string(), TemplateSource::Embedded),
        };
        let name = match &source {
            TemplateSource::File(path) => format!(
                "birthday.{}",
                path.extension().and_then(OsStr::to_str).unwrap_or("html")
            ),
            TemplateSource::Embedded => "birthday.html".to_string(),
        };
        Self::from_raw(&name, &body, source, config.auto_escape)
    }

    fn from_raw(
        name: &str,
        body: &str,
        source: TemplateSource,
        auto_escape: bool,
    ) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(if auto_escape {
            vec![".html", ".htm"]
        } else {
            vec![]
        });
        tera.add_raw_template(name, body)
            .map_err(|e| TemplateError::Compile(describe(&e)))?;

        debug!(template = %name, ?source, "Template compiled");
        Ok(Self {
            tera: Arc::new(tera),
            name: name.to_string(),
            source,
        })
    }

    fn read_template(
        path: &Path,
        use_embedded_fallback: bool,
    ) -> Result<(String, TemplateSource), TemplateError> {
        match std::fs::read_to_string(path) {
            Ok(body) => {
                info!(path = %path.display(), "Loaded custom template");
                Ok((body, TemplateSource::File(path.to_path_buf())))
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && use_embedded_fallback => {
                warn!(path = %path.display(), "Template file not found, using embedded template");
                Ok((embedded::BIRTHDAY_HTML.to_string(), TemplateSource::Embedded))
            },
            Err(e) => Err(TemplateError::NotFound(format!("{}: {e}", path.display()))),
        }
    }

    pub const fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Render the notification body
    pub fn render_birthday(&self, bindings: &BirthdayBindings) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("lang", bindings.lang);
        ctx.insert("name", &bindings.name);
        ctx.insert("header", bindings.header);
        ctx.insert("body1", bindings.body1);
        ctx.insert("body2", bindings.body2);
        ctx.insert("footer", bindings.footer);

        self.tera
            .render(&self.name, &ctx)
            .map_err(TemplateError::from)
    }
}
