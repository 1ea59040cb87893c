//! Template adapter - Implements `TemplatePort` using the Tera engine

use application::ports::{BirthdayBindings, RenderError, TemplatePort};

use crate::templates::{TemplateEngine, TemplateError};

/// Renders notification bodies with a [`TemplateEngine`]
#[derive(Debug, Clone)]
pub struct TeraTemplateAdapter {
    engine: TemplateEngine,
}

impl TeraTemplateAdapter {
    pub const fn new(engine: TemplateEngine) -> Self {
        Self { engine }
    }
}

impl TemplatePort for TeraTemplateAdapter {
    fn render_birthday(&self, bindings: &BirthdayBindings) -> Result<String, RenderError> {
        self.engine.render_birthday(bindings).map_err(|e| match e {
            TemplateError::Render(msg) => RenderError::Render(msg),
            other => RenderError::Unavailable(other.to_string()),
        })
    }
}
