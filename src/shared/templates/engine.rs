//! HTML page templates using Jinja2 syntax.
//!
//! Templates are parsed once at startup and shared read-only across requests.
//! Files ending in `.html` are auto-escaped; trusted fragments must be marked
//! with the `safe` filter inside the template.

use minijinja::Environment;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::shared::constants::{LOST_TEMPLATE, PAGE_TEMPLATE};

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template '{name}': {source}")]
    Syntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Immutable set of parsed templates
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Load every `.html` template under `dir` and make sure the page and
    /// lost templates are among them.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        load_templates_recursive(&mut env, dir, dir)?;

        let engine = Self { env };
        for required in [PAGE_TEMPLATE, LOST_TEMPLATE] {
            if !engine.template_exists(required) {
                return Err(TemplateError::NotFound(required.to_string()));
            }
        }

        tracing::info!(
            "Loaded {} template(s) from {}",
            engine.env.templates().count(),
            dir.display()
        );

        Ok(engine)
    }

    /// Render a template with the given context.
    pub fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}

/// Recursively load all .html templates from a directory
fn load_templates_recursive(
    env: &mut Environment<'static>,
    base_path: &Path,
    current_path: &Path,
) -> Result<(), TemplateError> {
    let io_err = |path: &Path, source: std::io::Error| TemplateError::Io {
        path: path.display().to_string(),
        source,
    };

    let entries = std::fs::read_dir(current_path).map_err(|e| io_err(current_path, e))?;
    for entry in entries {
        let path = entry.map_err(|e| io_err(current_path, e))?.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            let Ok(relative) = path.strip_prefix(base_path) else {
                continue;
            };
            // Template names always use forward slashes
            let template_name = relative.to_string_lossy().replace('\\', "/");
            let content = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;

            env.add_template_owned(template_name.clone(), content)
                .map_err(|source| TemplateError::Syntax {
                    name: template_name.clone(),
                    source,
                })?;
            tracing::debug!("Loaded template: {}", template_name);
        }
    }

    Ok(())
}
