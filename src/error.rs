// src/error.rs
use folio_render_pdf::RenderError;
use folio_template::TemplateError;
use thiserror::Error;

/// Errors surfaced by the render pipeline.
///
/// Element-level problems (missing assets, unresolved fields, empty frames)
/// are not errors: they come back as skip reports on a successful render.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Template(TemplateError::Parse(e))
    }
}
