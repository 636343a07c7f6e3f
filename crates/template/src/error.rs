use thiserror::Error;

/// Errors raised while loading templates or data records.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid data record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
