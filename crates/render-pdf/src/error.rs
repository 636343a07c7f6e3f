use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The page or its commands cannot be expressed as a valid document.
    #[error("Invalid document: {0}")]
    InvalidDocumentSpec(String),
    #[error("Internal PDF error: {0}")]
    InternalPdfError(String),
}

impl RenderError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RenderError::InvalidDocumentSpec(message.into())
    }
}
