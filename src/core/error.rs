use thiserror::Error;

/// Errors that can occur while generating or processing a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FatturaError {
    /// Generator pre-flight checks failed — the document was not serialized.
    /// Carries every violated business rule, not just the first.
    #[error("pre-flight checks failed: {}", .0.join("; "))]
    Preflight(Vec<String>),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// A single validation error with the offending element path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Slash-separated path to the offending element
    /// (e.g. "FatturaElettronicaHeader/DatiTrasmissione/CodiceDestinatario").
    pub path: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
