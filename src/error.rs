use thiserror::Error;

/// Main error type for the paper match engine
#[derive(Error, Debug)]
pub enum PaperMatchError {
    /// Filesystem errors (corpus loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Paper source errors
    #[error("Source '{source_name}' error: {message}")]
    Source { source_name: String, message: String },

    /// Translator errors
    #[error("Translation error: {0}")]
    Translation(String),

    /// Malformed query parameters (dates, empty text at the API edge)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for PaperMatchError {
    fn from(s: String) -> Self {
        PaperMatchError::Other(s)
    }
}

impl From<&str> for PaperMatchError {
    fn from(s: &str) -> Self {
        PaperMatchError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PaperMatchError>;
