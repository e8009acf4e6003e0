use thiserror::Error;

/// Terminal failure of one extraction call (article or feed).
///
/// Carries the URL the caller asked for, so the HTTP layer can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExtractionError {
    pub url: String,
    pub message: String,
}

impl ExtractionError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}
