use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was supplied for the provider.
    #[error("{0} API key is required")]
    MissingApiKey(&'static str),

    #[error("Unknown AI model: {0}")]
    UnknownModel(String),

    #[error("Unsupported image model: {0}. Only DALL-E is currently supported.")]
    UnsupportedImageModel(String),

    /// Connection failures and timeouts talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx answer from the provider.
    #[error("{provider} API returned {status}: {body}")]
    Api {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The provider answered 2xx but not in the documented shape.
    #[error("unexpected response from {provider}: missing {path}")]
    Response {
        provider: &'static str,
        path: &'static str,
    },

    /// The model's text was supposed to be JSON and was not.
    #[error("invalid JSON in model output: {0}")]
    Json(#[from] serde_json::Error),
}

impl AiError {
    /// Errors caused by the request itself rather than the upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey(_) | Self::UnknownModel(_) | Self::UnsupportedImageModel(_)
        )
    }
}
