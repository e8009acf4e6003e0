use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timed out")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("{status} response from server")]
    Http {
        status: reqwest::StatusCode,
        retriable: bool,
    },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether a caller could reasonably try again later.
    ///
    /// Nothing in this crate retries; the flag is surfaced in logs so
    /// operators can tell flaky upstreams from broken URLs.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::InvalidUrl(_) | Self::BodyTooLarge(_) => false,
            Self::Http { retriable, .. } => *retriable,
            Self::Connect(_)
            | Self::ConnectTimeout
            | Self::RequestTimeout
            | Self::RedirectLoop
            | Self::Body(_)
            | Self::Unknown(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http {
                status,
                retriable: status.is_server_error(),
            }
        } else if err.is_connect() || err.is_request() {
            // DNS, refused connections, TLS handshakes
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
