//! Configuration handling for the service.
//!
//! Everything is read from environment variables with development defaults,
//! so the binary starts without any setup. `Config::from_env` validates the
//! values it can (log format, upstream base URLs) and reports the first bad
//! one as a `ConfigError`.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use url::Url;

/// Environment variable names. Public so tests and tooling can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_OPENAI_API_BASE: &str = "OPENAI_API_BASE";
pub const ENV_GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_CLAUDE_API_BASE: &str = "CLAUDE_API_BASE";
pub const ENV_DEEPSEEK_API_BASE: &str = "DEEPSEEK_API_BASE";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_CLAUDE_API_BASE: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";

/// How log lines are rendered by the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                field: ENV_LOG_FORMAT,
                reason: format!("expected 'pretty' or 'json', got '{}'", other),
            }),
        }
    }
}

/// Base URLs of the upstream AI providers.
///
/// Overridable so requests can go through a proxy, or at a mock server in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub openai: String,
    pub gemini: String,
    pub claude: String,
    pub deepseek: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: DEFAULT_OPENAI_API_BASE.to_string(),
            gemini: DEFAULT_GEMINI_API_BASE.to_string(),
            claude: DEFAULT_CLAUDE_API_BASE.to_string(),
            deepseek: DEFAULT_DEEPSEEK_API_BASE.to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Point every provider at the same base URL.
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            openai: base.clone(),
            gemini: base.clone(),
            claude: base.clone(),
            deepseek: base,
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    log_format: LogFormat,
    endpoints: ProviderEndpoints,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        log_format: LogFormat,
        endpoints: ProviderEndpoints,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            log_format,
            endpoints,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let log_format = LogFormat::parse(&env::var(ENV_LOG_FORMAT).unwrap_or_default())?;

        let endpoints = ProviderEndpoints {
            openai: endpoint_from_env(ENV_OPENAI_API_BASE, DEFAULT_OPENAI_API_BASE)?,
            gemini: endpoint_from_env(ENV_GEMINI_API_BASE, DEFAULT_GEMINI_API_BASE)?,
            claude: endpoint_from_env(ENV_CLAUDE_API_BASE, DEFAULT_CLAUDE_API_BASE)?,
            deepseek: endpoint_from_env(ENV_DEEPSEEK_API_BASE, DEFAULT_DEEPSEEK_API_BASE)?,
        };

        Ok(Self {
            bind_addr,
            log_format,
            endpoints,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
    /// Upstream AI provider base URLs.
    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        // not `Default` impl yet to keep explicit semantics
        Self::new(
            DEFAULT_BIND_ADDR,
            LogFormat::Pretty,
            ProviderEndpoints::default(),
        )
    }
}

fn endpoint_from_env(key: &'static str, default: &str) -> Result<String, ConfigError> {
    let raw = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default.to_string()),
    };

    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field: key,
        reason: e.to_string(),
    })?;

    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
