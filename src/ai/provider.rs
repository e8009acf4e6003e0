//! Upstream text-generation providers, described as data.
//!
//! Every provider takes a prompt and returns text; they differ only in the
//! endpoint, how the key is sent, the request body layout, and where the
//! text sits in the response. `Provider` captures those four things and the
//! shared [`client::call`](crate::ai::client::call) does the round trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::ai::error::AiError;
use crate::config::ProviderEndpoints;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Claude,
    #[serde(rename = "deepseek")]
    DeepSeek,
}

/// What a request is for; picks model, sampling and output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Article,
    Seo,
    Keywords,
}

impl Purpose {
    pub fn temperature(self) -> f64 {
        match self {
            Self::Article => 0.7,
            Self::Seo | Self::Keywords => 0.3,
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Article => 4000,
            Self::Seo => 1000,
            Self::Keywords => 200,
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Article => {
                "You are an expert content writer that specializes in rewriting news articles."
            }
            Self::Seo => "You are an SEO expert providing analysis for web content.",
            Self::Keywords => "You are a keyword extraction expert.",
        }
    }

    /// Whether the answer must be a JSON document.
    pub fn wants_json(self) -> bool {
        !matches!(self, Self::Article)
    }
}

/// A fully described HTTP request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

pub const PROVIDERS: [Provider; 4] = [
    Provider::OpenAi,
    Provider::Gemini,
    Provider::Claude,
    Provider::DeepSeek,
];

const ANTHROPIC_VERSION: &str = "2023-06-01";

impl Provider {
    pub fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Human name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Claude => "Claude",
            Self::DeepSeek => "DeepSeek",
        }
    }

    pub fn model(self, purpose: Purpose) -> &'static str {
        match (self, purpose) {
            (Self::OpenAi, _) => "gpt-4o",
            (Self::Gemini, _) => "gemini-pro",
            (Self::Claude, Purpose::Keywords) => "claude-3-haiku-20240307",
            (Self::Claude, _) => "claude-3-opus-20240229",
            (Self::DeepSeek, _) => "deepseek-chat",
        }
    }

    pub fn base_url(self, endpoints: &ProviderEndpoints) -> &str {
        match self {
            Self::OpenAi => &endpoints.openai,
            Self::Gemini => &endpoints.gemini,
            Self::Claude => &endpoints.claude,
            Self::DeepSeek => &endpoints.deepseek,
        }
    }

    /// JSON pointer to the generated text in a successful response.
    pub fn text_pointer(self) -> &'static str {
        match self {
            Self::OpenAi | Self::DeepSeek => "/choices/0/message/content",
            Self::Gemini => "/candidates/0/content/parts/0/text",
            Self::Claude => "/content/0/text",
        }
    }

    /// Only OpenAI offers a strict JSON output mode.
    fn has_json_mode(self) -> bool {
        matches!(self, Self::OpenAi)
    }

    pub fn build_request(
        self,
        base_url: &str,
        api_key: &str,
        purpose: Purpose,
        prompt: &str,
    ) -> ProviderRequest {
        let base_url = base_url.trim_end_matches('/');
        let model = self.model(purpose);

        match self {
            Self::OpenAi | Self::DeepSeek => {
                let mut body = json!({
                    "model": model,
                    "messages": [
                        {"role": "system", "content": purpose.system_prompt()},
                        {"role": "user", "content": prompt},
                    ],
                    "temperature": purpose.temperature(),
                    "max_tokens": purpose.max_tokens(),
                });
                if purpose.wants_json() && self.has_json_mode() {
                    body["response_format"] = json!({"type": "json_object"});
                }
                ProviderRequest {
                    url: format!("{base_url}/chat/completions"),
                    headers: vec![("Authorization", format!("Bearer {api_key}"))],
                    body,
                }
            }
            Self::Claude => ProviderRequest {
                url: format!("{base_url}/messages"),
                headers: vec![
                    ("x-api-key", api_key.to_string()),
                    ("anthropic-version", ANTHROPIC_VERSION.to_string()),
                ],
                body: json!({
                    "model": model,
                    "max_tokens": purpose.max_tokens(),
                    "temperature": purpose.temperature(),
                    "system": purpose.system_prompt(),
                    "messages": [{"role": "user", "content": prompt}],
                }),
            },
            Self::Gemini => ProviderRequest {
                url: format!("{base_url}/models/{model}:generateContent?key={api_key}"),
                headers: Vec::new(),
                body: json!({
                    "contents": [{"role": "user", "parts": [{"text": prompt}]}],
                    "generationConfig": {
                        "temperature": purpose.temperature(),
                        "maxOutputTokens": purpose.max_tokens(),
                    },
                }),
            },
        }
    }

    /// Pull the generated text out of a response body.
    pub fn response_text(self, body: &Value) -> Result<String, AiError> {
        body.pointer(self.text_pointer())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(AiError::Response {
                provider: self.name(),
                path: self.text_pointer(),
            })
    }
}

impl FromStr for Provider {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PROVIDERS
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| AiError::UnknownModel(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
