use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ai::error::AiError;
use crate::ai::provider::{Provider, ProviderRequest, Purpose};

pub const AI_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest slice of an upstream error body kept in the error message.
const ERROR_BODY_MAX: usize = 500;

static AI_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(AI_TIMEOUT)
        .build()
        .expect("Failed to build AI HTTP client")
});

/// Send one prompt to `provider` and return the generated text.
///
/// Single attempt; a failure is reported to the caller as-is.
pub async fn call(
    provider: Provider,
    base_url: &str,
    api_key: &str,
    purpose: Purpose,
    prompt: &str,
) -> Result<String, AiError> {
    let start = std::time::Instant::now();
    let request = provider.build_request(base_url, api_key, purpose, prompt);
    let body = post_json(provider.name(), request).await?;
    let text = provider.response_text(&body)?;

    debug!(
        provider = %provider,
        model = provider.model(purpose),
        duration_ms = start.elapsed().as_millis(),
        "AI completion"
    );
    Ok(text)
}

/// POST a JSON body and return the JSON answer; non-2xx becomes
/// [`AiError::Api`]. The URL is never logged since Gemini carries the key in it.
pub(crate) async fn post_json(
    provider_name: &'static str,
    request: ProviderRequest,
) -> Result<Value, AiError> {
    let mut builder = AI_CLIENT.post(&request.url).json(&request.body);
    for (name, value) in &request.headers {
        builder = builder.header(*name, value);
    }

    let response = builder.send().await.map_err(|e| {
        let e = e.without_url();
        warn!(provider = provider_name, error = %e, "AI request failed");
        AiError::Network(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let error_text: String = error_text.chars().take(ERROR_BODY_MAX).collect();
        warn!(provider = provider_name, status = %status, error = %error_text, "AI API error");
        return Err(AiError::Api {
            provider: provider_name,
            status,
            body: error_text,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| AiError::Network(e.without_url().to_string()))
}
