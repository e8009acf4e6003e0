use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::ai::client::post_json;
use crate::ai::error::AiError;
use crate::ai::prompt;
use crate::ai::provider::ProviderRequest;

pub const DEFAULT_IMAGE_MODEL: &str = "dall-e";
pub const DEFAULT_IMAGE_STYLE: &str = "digital-art";

const PROVIDER_NAME: &str = "DALL-E";
const URL_POINTER: &str = "/data/0/url";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GeneratedImage {
    pub url: String,
    /// The style-enhanced prompt actually sent.
    pub prompt: String,
}

/// Only DALL-E is available; the name is matched case-insensitively.
pub fn ensure_supported_model(model: &str) -> Result<(), AiError> {
    if model.eq_ignore_ascii_case(DEFAULT_IMAGE_MODEL) {
        Ok(())
    } else {
        Err(AiError::UnsupportedImageModel(model.to_string()))
    }
}

/// DALL-E 3 through the OpenAI images endpoint.
#[derive(Debug, Clone)]
pub struct ImageGenerator {
    api_key: String,
    base_url: String,
}

impl ImageGenerator {
    /// `base_url` is the OpenAI API base.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, AiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey("OpenAI"));
        }
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, enhanced_prompt: &str) -> ProviderRequest {
        ProviderRequest {
            url: format!("{}/images/generations", self.base_url),
            headers: vec![("Authorization", format!("Bearer {}", self.api_key))],
            body: json!({
                "model": "dall-e-3",
                "prompt": enhanced_prompt,
                "n": 1,
                "size": "1024x1024",
                "quality": "standard",
            }),
        }
    }

    #[instrument(skip_all, fields(style = %style))]
    pub async fn generate_image(&self, prompt: &str, style: &str) -> Result<GeneratedImage, AiError> {
        let enhanced = prompt::image_prompt(prompt, style);
        let body = post_json(PROVIDER_NAME, self.request(&enhanced)).await?;

        let url = body
            .pointer(URL_POINTER)
            .and_then(Value::as_str)
            .ok_or(AiError::Response {
                provider: PROVIDER_NAME,
                path: URL_POINTER,
            })?
            .to_string();

        info!("image generated");
        Ok(GeneratedImage {
            url,
            prompt: enhanced,
        })
    }
}
