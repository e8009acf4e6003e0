use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ai::GenerationOptions;
use crate::ai::image::{DEFAULT_IMAGE_MODEL, DEFAULT_IMAGE_STYLE};
use crate::extractor::{ExtractOptions, SelectorSet};
use crate::feed::{DEFAULT_SCRAPE_LIMIT, DEFAULT_TEST_LIMIT};

fn default_true() -> bool {
    true
}

fn default_scrape_limit() -> usize {
    DEFAULT_SCRAPE_LIMIT
}

fn default_test_limit() -> usize {
    DEFAULT_TEST_LIMIT
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_image_style() -> String {
    DEFAULT_IMAGE_STYLE.to_string()
}

/// Required string field: absent and blank both count as missing.
fn required<'a>(value: &'a Option<String>, error: &str) -> Result<&'a str, String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| error.to_string())
}

/// Names of the `(name, value)` pairs whose value is absent.
fn missing_fields(fields: &[(&str, &Option<String>)]) -> Result<(), String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScrapeRequest {
    pub url: Option<String>,
    #[serde(default)]
    pub selectors: Option<SelectorSet>,
    #[serde(default = "default_true")]
    pub fetch_images: bool,
    #[serde(default = "default_true")]
    pub fetch_social_embeds: bool,
}

impl ScrapeRequest {
    pub fn validate(&self) -> Result<&str, String> {
        required(&self.url, "URL is required")
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            fetch_images: self.fetch_images,
            fetch_embeds: self.fetch_social_embeds,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RssRequest {
    pub feed_url: Option<String>,
    #[serde(default = "default_scrape_limit")]
    pub limit: usize,
    /// Comma-separated; empty keeps every entry.
    #[serde(default)]
    pub keywords: String,
}

impl RssRequest {
    pub fn validate(&self) -> Result<&str, String> {
        required(&self.feed_url, "Feed URL is required")
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RssTestRequest {
    pub feed_url: Option<String>,
    #[serde(default = "default_test_limit")]
    pub limit: usize,
}

impl RssTestRequest {
    pub fn validate(&self) -> Result<&str, String> {
        required(&self.feed_url, "Feed URL is required")
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub content: Option<String>,
    pub title: Option<String>,
    /// `openai`, `gemini`, `claude` or `deepseek`.
    pub model: Option<String>,
    pub api_key: Option<String>,
    #[serde(flatten)]
    pub options: GenerationOptions,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), String> {
        missing_fields(&[
            ("content", &self.content),
            ("title", &self.title),
            ("model", &self.model),
            ("api_key", &self.api_key),
        ])
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SeoRequest {
    pub content: Option<String>,
    pub title: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

impl SeoRequest {
    pub fn validate(&self) -> Result<(), String> {
        missing_fields(&[
            ("content", &self.content),
            ("title", &self.title),
            ("model", &self.model),
            ("api_key", &self.api_key),
        ])
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageRequest {
    pub prompt: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_style")]
    pub style: String,
}

impl ImageRequest {
    pub fn validate(&self) -> Result<(), String> {
        missing_fields(&[("prompt", &self.prompt), ("api_key", &self.api_key)])
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Article URL that failed to scrape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Feed URL that failed to parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            url: None,
            feed_url: None,
        }
    }
}
