use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::ai::client;
use crate::ai::error::AiError;
use crate::ai::prompt::{self, GenerationOptions};
use crate::ai::provider::{Provider, Purpose};
use crate::config::ProviderEndpoints;

const MAX_FALLBACK_TAGS: usize = 7;

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").unwrap());
static JSON_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").unwrap());
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GeneratedArticle {
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub suggested_tags: Vec<String>,
}

/// Text generation bound to one provider and key.
#[derive(Debug, Clone)]
pub struct Generator {
    provider: Provider,
    api_key: String,
    base_url: String,
}

impl Generator {
    pub fn new(
        provider: Provider,
        api_key: impl Into<String>,
        endpoints: &ProviderEndpoints,
    ) -> Result<Self, AiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey(provider.name()));
        }
        Ok(Self {
            provider,
            api_key,
            base_url: provider.base_url(endpoints).to_string(),
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Rewrite an article. Tags come from a second call whose failure only
    /// empties `suggested_tags`.
    #[instrument(skip_all, fields(provider = %self.provider))]
    pub async fn generate_content(
        &self,
        content: &str,
        title: &str,
        options: &GenerationOptions,
    ) -> Result<GeneratedArticle, AiError> {
        let prompt = prompt::article_prompt(content, title, options);
        let generated = self.complete(Purpose::Article, &prompt).await?;

        let suggested_tags = self.extract_keywords(&generated).await;
        let article = GeneratedArticle {
            title: extract_title(&generated, title),
            word_count: generated.split_whitespace().count(),
            content: generated,
            suggested_tags,
        };

        info!(
            word_count = article.word_count,
            tags = article.suggested_tags.len(),
            "article generated"
        );
        Ok(article)
    }

    /// SEO title, tags, categories and meta description, as returned by the
    /// model.
    #[instrument(skip_all, fields(provider = %self.provider))]
    pub async fn generate_seo_data(&self, content: &str, title: &str) -> Result<Value, AiError> {
        let prompt = prompt::seo_prompt(content, title);
        let text = self.complete(Purpose::Seo, &prompt).await?;
        Ok(serde_json::from_str(strip_json_fence(&text))?)
    }

    /// Tags for `content`; never fails, an empty list means no tags.
    pub async fn extract_keywords(&self, content: &str) -> Vec<String> {
        let prompt = prompt::keyword_prompt(content);
        match self.complete(Purpose::Keywords, &prompt).await {
            Ok(text) => parse_tags(&text),
            Err(e) => {
                warn!(provider = %self.provider, error = %e, "keyword extraction failed");
                Vec::new()
            }
        }
    }

    async fn complete(&self, purpose: Purpose, prompt: &str) -> Result<String, AiError> {
        client::call(self.provider, &self.base_url, &self.api_key, purpose, prompt).await
    }
}

/// Title of a generated article: the first `<h1>`, else the first non-empty
/// line that is not markup, else `fallback`.
pub fn extract_title(generated: &str, fallback: &str) -> String {
    if let Some(caps) = H1_RE.captures(generated) {
        return caps[1].trim().to_string();
    }
    generated
        .lines()
        .find(|line| !line.trim().is_empty() && !line.starts_with('<'))
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Contents of a ```json fenced block if there is one, else the trimmed text.
pub fn strip_json_fence(text: &str) -> &str {
    JSON_FENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str())
        .trim()
}

/// Tags from a keyword answer: a JSON array, an object with `tags`, or as a
/// last resort the quoted strings in the text.
pub fn parse_tags(text: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(strip_json_fence(text)) {
        Ok(Value::Array(items)) => string_items(&items),
        Ok(Value::Object(map)) => map
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| string_items(items))
            .unwrap_or_default(),
        Ok(_) => Vec::new(),
        Err(_) => QUOTED_RE
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .take(MAX_FALLBACK_TAGS)
            .collect(),
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
