use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_TITLE_SELECTORS: &str = "h1, .entry-title, .article-title";
pub const DEFAULT_CONTENT_SELECTORS: &str = ".entry-content, article, .post-content";
pub const DEFAULT_AUTHOR_SELECTORS: &str = ".author, .byline";
pub const DEFAULT_DATE_SELECTORS: &str = ".published, .post-date, time";

pub const NO_TITLE: &str = "No Title Found";
pub const NO_CONTENT: &str = "No Content Found";

/// Comma-separated CSS selector candidates per logical field.
///
/// Missing fields deserialize to the empty string, which matches nothing.
/// `Default` is the built-in set used when the caller supplies none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectorSet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_SELECTORS.to_string(),
            content: DEFAULT_CONTENT_SELECTORS.to_string(),
            author: DEFAULT_AUTHOR_SELECTORS.to_string(),
            date: DEFAULT_DATE_SELECTORS.to_string(),
        }
    }
}

impl SelectorSet {
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.content, &self.author, &self.date]
            .iter()
            .all(|candidates| candidates.trim().is_empty())
    }

    /// The caller's set, or the built-in defaults when it is absent or blank.
    pub fn or_default(selectors: Option<SelectorSet>) -> SelectorSet {
        match selectors {
            Some(set) if !set.is_empty() => set,
            _ => SelectorSet::default(),
        }
    }
}

/// Which fields of an article to harvest besides the four selector fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub fetch_images: bool,
    pub fetch_embeds: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fetch_images: true,
            fetch_embeds: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageRef {
    pub url: String,
    pub alt: String,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    Twitter,
    Instagram,
    Youtube,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmbedRef {
    #[serde(rename = "type")]
    pub kind: EmbedKind,
    pub html: String,
}

/// Result of one article extraction.
///
/// `images` and `social_embeds` are `None` when harvesting them was not
/// requested, and are then left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractedArticle {
    pub url: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_embeds: Option<Vec<EmbedRef>>,
}

/// Raw per-field selector matches, before fallback and sentinel handling.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectedFields {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_selector_set_keeps_blank_fields() {
        let set: SelectorSet = serde_json::from_value(json!({"title": "h2.headline"})).unwrap();
        assert_eq!(set.title, "h2.headline");
        assert_eq!(set.content, "");
        assert!(!set.is_empty());
        assert_eq!(SelectorSet::or_default(Some(set.clone())), set);
    }

    #[test]
    fn test_blank_selector_set_uses_defaults() {
        let blank: SelectorSet = serde_json::from_value(json!({})).unwrap();
        assert!(blank.is_empty());
        assert_eq!(SelectorSet::or_default(Some(blank)), SelectorSet::default());
        assert_eq!(SelectorSet::or_default(None).content, DEFAULT_CONTENT_SELECTORS);
    }

    #[test]
    fn test_article_omits_unrequested_collections() {
        let article = ExtractedArticle {
            url: "https://example.com/a".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            author: String::new(),
            date: String::new(),
            images: None,
            social_embeds: Some(vec![EmbedRef {
                kind: EmbedKind::Youtube,
                html: "<iframe></iframe>".to_string(),
            }]),
        };
        let value = serde_json::to_value(&article).unwrap();
        assert!(value.get("images").is_none());
        assert_eq!(value["social_embeds"][0]["type"], "youtube");
    }
}
