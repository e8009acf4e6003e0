use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Output format of `FeedItem::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Feed-level metadata. Missing fields are empty strings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedInfo {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Raw header text, not normalized.
    pub updated: String,
}

/// One normalized feed entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Publication date exactly as written in the feed.
    pub published: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC; `""` when the feed has a date we could
    /// not parse; absent when the entry has no date at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub author: String,
    /// Media attachment URLs; absent when the entry has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedResult {
    pub feed: FeedInfo,
    pub items: Vec<FeedItem>,
}

/// A parsed feed entry before filtering and normalization.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published_raw: Option<String>,
    pub updated_raw: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub media: Vec<String>,
}

/// A parsed feed: header plus entries in document order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedFeed {
    pub info: FeedInfo,
    pub entries: Vec<FeedEntry>,
}
