pub mod model;
pub mod parser;
pub mod raw_dates;

pub use model::{FeedEntry, FeedInfo, FeedItem, FeedResult, ParsedFeed};
pub use parser::{FeedError, parse_feed_bytes};

use tracing::{info, instrument, warn};

use crate::error::ExtractionError;
use crate::fetcher::fetch_feed;

pub const DEFAULT_SCRAPE_LIMIT: usize = 10;
pub const DEFAULT_TEST_LIMIT: usize = 5;

/// Message for every failure to get entries out of a feed URL, whether the
/// fetch, the parse, or an empty feed was the cause.
pub const NO_ENTRIES_MESSAGE: &str = "Failed to parse feed or no entries found";

/// Fetch and parse a feed, keep entries matching `keywords`, and return up to
/// `limit` normalized items.
///
/// `keywords` is a comma-separated list; an entry matches when any keyword is
/// a case-insensitive substring of its title or description. `limit` counts
/// emitted items, so filtered-out entries do not use it up.
#[instrument(skip_all, fields(url = %feed_url, limit = limit, keywords = %keywords))]
pub async fn scrape_feed(
    feed_url: &str,
    limit: usize,
    keywords: &str,
) -> Result<FeedResult, ExtractionError> {
    let body = fetch_feed(feed_url).await.map_err(|e| {
        warn!(error = %e, retriable = e.should_retry(), "feed fetch failed");
        ExtractionError::new(feed_url, NO_ENTRIES_MESSAGE)
    })?;

    let parsed = parse_feed_bytes(&body).map_err(|e| {
        warn!(error = %e, "feed parse failed");
        ExtractionError::new(feed_url, NO_ENTRIES_MESSAGE)
    })?;

    let result = build_result(parsed, limit, &parse_keywords(keywords));
    info!(
        entries = result.items.len(),
        title = %result.feed.title,
        "feed scraped"
    );
    Ok(result)
}

/// Quick look at a feed: no keyword filter, small default limit.
pub async fn test_feed(feed_url: &str, limit: usize) -> Result<FeedResult, ExtractionError> {
    scrape_feed(feed_url, limit, "").await
}

/// Split, trim and lower-case a comma-separated keyword list.
pub fn parse_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

pub fn build_result(parsed: ParsedFeed, limit: usize, keywords: &[String]) -> FeedResult {
    let items = parsed
        .entries
        .into_iter()
        .filter(|entry| matches_keywords(entry, keywords))
        .take(limit)
        .map(normalize_entry)
        .collect();

    FeedResult {
        feed: parsed.info,
        items,
    }
}

fn matches_keywords(entry: &FeedEntry, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let title = entry.title.as_deref().unwrap_or_default().to_lowercase();
    let description = entry.description.as_deref().unwrap_or_default().to_lowercase();
    keywords
        .iter()
        .any(|keyword| title.contains(keyword.as_str()) || description.contains(keyword.as_str()))
}

pub fn normalize_entry(entry: FeedEntry) -> FeedItem {
    let date = match entry.published.or(entry.updated) {
        Some(timestamp) => Some(timestamp.format(model::DATE_FORMAT).to_string()),
        // a date is there but nothing could parse it
        None if entry.published_raw.is_some() || entry.updated_raw.is_some() => Some(String::new()),
        None => None,
    };

    FeedItem {
        title: entry.title.unwrap_or_default(),
        link: entry.link.unwrap_or_default(),
        description: entry.description.unwrap_or_default(),
        published: entry.published_raw.unwrap_or_default(),
        date,
        author: entry.author.unwrap_or_default(),
        media: (!entry.media.is_empty()).then_some(entry.media),
    }
}
