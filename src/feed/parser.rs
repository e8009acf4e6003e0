use feed_rs::model::{Entry, Feed, Link};
use thiserror::Error;

use crate::feed::model::{FeedEntry, FeedInfo, ParsedFeed};
use crate::feed::raw_dates::{self, RawEntryDates};

#[derive(Debug, Error)]
pub enum FeedError {
    /// The bytes are not a feed feed-rs understands.
    #[error("failed to parse feed: {0}")]
    Parse(String),

    /// The feed parsed but carries no entries.
    #[error("feed is empty: no entries found")]
    Empty,
}

/// Parse RSS, Atom or JSON Feed bytes.
pub fn parse_feed_bytes(data: &[u8]) -> Result<ParsedFeed, FeedError> {
    let parsed = feed_rs::parser::parse(data).map_err(|e| FeedError::Parse(e.to_string()))?;
    if parsed.entries.is_empty() {
        return Err(FeedError::Empty);
    }

    let raw = raw_dates::scan(data);

    let entries = parsed
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| map_entry(entry, raw.entries.get(idx)))
        .collect();

    Ok(ParsedFeed {
        info: feed_info(&parsed, raw.feed_updated),
        entries,
    })
}

fn feed_info(feed: &Feed, raw_updated: Option<String>) -> FeedInfo {
    FeedInfo {
        title: feed.title.as_ref().map(|t| t.content.clone()).unwrap_or_default(),
        description: feed
            .description
            .as_ref()
            .map(|d| d.content.clone())
            .unwrap_or_default(),
        link: primary_link(&feed.links).unwrap_or_default(),
        updated: raw_updated
            .or_else(|| feed.updated.map(|dt| dt.to_rfc3339()))
            .unwrap_or_default(),
    }
}

fn map_entry(entry: &Entry, raw: Option<&RawEntryDates>) -> FeedEntry {
    let raw = raw.cloned().unwrap_or_default();

    let description = entry
        .summary
        .as_ref()
        .map(|t| t.content.clone())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()));

    let media = entry
        .media
        .iter()
        .flat_map(|object| object.content.iter())
        .filter_map(|content| content.url.as_ref().map(|url| url.to_string()))
        .collect();

    FeedEntry {
        title: entry.title.as_ref().map(|t| t.content.clone()),
        link: primary_link(&entry.links),
        description,
        author: entry.authors.first().map(|person| person.name.clone()),
        // JSON feeds have no XML to scan; echo the parsed value instead
        published_raw: raw
            .published
            .or_else(|| entry.published.map(|dt| dt.to_rfc3339())),
        updated_raw: raw.updated.or_else(|| entry.updated.map(|dt| dt.to_rfc3339())),
        published: entry.published,
        updated: entry.updated,
        media,
    }
}

/// The `rel="alternate"` link, else the first non-enclosure link.
fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|link| link.rel.as_deref() == Some("alternate"))
        .or_else(|| {
            links
                .iter()
                .find(|link| link.rel.as_deref() != Some("enclosure"))
        })
        .map(|link| link.href.clone())
}
