//! Raw date strings straight from the feed XML.
//!
//! feed-rs hands back parsed `DateTime`s and drops the original text, and it
//! silently discards dates it cannot parse. Items must echo the published
//! string verbatim, and a present-but-unparseable date must be told apart
//! from a missing one, so this pass records the text per entry, by index.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Raw date text of one `<item>` / `<entry>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawEntryDates {
    pub published: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawFeedDates {
    /// Channel / feed level `lastBuildDate`, `updated` or `dc:date`, else
    /// the channel `pubDate` / `published`.
    pub feed_updated: Option<String>,
    pub entries: Vec<RawEntryDates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    FeedUpdated,
    FeedPublished,
    Published,
    Updated,
}

fn slot_for(local_name: &str, in_entry: bool) -> Option<Slot> {
    match (local_name, in_entry) {
        ("pubDate" | "published" | "issued" | "date", true) => Some(Slot::Published),
        ("updated" | "modified", true) => Some(Slot::Updated),
        ("lastBuildDate" | "updated" | "date", false) => Some(Slot::FeedUpdated),
        ("pubDate" | "published", false) => Some(Slot::FeedPublished),
        _ => None,
    }
}

fn local_name(qualified: &[u8]) -> String {
    let name = String::from_utf8_lossy(qualified);
    name.rsplit(':').next().unwrap_or(&name).to_string()
}

/// Scan XML feed bytes. Non-XML input (JSON Feed) yields an empty result.
pub fn scan(data: &[u8]) -> RawFeedDates {
    let mut result = RawFeedDates::default();
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_entry = false;
    let mut current = RawEntryDates::default();
    let mut feed_published: Option<String> = None;
    let mut capture: Option<(Slot, String)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name = local_name(e.name().as_ref());

                match local_name.as_str() {
                    "item" | "entry" => {
                        in_entry = true;
                        current = RawEntryDates::default();
                    }
                    other => {
                        capture = slot_for(other, in_entry).map(|slot| (slot, String::new()));
                    }
                }
            }
            // `<item/>` is still an entry to feed-rs
            Ok(Event::Empty(ref e)) => {
                if !in_entry && matches!(local_name(e.name().as_ref()).as_str(), "item" | "entry") {
                    result.entries.push(RawEntryDates::default());
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&e.decode().map(|s| s.into_owned()).unwrap_or_default());
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = local_name(e.name().as_ref());

                if matches!(local_name.as_str(), "item" | "entry") && in_entry {
                    result.entries.push(std::mem::take(&mut current));
                    in_entry = false;
                    capture = None;
                } else if let Some((slot, text)) = capture.take() {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        let target = match slot {
                            Slot::FeedUpdated => &mut result.feed_updated,
                            Slot::FeedPublished => &mut feed_published,
                            Slot::Published => &mut current.published,
                            Slot::Updated => &mut current.updated,
                        };
                        // first occurrence wins
                        target.get_or_insert(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    if result.feed_updated.is_none() {
        result.feed_updated = feed_published;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rss_dates_per_item() {
        let xml = br#"<?xml version="1.0"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
<channel>
  <title>T</title>
  <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
  <lastBuildDate>Fri, 05 Jan 2024 12:00:00 GMT</lastBuildDate>
  <item><title>A</title><pubDate>Fri, 05 Jan 2024 10:30:00 GMT</pubDate></item>
  <item><title>B</title></item>
  <item><title>C</title><dc:date><![CDATA[yesterday-ish]]></dc:date></item>
</channel>
</rss>"#;
        let dates = scan(xml);
        assert_eq!(dates.feed_updated.as_deref(), Some("Fri, 05 Jan 2024 12:00:00 GMT"));
        assert_eq!(dates.entries.len(), 3);
        assert_eq!(
            dates.entries[0].published.as_deref(),
            Some("Fri, 05 Jan 2024 10:30:00 GMT")
        );
        assert_eq!(dates.entries[1], RawEntryDates::default());
        assert_eq!(dates.entries[2].published.as_deref(), Some("yesterday-ish"));
    }

    #[test]
    fn test_atom_dates() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom</title>
  <updated>2024-01-06T08:00:00Z</updated>
  <entry>
    <title>E</title>
    <published>2024-01-05T10:30:00Z</published>
    <updated>2024-01-05T11:00:00Z</updated>
  </entry>
</feed>"#;
        let dates = scan(xml);
        assert_eq!(dates.feed_updated.as_deref(), Some("2024-01-06T08:00:00Z"));
        assert_eq!(dates.entries[0].published.as_deref(), Some("2024-01-05T10:30:00Z"));
        assert_eq!(dates.entries[0].updated.as_deref(), Some("2024-01-05T11:00:00Z"));
    }

    #[test]
    fn test_self_closing_item_keeps_entries_aligned() {
        let xml = br#"<rss version="2.0"><channel><title>T</title>
  <item/>
  <item><title>B</title><pubDate>Fri, 05 Jan 2024 10:30:00 GMT</pubDate></item>
</channel></rss>"#;
        let dates = scan(xml);
        assert_eq!(dates.entries.len(), 2);
        assert_eq!(dates.entries[0], RawEntryDates::default());
        assert_eq!(
            dates.entries[1].published.as_deref(),
            Some("Fri, 05 Jan 2024 10:30:00 GMT")
        );
    }

    #[test]
    fn test_channel_pub_date_is_the_updated_fallback() {
        let xml = br#"<rss version="2.0"><channel><title>T</title>
  <pubDate>Fri, 05 Jan 2024 10:30:00 GMT</pubDate>
  <item><title>A</title></item>
</channel></rss>"#;
        let dates = scan(xml);
        assert_eq!(dates.feed_updated.as_deref(), Some("Fri, 05 Jan 2024 10:30:00 GMT"));
        assert_eq!(dates.entries, vec![RawEntryDates::default()]);
    }

    #[test]
    fn test_json_feed_yields_nothing() {
        let dates = scan(br#"{"version": "https://jsonfeed.org/version/1.1", "items": []}"#);
        assert_eq!(dates, RawFeedDates::default());
    }
}
