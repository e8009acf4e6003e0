use url::Url;

use crate::extractor::{
    EmbedKind, ExtractOptions, NO_CONTENT, NO_TITLE, SelectorSet, cleaner, extract_from_html,
    extract_from_page, reader,
};
use crate::fetcher::types::{Charset, PageResponse};

const STORY: &str = "The city council voted on Monday to expand the riverside park, adding three acres of wetland habitat and a new public boardwalk. Officials said construction will begin next year and is expected to take eighteen months to complete.";

fn article_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Park Expansion | City News</title></head>
<body>
  <nav><a href="/">Home</a></nav>
  <h1 class="entry-title">Council Approves Park Expansion</h1>
  <span class="author">Maria Lopez</span>
  <time datetime="2024-01-05">January 5, 2024</time>
  <div class="entry-content">
    <p>{STORY}</p>
    <p>{STORY}</p>
    <figure><img src="/images/park.jpg" alt="The park"><figcaption>Riverside park today</figcaption></figure>
    <blockquote class="twitter-tweet"><a href="https://twitter.com/city/status/1">tweet</a></blockquote>
  </div>
</body>
</html>"#
    )
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        body_utf8: html,
        charset: Charset::Utf8,
    }
}

#[test]
fn test_extract_with_default_selectors() {
    let url = "https://news.example.com/park";
    let response = create_test_response(article_page(), url);
    let article =
        extract_from_page(url, &response, &SelectorSet::default(), ExtractOptions::default())
            .unwrap();

    assert_eq!(article.url, url);
    assert_eq!(article.title, "Council Approves Park Expansion");
    assert_eq!(article.author, "Maria Lopez");
    assert_eq!(article.date, "January 5, 2024");
    assert!(article.content.starts_with("<div class=\"entry-content\">"));
    assert!(article.content.contains("riverside park"));

    let images = article.images.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].url, "https://news.example.com/images/park.jpg");
    assert_eq!(images[0].alt, "The park");
    assert_eq!(images[0].caption, "Riverside park today");

    let embeds = article.social_embeds.unwrap();
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0].kind, EmbedKind::Twitter);
}

#[test]
fn test_images_resolve_against_requested_url_after_redirect() {
    let requested = "https://news.example.com/old";
    let mut response = create_test_response(
        r#"<html><body><h1>Moved</h1><img src="a.jpg" alt="A"></body></html>"#.to_string(),
        requested,
    );
    response.url_final = Url::parse("https://news.example.com/new/sub/page").unwrap();

    let article = extract_from_page(
        requested,
        &response,
        &SelectorSet::default(),
        ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(article.url, requested);
    let images = article.images.unwrap();
    assert_eq!(images[0].url, "https://news.example.com/a.jpg");
}

#[test]
fn test_options_disable_media_harvest() {
    let url = "https://news.example.com/park";
    let article = extract_from_html(
        url,
        &article_page(),
        &Url::parse(url).unwrap(),
        &SelectorSet::default(),
        ExtractOptions {
            fetch_images: false,
            fetch_embeds: false,
        },
    )
    .unwrap();

    assert!(article.images.is_none());
    assert!(article.social_embeds.is_none());
}

#[test]
fn test_short_selector_content_replaced_by_fallback() {
    let html = format!(
        r#"<html><head><title>Doc Title</title></head><body>
        <div class="teaser">Short teaser.</div>
        <div id="story"><h1>Fallback Heading</h1><p>{STORY}</p><p>{STORY}</p><p>{STORY}</p></div>
        </body></html>"#
    );
    let base = Url::parse("https://news.example.com/story").unwrap();
    let selectors = SelectorSet {
        title: ".missing-title".to_string(),
        content: ".teaser".to_string(),
        author: String::new(),
        date: String::new(),
    };

    let article = extract_from_html(
        base.as_str(),
        &html,
        &base,
        &selectors,
        ExtractOptions::default(),
    )
    .unwrap();

    let raw = reader::extract(&html, &base).expect("fallback output");
    let expected = cleaner::sanitize_fragment(&raw, &base, true);
    assert_eq!(article.content, expected);
    assert_ne!(article.content, "Short teaser.");
    assert!(article.content.contains("riverside park"));
}

#[test]
fn test_no_title_anywhere_yields_sentinel() {
    let html = "<html><head></head><body><div class='x'></div></body></html>";
    let base = Url::parse("https://news.example.com/blank").unwrap();
    let article = extract_from_html(
        base.as_str(),
        html,
        &base,
        &SelectorSet::default(),
        ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(article.title, NO_TITLE);
    assert_eq!(article.content, NO_CONTENT);
    assert_eq!(article.author, "");
    assert_eq!(article.date, "");
}

#[test]
fn test_fallback_title_uses_document_title_without_heading() {
    let html = format!(
        r#"<html><head><title> Only The Title Tag </title></head><body>
        <div id="story"><p>{STORY}</p><p>{STORY}</p><p>{STORY}</p></div>
        </body></html>"#
    );
    let base = Url::parse("https://news.example.com/story").unwrap();
    let selectors = SelectorSet {
        title: ".nope".to_string(),
        content: ".nope".to_string(),
        author: String::new(),
        date: String::new(),
    };

    let article =
        extract_from_html(base.as_str(), &html, &base, &selectors, ExtractOptions::default())
            .unwrap();
    assert_eq!(article.title, "Only The Title Tag");
}

#[test]
fn test_invalid_selector_is_an_extraction_error() {
    let base = Url::parse("https://news.example.com/story").unwrap();
    let selectors = SelectorSet {
        title: "h1[".to_string(),
        ..SelectorSet::default()
    };
    let err = extract_from_html(
        base.as_str(),
        &article_page(),
        &base,
        &selectors,
        ExtractOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.url, base.as_str());
    assert!(err.message.starts_with("Failed to scrape content"));
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";
    let base = Url::parse("https://example.com/broken").unwrap();

    // Should handle malformed HTML gracefully
    let article =
        extract_from_html(base.as_str(), html, &base, &SelectorSet::default(), ExtractOptions::default())
            .unwrap();
    assert!(!article.title.is_empty());
    assert!(!article.content.is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            path in "[a-z]{0,8}"
        ) {
            let url = format!("https://example.com/{path}");
            let base = Url::parse(&url).unwrap();
            let _ = extract_from_html(&url, &html, &base, &SelectorSet::default(), ExtractOptions::default());
        }

        #[test]
        fn test_content_and_title_never_empty(html in ".*") {
            let base = Url::parse("https://example.com").unwrap();
            if let Ok(article) = extract_from_html(base.as_str(), &html, &base, &SelectorSet::default(), ExtractOptions::default()) {
                prop_assert!(!article.title.is_empty());
                prop_assert!(!article.content.is_empty());
            }
        }
    }
}
