pub mod cleaner;
pub mod media;
pub mod model;
pub mod reader;
pub mod selectors;

#[cfg(test)]
mod tests;

pub use model::{
    EmbedKind, EmbedRef, ExtractOptions, ExtractedArticle, ImageRef, NO_CONTENT, NO_TITLE,
    SelectorSet,
};

use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::ExtractionError;
use crate::fetcher::{fetch, types::PageResponse};

/// Selector content shorter than this is treated as a miss.
const MIN_SELECTED_CONTENT: usize = 200;

/// Fetch `url` and extract an article from it.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract(
    url: &str,
    selectors: &SelectorSet,
    options: ExtractOptions,
) -> Result<ExtractedArticle, ExtractionError> {
    let page = fetch(url).await.map_err(|e| {
        warn!(error = %e, retriable = e.should_retry(), "fetch failed");
        scrape_error(url, e)
    })?;

    extract_from_page(url, &page, selectors, options)
}

/// Extract an article from an already fetched page.
///
/// `requested_url` is echoed back as the article URL and is the base for
/// relative image URLs. The fallback fragment's links resolve against the
/// final (post-redirect) URL of the page.
pub fn extract_from_page(
    requested_url: &str,
    page: &PageResponse,
    selectors: &SelectorSet,
    options: ExtractOptions,
) -> Result<ExtractedArticle, ExtractionError> {
    extract_from_html(
        requested_url,
        &page.body_utf8,
        &page.url_final,
        selectors,
        options,
    )
}

pub fn extract_from_html(
    requested_url: &str,
    html: &str,
    base_url: &Url,
    selectors: &SelectorSet,
    options: ExtractOptions,
) -> Result<ExtractedArticle, ExtractionError> {
    // 1. Parse and run the caller's selectors
    let document = Html::parse_document(html);
    let mut fields =
        selectors::select_fields(&document, selectors).map_err(|e| scrape_error(requested_url, e))?;

    // 2. Fall back to generic extraction when the selectors missed the body
    if fields.content.chars().count() < MIN_SELECTED_CONTENT {
        debug!(
            selected_len = fields.content.len(),
            "selector content missing or short, using fallback extraction"
        );
        if let Some(raw) = reader::extract(html, base_url) {
            let fallback = cleaner::sanitize_fragment(&raw, base_url, options.fetch_images);
            if !fallback.is_empty() {
                if fields.title.is_empty() {
                    fields.title = reader::fragment_heading(&fallback)
                        .or_else(|| reader::document_title(&document))
                        .unwrap_or_else(|| NO_TITLE.to_string());
                }
                fields.content = fallback;
            }
        }
    }

    // 3. Sentinels for what is still missing
    let title = non_empty_or(fields.title.trim(), NO_TITLE);
    let content = non_empty_or(&fields.content, NO_CONTENT);

    // 4. Media come from the original document, never the fallback fragment
    let image_base = Url::parse(requested_url).unwrap_or_else(|_| base_url.clone());
    let images = options
        .fetch_images
        .then(|| media::extract_images(&document, &image_base));
    let social_embeds = options
        .fetch_embeds
        .then(|| media::extract_embeds(&document));

    info!(
        title = %title,
        content_len = content.len(),
        images = images.as_ref().map_or(0, Vec::len),
        embeds = social_embeds.as_ref().map_or(0, Vec::len),
        "article extracted"
    );

    Ok(ExtractedArticle {
        url: requested_url.to_string(),
        title,
        content,
        author: fields.author.trim().to_string(),
        date: fields.date.trim().to_string(),
        images,
        social_embeds,
    })
}

fn non_empty_or(value: &str, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}

fn scrape_error(url: &str, cause: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::new(url, format!("Failed to scrape content: {cause}"))
}
