use readability::extractor;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Landmarks tried when readability finds nothing, most specific last.
const LANDMARK_SELECTORS: [&str; 9] = [
    "article",
    "main",
    "[role='main']",
    ".content",
    ".post",
    ".article",
    "#content",
    "#main",
    ".entry-content",
];

const MIN_LANDMARK_TEXT: usize = 100;

/// Generic main-content extraction over raw page markup.
///
/// Readability scoring first; if it yields no text, the first landmark
/// element with a reasonable amount of text. Returns the raw HTML fragment,
/// unsanitized.
pub fn extract(html: &str, url: &Url) -> Option<String> {
    match extractor::extract(&mut html.as_bytes(), url) {
        Ok(product) if !product.text.trim().is_empty() => return Some(product.content),
        Ok(_) => debug!(%url, "readability returned no text"),
        Err(e) => debug!(%url, error = ?e, "readability failed"),
    }

    landmark_extract(html)
}

fn landmark_extract(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector_str in LANDMARK_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            if text.trim().chars().count() > MIN_LANDMARK_TEXT {
                return Some(element.html());
            }
        }
    }

    None
}

/// Text of the first `<h1>` inside an extracted fragment, if any.
pub fn fragment_heading(fragment: &str) -> Option<String> {
    let fragment = Html::parse_fragment(fragment);
    let selector = Selector::parse("h1").ok()?;
    fragment
        .select(&selector)
        .next()
        .map(|h1| h1.text().collect::<String>().trim().to_string())
}

/// Text of the document's `<title>`, if present.
pub fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
}
