use scraper::{Html, Selector};
use thiserror::Error;

use crate::extractor::model::{SelectedFields, SelectorSet};

/// Candidates that name an article body container. A match on one of these
/// keeps the element's markup; any other match keeps only its text.
const CONTAINER_SELECTORS: [&str; 4] = [".entry-content", ".article-content", "article", ".post-content"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// Run every field of the set against the document.
pub fn select_fields(document: &Html, selectors: &SelectorSet) -> Result<SelectedFields, SelectorError> {
    Ok(SelectedFields {
        title: select_field(document, &selectors.title)?,
        content: select_field(document, &selectors.content)?,
        author: select_field(document, &selectors.author)?,
        date: select_field(document, &selectors.date)?,
    })
}

/// First candidate with at least one match wins; only its first match is used.
pub fn select_field(document: &Html, candidates: &str) -> Result<String, SelectorError> {
    for candidate in candidates.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let selector = Selector::parse(candidate).map_err(|e| SelectorError {
            selector: candidate.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(element) = document.select(&selector).next() {
            if CONTAINER_SELECTORS.contains(&candidate) {
                return Ok(element.html());
            }
            return Ok(element.text().collect::<String>().trim().to_string());
        }
    }

    Ok(String::new())
}
