use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::extractor::model::{EmbedKind, EmbedRef, ImageRef};

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static FIGCAPTION: Lazy<Selector> = Lazy::new(|| Selector::parse("figcaption").unwrap());

/// Provider embed patterns, scanned in this order.
static EMBED_PATTERNS: Lazy<Vec<(EmbedKind, Selector)>> = Lazy::new(|| {
    [
        (
            EmbedKind::Twitter,
            ".twitter-tweet, blockquote.twitter-tweet, [data-tweet-id]",
        ),
        (
            EmbedKind::Instagram,
            ".instagram-media, blockquote.instagram-media, [data-instgrm-permalink]",
        ),
        (
            EmbedKind::Youtube,
            r#"iframe[src*="youtube.com"], iframe[src*="youtu.be"]"#,
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Selector::parse(pattern).unwrap()))
    .collect()
});

const PLACEHOLDER_SUFFIXES: [&str; 2] = ["placeholder.jpg", "placeholder.png"];
const ABSOLUTE_PREFIXES: [&str; 3] = ["http://", "https://", "data:"];

/// Every usable `<img>` in the document, in document order.
pub fn extract_images(document: &Html, base_url: &Url) -> Vec<ImageRef> {
    document
        .select(&IMG)
        .filter_map(|img| {
            let url = image_source(img)?;
            Some(ImageRef {
                url: absolutize(url, base_url),
                alt: img.value().attr("alt").unwrap_or_default().to_string(),
                caption: figure_caption(img).unwrap_or_default(),
            })
        })
        .collect()
}

/// `src`, unless it is missing or a known placeholder; then the lazy-load `data-src`.
fn image_source<'a>(img: ElementRef<'a>) -> Option<&'a str> {
    let element = img.value();
    let src = element.attr("src").filter(|src| !src.is_empty());
    let data_src = element.attr("data-src").filter(|src| !src.is_empty());

    match src {
        Some(src) if !is_placeholder(src) => Some(src),
        _ => data_src,
    }
}

fn is_placeholder(src: &str) -> bool {
    PLACEHOLDER_SUFFIXES.iter().any(|suffix| src.ends_with(suffix))
}

fn absolutize(raw: &str, base_url: &Url) -> String {
    if ABSOLUTE_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
        return raw.to_string();
    }
    base_url
        .join(raw)
        .map(String::from)
        .unwrap_or_else(|_| raw.to_string())
}

/// Caption text, only when the image sits directly inside a `<figure>`.
fn figure_caption(img: ElementRef<'_>) -> Option<String> {
    let parent = img.parent().and_then(ElementRef::wrap)?;
    if parent.value().name() != "figure" {
        return None;
    }
    parent
        .select(&FIGCAPTION)
        .next()
        .map(|caption| caption.text().collect::<String>().trim().to_string())
}

/// Social embeds: all Twitter matches, then Instagram, then YouTube.
pub fn extract_embeds(document: &Html) -> Vec<EmbedRef> {
    EMBED_PATTERNS
        .iter()
        .flat_map(|(kind, selector)| {
            document.select(selector).map(move |element| EmbedRef {
                kind: *kind,
                html: element.html(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page_url() -> Url {
        Url::parse("https://x.com/p").unwrap()
    }

    #[test]
    fn test_relative_image_resolved_against_page() {
        let doc = Html::parse_document(r#"<img src="/img/a.jpg" alt="A">"#);
        let images = extract_images(&doc, &page_url());
        assert_eq!(
            images,
            vec![ImageRef {
                url: "https://x.com/img/a.jpg".to_string(),
                alt: "A".to_string(),
                caption: String::new(),
            }]
        );
    }

    #[test]
    fn test_placeholder_only_image_is_skipped() {
        let doc = Html::parse_document(
            r#"<img src="/static/placeholder.jpg"><img data-src="lazy.png" src="placeholder.png"><img alt="nothing">"#,
        );
        let images = extract_images(&doc, &page_url());
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url, "https://x.com/lazy.png");
    }

    #[test]
    fn test_src_preferred_over_data_src() {
        let doc = Html::parse_document(r#"<img src="https://cdn.x.com/real.jpg" data-src="/lazy.jpg">"#);
        let images = extract_images(&doc, &page_url());
        assert_eq!(images[0].url, "https://cdn.x.com/real.jpg");
    }

    #[test]
    fn test_data_uri_left_alone() {
        let doc = Html::parse_document(r#"<img src="data:image/gif;base64,R0lGOD">"#);
        let images = extract_images(&doc, &page_url());
        assert_eq!(images[0].url, "data:image/gif;base64,R0lGOD");
    }

    #[test]
    fn test_caption_only_from_direct_figure_parent() {
        let doc = Html::parse_document(
            r#"<figure><img src="/a.jpg"><figcaption> A caption </figcaption></figure>
               <figure><div><img src="/b.jpg"></div><figcaption>Not mine</figcaption></figure>"#,
        );
        let images = extract_images(&doc, &page_url());
        assert_eq!(images[0].caption, "A caption");
        assert_eq!(images[1].caption, "");
    }

    #[test]
    fn test_embeds_grouped_by_provider_in_document_order() {
        let doc = Html::parse_document(
            r#"<body>
            <iframe src="https://www.youtube.com/embed/abc"></iframe>
            <blockquote class="instagram-media" data-instgrm-permalink="https://instagram.com/p/1"></blockquote>
            <blockquote class="twitter-tweet"><a href="https://twitter.com/a/status/1">t1</a></blockquote>
            <div data-tweet-id="2"></div>
            <iframe src="https://player.vimeo.com/video/1"></iframe>
            </body>"#,
        );
        let kinds: Vec<EmbedKind> = extract_embeds(&doc).iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EmbedKind::Twitter,
                EmbedKind::Twitter,
                EmbedKind::Instagram,
                EmbedKind::Youtube,
            ]
        );
        let embeds = extract_embeds(&doc);
        assert!(embeds[0].html.starts_with("<blockquote class=\"twitter-tweet\">"));
    }
}
