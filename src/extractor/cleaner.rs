use ammonia::{Builder, UrlRelative};
use url::Url;

/// Sanitize a fallback fragment for output.
///
/// Scripts, styles and event handlers go; links stay and relative `href`/`src`
/// values are rewritten against the page URL. `<img>` elements are kept only
/// when the caller asked for images.
pub fn sanitize_fragment(html: &str, base_url: &Url, include_images: bool) -> String {
    let mut builder = Builder::default();
    builder.url_relative(UrlRelative::RewriteWithBase(base_url.clone()));
    if !include_images {
        builder.rm_tags(&["img"]);
    }
    builder.clean(html).to_string().trim().to_string()
}
