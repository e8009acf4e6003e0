use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Bytes of the document inspected for `<meta>` declarations and sniffing.
const SNIFF_WINDOW: usize = 4096;

pub fn process_response(url_final: Url, body_bytes: Bytes, content_type: &str) -> PageResponse {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, charset);

    PageResponse {
        url_final,
        body_utf8,
        charset,
    }
}

/// Resolution order: byte-order mark, Content-Type header, `<meta charset>`,
/// `<meta http-equiv>`, then statistical detection over the first 4KB.
fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(body_bytes) {
        return Charset::from_encoding(encoding);
    }

    if let Some(encoding) = encoding_from_declaration(&CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    let search_str = String::from_utf8_lossy(search_bytes);

    for pattern in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(encoding) = encoding_from_declaration(pattern, &search_str) {
            return Charset::from_encoding(encoding);
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn encoding_from_declaration(pattern: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = pattern.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Malformed sequences become U+FFFD.
fn decode_to_utf8(body_bytes: &[u8], charset: Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(
            encoding = encoding.name(),
            "page contained malformed sequences, replaced with U+FFFD"
        );
    }

    decoded.into_owned()
}
