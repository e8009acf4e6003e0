use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                reqwest::header::HeaderValue::from_static(
                    "text/html,application/xhtml+xml,application/rss+xml,application/atom+xml,application/xml;q=0.9,*/*;q=0.8",
                ),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetch a page and decode it to UTF-8.
///
/// Any content type is accepted; only the status and the transport can fail
/// the fetch.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    let response = send(url).await?;

    let final_url = response.url().clone();
    let status = response.status();
    let content_type = content_type(&response).unwrap_or_else(|| "text/html".to_string());

    let body_bytes = read_body(response).await?;
    let page = process_response(final_url, body_bytes, &content_type);
    debug!(
        %status,
        content_type = %content_type,
        charset = ?page.charset,
        final_url = %page.url_final,
        size = page.body_utf8.len(),
        "page fetched"
    );

    Ok(page)
}

/// Fetch a syndication feed as raw bytes.
///
/// No charset decoding: feeds carry their encoding in the XML declaration.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_feed(url: &str) -> Result<Bytes, FetchError> {
    let response = send(url).await?;

    let status = response.status();
    let content_type = content_type(&response);

    let body = read_body(response).await?;
    debug!(size = body.len(), %status, content_type = ?content_type, "feed fetched");

    Ok(body)
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(str::to_string)
}

/// Issue the GET and reject anything that is not a 2xx with an acceptable size.
async fn send(url: &str) -> Result<Response, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    Ok(response)
}

async fn read_body(response: Response) -> Result<Bytes, FetchError> {
    let body_bytes = response
        .bytes()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check body size after download (in case Content-Length was missing)
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    Ok(body_bytes)
}
