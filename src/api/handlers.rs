use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::{
    ai::{self, AiError, Generator, ImageGenerator, Provider},
    api::dtos::{
        ErrorResponse, GenerateRequest, ImageRequest, RssRequest, RssTestRequest, ScrapeRequest,
        SeoRequest,
    },
    app_state::AppState,
    error::ExtractionError,
    extractor::{self, ExtractedArticle, SelectorSet},
    feed::{self, FeedResult},
};

fn bad_request(error: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error))).into_response()
}

fn article_failed(e: ExtractionError) -> Response {
    error!(url = %e.url, error = %e, "article scrape failed");
    let body = ErrorResponse {
        url: Some(e.url),
        ..ErrorResponse::new(e.message)
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

fn feed_failed(e: ExtractionError) -> Response {
    error!(feed_url = %e.url, error = %e, "feed scrape failed");
    let body = ErrorResponse {
        feed_url: Some(e.url),
        ..ErrorResponse::new(e.message)
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

/// `what` names the artifact for upstream failures ("content", "image", ...).
fn ai_failed(e: AiError, what: &str) -> Response {
    if e.is_client_error() {
        return bad_request(e.to_string());
    }
    error!(error = %e, "AI generation failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::new(format!("Failed to generate {what}: {e}"))),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/scrape",
    tag = "scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Extracted article", body = ExtractedArticle),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Page could not be fetched or extracted", body = ErrorResponse)
    )
)]
pub async fn scrape_article(payload: Result<Json<ScrapeRequest>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let url = match payload.validate() {
        Ok(url) => url,
        Err(error) => return bad_request(error),
    };

    debug!(url, "scraping article");
    let selectors = SelectorSet::or_default(payload.selectors.clone());
    match extractor::extract(url, &selectors, payload.options()).await {
        Ok(article) => Json(article).into_response(),
        Err(e) => article_failed(e),
    }
}

#[utoipa::path(
    post,
    path = "/scrape/rss",
    tag = "scrape",
    request_body = RssRequest,
    responses(
        (status = 200, description = "Feed header and matching items", body = FeedResult),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Feed could not be fetched or parsed", body = ErrorResponse)
    )
)]
pub async fn scrape_rss(payload: Result<Json<RssRequest>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let feed_url = match payload.validate() {
        Ok(feed_url) => feed_url,
        Err(error) => return bad_request(error),
    };

    debug!(feed_url, "scraping feed");
    match feed::scrape_feed(feed_url, payload.limit, &payload.keywords).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => feed_failed(e),
    }
}

#[utoipa::path(
    post,
    path = "/scrape/rss/test",
    tag = "scrape",
    request_body = RssTestRequest,
    responses(
        (status = 200, description = "First few feed items", body = FeedResult),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Feed could not be fetched or parsed", body = ErrorResponse)
    )
)]
pub async fn test_rss_feed(payload: Result<Json<RssTestRequest>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let feed_url = match payload.validate() {
        Ok(feed_url) => feed_url,
        Err(error) => return bad_request(error),
    };

    debug!(feed_url, "testing feed");
    match feed::test_feed(feed_url, payload.limit).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => feed_failed(e),
    }
}

/// Resolve the provider by name and bind the caller's key to it.
fn generator_for(
    state: &AppState,
    model: Option<&str>,
    api_key: Option<&str>,
) -> Result<Generator, AiError> {
    let provider: Provider = model.unwrap_or_default().parse()?;
    Generator::new(provider, api_key.unwrap_or_default(), &state.endpoints)
}

#[utoipa::path(
    post,
    path = "/ai/generate",
    tag = "ai",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Rewritten article", body = ai::GeneratedArticle),
        (status = 400, description = "Missing fields, unknown model or missing key", body = ErrorResponse),
        (status = 502, description = "Provider call failed", body = ErrorResponse)
    )
)]
pub async fn generate_content(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let generator =
        match generator_for(&state, payload.model.as_deref(), payload.api_key.as_deref()) {
            Ok(generator) => generator,
            Err(e) => return ai_failed(e, "content"),
        };

    debug!(provider = %generator.provider(), "generating content");
    let content = payload.content.as_deref().unwrap_or_default();
    let title = payload.title.as_deref().unwrap_or_default();
    match generator
        .generate_content(content, title, &payload.options)
        .await
    {
        Ok(article) => Json(article).into_response(),
        Err(e) => ai_failed(e, "content"),
    }
}

#[utoipa::path(
    post,
    path = "/ai/generate_seo",
    tag = "ai",
    request_body = SeoRequest,
    responses(
        (status = 200, description = "SEO title, tags, categories and meta description as returned by the model"),
        (status = 400, description = "Missing fields, unknown model or missing key", body = ErrorResponse),
        (status = 502, description = "Provider call failed or returned invalid JSON", body = ErrorResponse)
    )
)]
pub async fn generate_seo(
    State(state): State<AppState>,
    payload: Result<Json<SeoRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let generator =
        match generator_for(&state, payload.model.as_deref(), payload.api_key.as_deref()) {
            Ok(generator) => generator,
            Err(e) => return ai_failed(e, "SEO data"),
        };

    debug!(provider = %generator.provider(), "generating SEO data");
    let content = payload.content.as_deref().unwrap_or_default();
    let title = payload.title.as_deref().unwrap_or_default();
    match generator.generate_seo_data(content, title).await {
        Ok(seo) => Json(seo).into_response(),
        Err(e) => ai_failed(e, "SEO data"),
    }
}

#[utoipa::path(
    post,
    path = "/ai/generate_image",
    tag = "ai",
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Generated image URL and the prompt sent", body = ai::GeneratedImage),
        (status = 400, description = "Missing fields, unsupported model or missing key", body = ErrorResponse),
        (status = 502, description = "Provider call failed", body = ErrorResponse)
    )
)]
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let generator = match ai::image::ensure_supported_model(&payload.model).and_then(|_| {
        ImageGenerator::new(
            payload.api_key.as_deref().unwrap_or_default(),
            &state.endpoints.openai,
        )
    }) {
        Ok(generator) => generator,
        Err(e) => return ai_failed(e, "image"),
    };

    debug!(model = %payload.model, style = %payload.style, "generating image");
    let prompt = payload.prompt.as_deref().unwrap_or_default();
    match generator.generate_image(prompt, &payload.style).await {
        Ok(image) => Json(image).into_response(),
        Err(e) => ai_failed(e, "image"),
    }
}
