pub mod dtos;
pub mod handlers;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{ai, app_state::AppState, extractor, feed, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::status,
        handlers::scrape_article,
        handlers::scrape_rss,
        handlers::test_rss_feed,
        handlers::generate_content,
        handlers::generate_seo,
        handlers::generate_image,
    ),
    components(schemas(
        health::StatusResponse,
        dtos::ErrorResponse,
        dtos::ScrapeRequest,
        dtos::RssRequest,
        dtos::RssTestRequest,
        dtos::GenerateRequest,
        dtos::SeoRequest,
        dtos::ImageRequest,
        extractor::SelectorSet,
        extractor::ExtractedArticle,
        extractor::ImageRef,
        extractor::EmbedRef,
        extractor::EmbedKind,
        feed::FeedResult,
        feed::FeedInfo,
        feed::FeedItem,
        ai::GenerationOptions,
        ai::GeneratedArticle,
        ai::GeneratedImage,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "scrape", description = "Article and feed extraction"),
        (name = "ai", description = "AI rewriting, SEO and image generation")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// The full HTTP surface with tracing, request ids and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(health::status))
        .route("/scrape", post(handlers::scrape_article))
        .route("/scrape/rss", post(handlers::scrape_rss))
        .route("/scrape/rss/test", post(handlers::test_rss_feed))
        .route("/ai/generate", post(handlers::generate_content))
        .route("/ai/generate_seo", post(handlers::generate_seo))
        .route("/ai/generate_image", post(handlers::generate_image))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
