use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use newsdesk::{api, app_state::AppState, config::ProviderEndpoints};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn create_test_app(endpoints: ProviderEndpoints) -> Router {
    api::router(AppState::new(endpoints))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_status() {
    let app = create_test_app(ProviderEndpoints::default());
    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok", "message": "API is running"}));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = create_test_app(ProviderEndpoints::default());
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"].get("/scrape/rss").is_some());
    assert!(doc["paths"].get("/ai/generate_image").is_some());
}

#[tokio::test]
async fn test_required_field_errors() {
    let app = create_test_app(ProviderEndpoints::default());

    let (status, body) = post_json(app.clone(), "/scrape", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "URL is required"}));

    let (status, body) = post_json(app.clone(), "/scrape/rss", json!({"limit": 3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Feed URL is required"}));

    let (status, body) = post_json(app.clone(), "/scrape/rss/test", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Feed URL is required"}));

    let (status, body) = post_json(app.clone(), "/ai/generate", json!({"content": "c"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Missing required fields: title, model, api_key"})
    );

    let (status, body) = post_json(app, "/ai/generate_image", json!({"prompt": "p"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required fields: api_key"}));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app(ProviderEndpoints::default());
    let request = Request::builder()
        .method("POST")
        .uri("/scrape")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_models_are_bad_request() {
    let app = create_test_app(ProviderEndpoints::default());

    let (status, body) = post_json(
        app.clone(),
        "/ai/generate",
        json!({"content": "c", "title": "t", "model": "llama", "api_key": "k"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Unknown AI model: llama"}));

    let (status, body) = post_json(
        app.clone(),
        "/ai/generate_seo",
        json!({"content": "c", "title": "t", "model": "openai", "api_key": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "OpenAI API key is required"}));

    let (status, body) = post_json(
        app,
        "/ai/generate_image",
        json!({"prompt": "p", "api_key": "k", "model": "stable-diffusion"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Unsupported image model: stable-diffusion. Only DALL-E is currently supported."})
    );
}

#[tokio::test]
async fn test_scrape_through_the_router() {
    let mock_server = MockServer::start().await;
    let paragraph = "Markets rallied on Tuesday as investors welcomed the new trade agreement. ".repeat(5);
    let html = format!(
        "<html><body><h1>Deal signed</h1><article><p>{paragraph}</p></article></body></html>"
    );
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html.into_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/story", mock_server.uri());
    let app = create_test_app(ProviderEndpoints::default());
    let (status, body) = post_json(
        app,
        "/scrape",
        json!({"url": url, "fetch_social_embeds": false}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], url);
    assert_eq!(body["title"], "Deal signed");
    assert_eq!(body["images"], json!([]));
    assert!(body.get("social_embeds").is_none());
}

#[tokio::test]
async fn test_scrape_failure_is_bad_gateway_with_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = format!("{}/down", mock_server.uri());
    let app = create_test_app(ProviderEndpoints::default());
    let (status, body) = post_json(app, "/scrape", json!({"url": url})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["url"], url);
    assert!(body["error"].as_str().unwrap().starts_with("Failed to scrape content"));
}

#[tokio::test]
async fn test_feed_failure_is_bad_gateway_with_feed_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<rss version=\"2.0\"><channel></channel></rss>".as_bytes())
                .insert_header("Content-Type", "application/rss+xml"),
        )
        .mount(&mock_server)
        .await;

    let feed_url = format!("{}/rss", mock_server.uri());
    let app = create_test_app(ProviderEndpoints::default());
    let (status, body) = post_json(app, "/scrape/rss", json!({"feed_url": feed_url})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({"error": "Failed to parse feed or no entries found", "feed_url": feed_url})
    );
}

#[tokio::test]
async fn test_ai_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let app = create_test_app(ProviderEndpoints::all(mock_server.uri()));
    let (status, body) = post_json(
        app,
        "/ai/generate",
        json!({"content": "c", "title": "t", "model": "openai", "api_key": "k"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to generate content: OpenAI API returned 429"));
}
