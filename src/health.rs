use axum::Json;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    status: String,
    message: String,
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = StatusResponse)
    )
)]
pub async fn status() -> Json<StatusResponse> {
    debug!("status check");
    Json(StatusResponse {
        status: "ok".to_string(),
        message: "API is running".to_string(),
    })
}
