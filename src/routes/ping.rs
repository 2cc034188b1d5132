use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "pong")]
    pub message: String,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    description = "Health check endpoint",
    responses((status = 200, description = "Service is up", body = PingResponse))
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
        timestamp: crate::timestamp(),
    })
}
