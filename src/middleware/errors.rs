use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ErrorEnvelope, ErrorReport};
use crate::state::SharedState;

/// Re-renders error responses with the request path and logs them.
pub async fn render_errors(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    if report.status.is_server_error() {
        tracing::error!(%method, %path, status = report.status.as_u16(), "{}", report.message);
    } else {
        tracing::warn!(%method, %path, status = report.status.as_u16(), "{}", report.message);
    }

    let message = if report.unclassified && state.config.environment.is_production() {
        "Internal Server Error".to_string()
    } else {
        report.message
    };

    (report.status, Json(ErrorEnvelope::new(report.status, message, path))).into_response()
}
