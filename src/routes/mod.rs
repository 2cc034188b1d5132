pub mod ping;
pub mod users;

use axum::extract::OriginalUri;
use axum::http::Method;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Health
        .route("/ping", get(ping::ping).fallback(not_found))
        // Users
        .route(
            "/users",
            get(users::list).post(users::create).fallback(not_found),
        )
        .route(
            "/users/{id}",
            get(users::get)
                .put(users::update)
                .delete(users::delete)
                .fallback(not_found),
        )
}

/// Unknown paths and unsupported methods on known paths.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}
