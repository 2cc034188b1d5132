pub mod config;
pub mod db;
pub mod doc;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use chrono::{SecondsFormat, Utc};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::doc::ApiDoc;
use crate::middleware::errors::render_errors;
use crate::services::ServiceRegistry;
use crate::state::{AppState, SharedState};

pub fn build_app(services: ServiceRegistry, config: Config) -> Router {
    let state: SharedState = Arc::new(AppState { config, services });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .nest("/api/v0", routes::api_routes())
        .merge(SwaggerUi::new("/documentation").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(routes::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            render_errors,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn banner() -> &'static str {
    "Starter API"
}

async fn health() -> &'static str {
    "ok"
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
