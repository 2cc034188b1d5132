use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::services::{ErrorKind, UserError};

#[derive(Debug)]
pub enum AppError {
    User(UserError),
    RouteNotFound { method: Method, path: String },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::User(err) => write!(f, "{err}"),
            AppError::RouteNotFound { method, path } => write!(f, "Route {method} {path} not found"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::User(err) => err.status_code(),
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn is_unclassified(&self) -> bool {
        matches!(self, AppError::User(err) if err.kind() == ErrorKind::Internal)
    }

    fn invalid(detail: impl std::fmt::Display) -> Self {
        AppError::User(UserError::InvalidData(format!("Validation failed: {detail}")))
    }
}

/// Error attached to a response so the envelope middleware can stamp the request path.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub unclassified: bool,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, error: String, path: String) -> Self {
        Self {
            success: false,
            error,
            status_code: status.as_u16(),
            timestamp: crate::timestamp(),
            path,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = ErrorReport {
            status: self.status_code(),
            message: self.to_string(),
            unclassified: self.is_unclassified(),
        };

        let body = ErrorEnvelope::new(report.status, report.message.clone(), String::new());
        let mut response = (report.status, Json(body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        AppError::User(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::invalid(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid(rejection.body_text())
    }
}
