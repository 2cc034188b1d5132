//! OpenAPI document served under `/documentation`.
//!
//! Request schemas come from the same types the extractors validate, so the
//! documented constraints and the enforced ones cannot drift apart.

use utoipa::OpenApi;

use crate::error::ErrorEnvelope;
use crate::models::{DataState, User};
use crate::routes::ping::PingResponse;
use crate::routes::users::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use crate::services::{Pagination, UserPage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Starter API",
        description = "User management starter API",
        version = "1.0.0"
    ),
    servers((url = "/api/v0")),
    paths(
        crate::routes::ping::ping,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::delete,
    ),
    components(schemas(
        User,
        DataState,
        Pagination,
        UserPage,
        UserResponse,
        MessageResponse,
        CreateUserRequest,
        UpdateUserRequest,
        PingResponse,
        ErrorEnvelope,
    )),
    tags(
        (name = "Health", description = "Liveness checks"),
        (name = "Users", description = "User management")
    )
)]
pub struct ApiDoc;
