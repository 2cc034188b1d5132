use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, ErrorEnvelope};
use crate::extract::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::models::{DataState, User, UserChanges};
use crate::services::{CreateUser, DEFAULT_LIMIT, DEFAULT_PAGE, UserPage, UserQuery};
use crate::state::SharedState;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 1)]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: u32,
    pub state: Option<DataState>,
    /// Substring matched against name, email, first name and last name.
    pub search: Option<String>,
}

impl From<ListUsersParams> for UserQuery {
    fn from(params: ListUsersParams) -> Self {
        UserQuery {
            page: params.page,
            limit: params.limit,
            state: params.state,
            search: params.search,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    #[validate(email)]
    #[schema(example = "john@example.com")]
    pub email: String,
    #[validate(length(min = 6))]
    #[schema(min_length = 6)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            name: req.name,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    #[schema(min_length = 6)]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub state: Option<DataState>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            name: req.name,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            description: req.description,
            state: req.state,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub data: User,
    pub success: bool,
}

impl UserResponse {
    fn new(data: User) -> Self {
        Self { data, success: true }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    description = "Get all users with pagination and filtering",
    params(ListUsersParams),
    responses(
        (status = 200, description = "One page of users, newest first", body = UserPage),
        (status = 400, description = "Invalid query", body = ErrorEnvelope),
    )
)]
pub async fn list(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<ListUsersParams>,
) -> Result<Json<UserPage>, AppError> {
    let page = state.services.users().list(&params.into()).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    description = "Get user by ID",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "No such user", body = ErrorEnvelope),
    )
)]
pub async fn get(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.services.users().get_by_id(id).await?;
    Ok(Json(UserResponse::new(user)))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    description = "Create a new user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, body = UserResponse),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope),
    )
)]
pub async fn create(
    State(state): State<SharedState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.services.users().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::new(user))))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    description = "Update a user",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, body = UserResponse),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 409, description = "Email owned by another user", body = ErrorEnvelope),
    )
)]
pub async fn update(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.services.users().update(id, req.into()).await?;
    Ok(Json(UserResponse::new(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    description = "Delete a user",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "No such user", body = ErrorEnvelope),
    )
)]
pub async fn delete(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    state.services.users().delete(id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
        success: true,
    }))
}
