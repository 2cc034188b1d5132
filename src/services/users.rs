use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use super::error::UserError;
use crate::db::{StoreError, UserFilter, UserKey, UserStore, Window};
use crate::models::{DataState, NewUser, User, UserChanges};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Listing options. `page` and `limit` are clamped into their valid ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub page: u32,
    pub limit: u32,
    pub state: Option<DataState>,
    pub search: Option<String>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            state: None,
            search: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl Pagination {
    fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit)),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserPage {
    pub data: Vec<User>,
    pub pagination: Pagination,
}

/// Input to [`UserService::create`]. There is no state field: new users are always active.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

fn not_found(id: i32) -> UserError {
    UserError::NotFound(format!("User with id {id} not found"))
}

fn email_taken(email: &str) -> UserError {
    UserError::AlreadyExists(format!("User with email {email} already exists"))
}

fn email_in_use(email: &str) -> UserError {
    UserError::AlreadyExists(format!("Email {email} is already in use"))
}

fn internal(err: StoreError) -> UserError {
    UserError::Internal(err.to_string())
}

/// Re-raise classified errors, wrap the rest into the operation's failure kind.
fn escalate(err: UserError, action: &str, wrap: fn(String) -> UserError) -> UserError {
    if err.is_classified() {
        err
    } else {
        wrap(format!("Failed to {action} user: {err}"))
    }
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &UserQuery) -> Result<UserPage, UserError> {
        let page = query.page.max(1);
        let limit = query.limit.clamp(1, MAX_LIMIT);
        let filter = UserFilter {
            state: query.state,
            search: query.search.clone().filter(|s| !s.is_empty()),
        };
        let window = Window {
            skip: u64::from(page - 1) * u64::from(limit),
            take: u64::from(limit),
        };

        let (data, total) = tokio::try_join!(
            self.store.find_many(&filter, Some(window)),
            self.store.count(&filter),
        )
        .map_err(internal)?;

        Ok(UserPage {
            data,
            pagination: Pagination::new(page, limit, total),
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, UserError> {
        self.store
            .find_unique(UserKey::Id(id))
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found(id))
    }

    /// Absence is not an error here, unlike [`UserService::get_by_id`].
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.store
            .find_unique(UserKey::Email(email))
            .await
            .map_err(internal)
    }

    pub async fn create(&self, data: CreateUser) -> Result<User, UserError> {
        let user = self
            .try_create(data)
            .await
            .map_err(|err| escalate(err, "create", UserError::CreationFailed))?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn try_create(&self, data: CreateUser) -> Result<User, UserError> {
        if self.get_by_email(&data.email).await?.is_some() {
            return Err(email_taken(&data.email));
        }

        let new_user = NewUser {
            name: data.name,
            email: data.email,
            password: data.password,
            first_name: data.first_name,
            last_name: data.last_name,
            description: data.description,
            state: DataState::Active,
        };
        self.store.create(&new_user).await.map_err(|err| match err {
            StoreError::UniqueViolation(_) => email_taken(&new_user.email),
            other => internal(other),
        })
    }

    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<User, UserError> {
        let user = self
            .try_update(id, &changes)
            .await
            .map_err(|err| escalate(err, "update", UserError::UpdateFailed))?;
        tracing::info!(user_id = id, state = %user.state, "User updated");
        Ok(user)
    }

    async fn try_update(&self, id: i32, changes: &UserChanges) -> Result<User, UserError> {
        self.get_by_id(id).await?;

        if let Some(email) = changes.email.as_deref() {
            if let Some(owner) = self.get_by_email(email).await? {
                if owner.id != id {
                    return Err(email_in_use(email));
                }
            }
        }

        self.store.update(id, changes).await.map_err(|err| match err {
            StoreError::UniqueViolation(_) => {
                email_in_use(changes.email.as_deref().unwrap_or_default())
            }
            StoreError::Missing(_) => not_found(id),
            other => internal(other),
        })
    }

    pub async fn soft_delete(&self, id: i32) -> Result<User, UserError> {
        self.update(id, UserChanges::state(DataState::Deleted)).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), UserError> {
        self.try_delete(id)
            .await
            .map_err(|err| escalate(err, "delete", UserError::DeletionFailed))?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn try_delete(&self, id: i32) -> Result<(), UserError> {
        self.get_by_id(id).await?;
        self.store.delete(id).await.map_err(|err| match err {
            StoreError::Missing(_) => not_found(id),
            other => internal(other),
        })
    }

    pub async fn list_by_state(&self, state: DataState) -> Result<Vec<User>, UserError> {
        self.store
            .find_many(&UserFilter::by_state(state), None)
            .await
            .map_err(internal)
    }

    pub async fn count(&self) -> Result<u64, UserError> {
        self.store
            .count(&UserFilter::default())
            .await
            .map_err(internal)
    }

    pub async fn count_by_state(&self, state: DataState) -> Result<u64, UserError> {
        self.store
            .count(&UserFilter::by_state(state))
            .await
            .map_err(internal)
    }
}
