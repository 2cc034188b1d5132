use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state shared by every entity table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize, ToSchema,
)]
#[sqlx(type_name = "data_state", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DataState {
    #[default]
    Active,
    Inactive,
    Pending,
    Deleted,
}

impl DataState {
    #[cfg(test)]
    pub const ALL: [DataState; 4] = [
        DataState::Active,
        DataState::Inactive,
        DataState::Pending,
        DataState::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataState::Active => "ACTIVE",
            DataState::Inactive => "INACTIVE",
            DataState::Pending => "PENDING",
            DataState::Deleted => "DELETED",
        }
    }
}

impl std::fmt::Display for DataState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing projection of a user row. The password column is never selected into it.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub state: DataState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written by an insert. `state` is chosen by the service, not the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub state: DataState,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub state: Option<DataState>,
}

impl UserChanges {
    pub fn state(state: DataState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}
