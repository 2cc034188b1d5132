pub mod memory;
pub mod users;

use async_trait::async_trait;

use crate::models::{DataState, NewUser, User, UserChanges};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("Unique constraint failed on the field: {0}")]
    UniqueViolation(&'static str),
    #[error("Record with id {0} does not exist")]
    Missing(i32),
}

/// Row filter shared by `find_many` and `count` so both see the same rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub state: Option<DataState>,
    /// Substring matched against name, email, first name and last name.
    pub search: Option<String>,
}

impl UserFilter {
    pub fn by_state(state: DataState) -> Self {
        Self {
            state: Some(state),
            search: None,
        }
    }
}

/// Offset window over the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub take: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKey<'a> {
    Id(i32),
    Email(&'a str),
}

/// Persistence collaborator for the `users` table.
///
/// Every read returns the password-free [`User`] projection. `find_many` orders
/// rows newest first, breaking `created_at` ties by descending id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_many(
        &self,
        filter: &UserFilter,
        window: Option<Window>,
    ) -> Result<Vec<User>, StoreError>;

    async fn find_unique(&self, key: UserKey<'_>) -> Result<Option<User>, StoreError>;

    async fn count(&self, filter: &UserFilter) -> Result<u64, StoreError>;

    async fn create(&self, user: &NewUser) -> Result<User, StoreError>;

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<User, StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}
