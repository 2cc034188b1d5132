use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, UserFilter, UserKey, UserStore, Window};
use crate::models::{NewUser, User, UserChanges};

/// Process-local `users` table.
///
/// Behaves like [`super::PgUserStore`]: ids increase monotonically and are never
/// reused, emails are unique, and `find_many` returns newest rows first.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Row {
    user: User,
    // Kept out of `User` so reads can never leak it.
    password: String,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Password column of a row, as stored.
    pub async fn stored_password(&self, id: i32) -> Option<String> {
        let table = self.table.read().await;
        table
            .rows
            .iter()
            .find(|row| row.user.id == id)
            .map(|row| row.password.clone())
    }
}

impl UserFilter {
    fn matches(&self, user: &User) -> bool {
        if self.state.is_some_and(|state| state != user.state) {
            return false;
        }
        match self.search.as_deref() {
            None => true,
            Some(needle) => [
                user.name.as_deref(),
                Some(user.email.as_str()),
                user.first_name.as_deref(),
                user.last_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.contains(needle)),
        }
    }
}

fn newest_first(a: &User, b: &User) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_many(
        &self,
        filter: &UserFilter,
        window: Option<Window>,
    ) -> Result<Vec<User>, StoreError> {
        let table = self.table.read().await;
        let mut users: Vec<User> = table
            .rows
            .iter()
            .filter(|row| filter.matches(&row.user))
            .map(|row| row.user.clone())
            .collect();
        users.sort_by(newest_first);

        let users = match window {
            Some(window) => users
                .into_iter()
                .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(window.take).unwrap_or(usize::MAX))
                .collect(),
            None => users,
        };
        Ok(users)
    }

    async fn find_unique(&self, key: UserKey<'_>) -> Result<Option<User>, StoreError> {
        let table = self.table.read().await;
        let found = table.rows.iter().find(|row| match key {
            UserKey::Id(id) => row.user.id == id,
            UserKey::Email(email) => row.user.email == email,
        });
        Ok(found.map(|row| row.user.clone()))
    }

    async fn count(&self, filter: &UserFilter) -> Result<u64, StoreError> {
        let table = self.table.read().await;
        let total = table
            .rows
            .iter()
            .filter(|row| filter.matches(&row.user))
            .count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|row| row.user.email == user.email) {
            return Err(StoreError::UniqueViolation("email"));
        }

        table.last_id += 1;
        let created_at = Utc::now();
        let row = Row {
            user: User {
                id: table.last_id,
                name: Some(user.name.clone()),
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                description: user.description.clone(),
                state: user.state,
                created_at,
                updated_at: created_at,
            },
            password: user.password.clone(),
        };
        table.rows.push(row.clone());
        Ok(row.user)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        if let Some(email) = changes.email.as_deref() {
            if table
                .rows
                .iter()
                .any(|row| row.user.email == email && row.user.id != id)
            {
                return Err(StoreError::UniqueViolation("email"));
            }
        }

        let row = table
            .rows
            .iter_mut()
            .find(|row| row.user.id == id)
            .ok_or(StoreError::Missing(id))?;

        let user = &mut row.user;
        if let Some(name) = &changes.name {
            user.name = Some(name.clone());
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            user.last_name = Some(last_name.clone());
        }
        if let Some(description) = &changes.description {
            user.description = Some(description.clone());
        }
        if let Some(state) = changes.state {
            user.state = state;
        }
        user.updated_at = Utc::now();
        let updated = user.clone();

        if let Some(password) = &changes.password {
            row.password = password.clone();
        }
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|row| row.user.id != id);
        if table.rows.len() == before {
            return Err(StoreError::Missing(id));
        }
        Ok(())
    }
}
