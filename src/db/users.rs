use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{StoreError, UserFilter, UserKey, UserStore, Window};
use crate::models::{NewUser, User, UserChanges};

const SEARCH_COLUMNS: [&str; 4] = ["name", "email", "first_name", "last_name"];

/// `users` table backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a UserFilter) {
    qb.push(" WHERE TRUE");
    if let Some(state) = filter.state {
        qb.push(" AND state = ").push_bind(state);
    }
    if let Some(search) = filter.search.as_deref() {
        qb.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("strpos(")
                .push(*column)
                .push(", ")
                .push_bind(search)
                .push(") > 0");
        }
        qb.push(")");
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            StoreError::UniqueViolation("email")
        }
        _ => StoreError::Database(err),
    }
}

fn to_limit(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_many(
        &self,
        filter: &UserFilter,
        window: Option<Window>,
    ) -> Result<Vec<User>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, name, email, first_name, last_name, description, state, created_at, updated_at
             FROM users",
        );
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id DESC");
        if let Some(window) = window {
            qb.push(" LIMIT ")
                .push_bind(to_limit(window.take))
                .push(" OFFSET ")
                .push_bind(to_limit(window.skip));
        }

        let users = qb.build_query_as::<User>().fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn find_unique(&self, key: UserKey<'_>) -> Result<Option<User>, StoreError> {
        let user = match key {
            UserKey::Id(id) => {
                sqlx::query_as::<_, User>(
                    "SELECT id, name, email, first_name, last_name, description, state, created_at, updated_at
                     FROM users WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            UserKey::Email(email) => {
                sqlx::query_as::<_, User>(
                    "SELECT id, name, email, first_name, last_name, description, state, created_at, updated_at
                     FROM users WHERE email = $1",
                )
                .bind(email)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(user)
    }

    async fn count(&self, filter: &UserFilter) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut qb, filter);

        let total: i64 = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, first_name, last_name, description, state)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, name, email, first_name, last_name, description, state, created_at, updated_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.description)
        .bind(user.state)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password = COALESCE($4, password),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                description = COALESCE($7, description),
                state = COALESCE($8, state),
                updated_at = now()
             WHERE id = $1
             RETURNING id, name, email, first_name, last_name, description, state, created_at, updated_at",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.description)
        .bind(changes.state)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(StoreError::Missing(id))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(id));
        }
        Ok(())
    }
}
