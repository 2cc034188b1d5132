//! Business rules over the persistence layer.

mod error;
mod users;

use std::sync::Arc;

use crate::db::UserStore;

pub use error::{ErrorKind, UserError};
pub use users::{
    CreateUser, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Pagination, UserPage, UserQuery,
    UserService,
};

/// Builds every entity service once from the injected store handle.
pub struct ServiceRegistry {
    users: UserService,
}

impl ServiceRegistry {
    pub fn new(user_store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(user_store),
        }
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }
}
