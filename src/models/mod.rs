mod user;

pub use user::{DataState, NewUser, User, UserChanges};
