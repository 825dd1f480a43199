//! SQLite-backed stores for users and blogs

pub mod blogs;
pub mod users;

pub use blogs::BlogStore;
pub use users::{Credentials, UserStore};
