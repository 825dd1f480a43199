//! HTTP handlers

pub mod blogs;
pub mod login;
pub mod users;

pub use blogs::{blog_stats, create_blog, delete_blog, get_blog, list_blogs, update_blog};
pub use login::login;
pub use users::{create_user, list_users};
