//! Bloglist core
//!
//! Pure aggregation over lists of blog records. Nothing here performs I/O;
//! the server crate fetches records from storage and hands them in.

pub mod list_helper;
pub mod record;

pub use list_helper::{
    favorite_blog, most_blogs, most_likes, summarize, total_likes, AuthorBlogs, AuthorLikes,
    FavoriteBlog, Summary,
};
pub use record::{BlogRecord, Record};
