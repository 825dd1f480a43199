use bloglist_core::BlogRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public user info (no sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub blogs: Vec<UserBlog>,
}

/// A blog as listed under its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBlog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
}

/// The owner embedded in a blog response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogOwner {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

/// A blog post with its owner populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<BlogOwner>,
}

impl BlogRecord for Blog {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /api/blogs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Body of `PUT /api/blogs/{id}`; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}
