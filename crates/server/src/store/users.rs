//! User accounts

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::auth;
use crate::error::{Error, Result};
use crate::models::{NewUser, User, UserBlog};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 3;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
            created_at: row.created_at,
            blogs: Vec::new(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OwnedBlogRow {
    user_id: String,
    id: String,
    title: String,
    author: String,
    url: String,
}

/// A user together with the stored password hash, for login only.
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// Checked fields of a registration request
#[derive(Debug, PartialEq, Eq)]
pub struct ValidUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// Apply the registration rules in order: username present, username long
/// enough, password present and long enough.
pub fn validate_new_user(req: NewUser) -> Result<ValidUser> {
    let username = match req.username {
        Some(username) if !username.is_empty() => username,
        _ => return Err(Error::Validation("Path `username` is required.".to_string())),
    };

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(Error::Validation(format!(
            "Path `username` (`{}`) is shorter than the minimum allowed length ({}).",
            username, MIN_USERNAME_LEN
        )));
    }

    let password = match req.password {
        Some(password) if password.chars().count() >= MIN_PASSWORD_LEN => password,
        _ => {
            return Err(Error::Validation(
                "password must be at least three characters long".to_string(),
            ))
        }
    };

    Ok(ValidUser {
        username,
        name: req.name,
        password,
    })
}

fn duplicate_username() -> Error {
    Error::Validation("expected `username` to be unique".to_string())
}

pub struct UserStore {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Register a new user
    pub async fn create(&self, req: NewUser) -> Result<User> {
        let valid = validate_new_user(req)?;

        let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(&valid.username)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(duplicate_username());
        }

        let password_hash = auth::hash_password(valid.password, self.bcrypt_cost).await?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: valid.username,
            name: valid.name,
            created_at: Utc::now(),
            blogs: Vec::new(),
        };

        let inserted = sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {}
            // Lost a race with a concurrent registration
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(duplicate_username())
            }
            Err(e) => return Err(e.into()),
        }

        info!("[Users] Registered {}", user.username);

        Ok(user)
    }

    /// Get user by ID
    pub async fn get(&self, id: &str) -> Result<User> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or_else(|| Error::UserNotFound { id: id.to_string() })
    }

    pub async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let password_hash = row.password_hash.clone();
            Credentials {
                user: User::from(row),
                password_hash,
            }
        }))
    }

    /// List all users with the blogs they own
    pub async fn list(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, username, name, password_hash, created_at FROM users ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let blog_rows: Vec<OwnedBlogRow> = sqlx::query_as(
            "SELECT user_id, id, title, author, url FROM blogs WHERE user_id IS NOT NULL ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_owner: HashMap<String, Vec<UserBlog>> = HashMap::new();
        for row in blog_rows {
            by_owner.entry(row.user_id).or_default().push(UserBlog {
                id: row.id,
                title: row.title,
                author: row.author,
                url: row.url,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut user = User::from(row);
                user.blogs = by_owner.remove(&user.id).unwrap_or_default();
                user
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: Option<&str>, password: Option<&str>) -> NewUser {
        NewUser {
            username: username.map(str::to_string),
            name: Some("Test User".to_string()),
            password: password.map(str::to_string),
        }
    }

    fn message(err: Error) -> String {
        match err {
            Error::Validation(msg) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_user_passes() {
        let valid = validate_new_user(new_user(Some("root"), Some("sekret"))).unwrap();
        assert_eq!(valid.username, "root");
        assert_eq!(valid.name.as_deref(), Some("Test User"));
        assert_eq!(valid.password, "sekret");
    }

    #[test]
    fn test_username_required() {
        let err = validate_new_user(new_user(None, Some("secretpw"))).unwrap_err();
        assert!(message(err).contains("Path `username` is required."));

        let err = validate_new_user(new_user(Some(""), Some("secretpw"))).unwrap_err();
        assert!(message(err).contains("Path `username` is required."));
    }

    #[test]
    fn test_username_too_short() {
        let err = validate_new_user(new_user(Some("tc"), Some("secretpw"))).unwrap_err();
        assert!(message(err).contains("is shorter than the minimum allowed length (3)."));
    }

    #[test]
    fn test_password_rules() {
        let err = validate_new_user(new_user(Some("tcharacters"), Some("pw"))).unwrap_err();
        assert!(message(err).contains("at least three characters long"));

        let err = validate_new_user(new_user(Some("nopsw"), None)).unwrap_err();
        assert!(message(err).contains("at least three characters long"));
    }

    #[test]
    fn test_username_checked_before_password() {
        let err = validate_new_user(new_user(Some("tc"), None)).unwrap_err();
        assert!(message(err).contains("username"));
    }
}
