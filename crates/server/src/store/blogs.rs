//! Blog posts

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Blog, BlogOwner, BlogUpdate, NewBlog};

const SELECT_BLOGS: &str = r#"
    SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
    FROM blogs b
    LEFT JOIN users u ON u.id = b.user_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: String,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<String>,
    username: Option<String>,
    name: Option<String>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        let user = match (row.user_id, row.username) {
            (Some(id), Some(username)) => Some(BlogOwner {
                id,
                username,
                name: row.name,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: u64::try_from(row.likes).unwrap_or(0),
            user,
        }
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Validation(format!("Path `{}` is required.", field))),
    }
}

fn likes_to_db(likes: u64) -> Result<i64> {
    i64::try_from(likes).map_err(|_| Error::Validation("likes is out of range".to_string()))
}

pub struct BlogStore {
    pool: SqlitePool,
}

impl BlogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All blogs in insertion order, with owners populated
    pub async fn list(&self) -> Result<Vec<Blog>> {
        let rows: Vec<BlogRow> =
            sqlx::query_as(&format!("{} ORDER BY b.rowid", SELECT_BLOGS))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Blog> {
        let row: Option<BlogRow> = sqlx::query_as(&format!("{} WHERE b.id = ?", SELECT_BLOGS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Blog::from)
            .ok_or_else(|| Error::BlogNotFound { id: id.to_string() })
    }

    /// Create a blog owned by `owner_id`. Likes default to zero.
    pub async fn create(&self, req: NewBlog, owner_id: &str) -> Result<Blog> {
        let title = required("title", req.title)?;
        let url = required("url", req.url)?;
        let likes = likes_to_db(req.likes.unwrap_or(0))?;
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO blogs (id, title, author, url, likes, user_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&title)
        .bind(req.author.unwrap_or_default())
        .bind(&url)
        .bind(likes)
        .bind(owner_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!("[Blogs] Created {} ({}) for {}", id, title, owner_id);

        self.get(&id).await
    }

    /// Overwrite the fields present in `req`
    pub async fn update(&self, id: &str, req: BlogUpdate) -> Result<Blog> {
        if matches!(req.title.as_deref(), Some("")) {
            return Err(Error::Validation("Path `title` is required.".to_string()));
        }
        if matches!(req.url.as_deref(), Some("")) {
            return Err(Error::Validation("Path `url` is required.".to_string()));
        }
        let likes = req.likes.map(likes_to_db).transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE blogs SET
                title = COALESCE(?, title),
                author = COALESCE(?, author),
                url = COALESCE(?, url),
                likes = COALESCE(?, likes)
            WHERE id = ?
            "#,
        )
        .bind(req.title)
        .bind(req.author)
        .bind(req.url)
        .bind(likes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::BlogNotFound { id: id.to_string() });
        }

        info!("[Blogs] Updated {}", id);

        self.get(id).await
    }

    /// Delete a blog; only its owner may do so.
    pub async fn delete(&self, id: &str, requester_id: &str) -> Result<()> {
        let owner: Option<(Option<String>,)> =
            sqlx::query_as("SELECT user_id FROM blogs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let (owner_id,) = owner.ok_or_else(|| Error::BlogNotFound { id: id.to_string() })?;

        if owner_id.as_deref() != Some(requester_id) {
            return Err(Error::BlogDeleteFailNotOwner { id: id.to_string() });
        }

        sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("[Blogs] Deleted {} by {}", id, requester_id);

        Ok(())
    }
}
