//! Server configuration and shared state

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::info;

use crate::auth::AuthManager;
use crate::db;
use crate::store::{BlogStore, UserStore};

pub const DEFAULT_ROOT: &str = "bloglist_data";
pub const DEFAULT_PORT: u16 = 3003;
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 1;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

// bcrypt rejects work factors outside this range
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Configuration for the Bloglist server
#[derive(Clone)]
pub struct ServerConfig {
    /// Directory holding the SQLite database
    pub data_dir: PathBuf,
    /// Port to listen on
    pub port: u16,
    /// HMAC secret used to sign bearer tokens
    pub secret: String,
    /// Lifetime of an issued token
    pub token_ttl: chrono::Duration,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("data_dir", &self.data_dir)
            .field("port", &self.port)
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl ServerConfig {
    /// Create config with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>, secret: impl Into<String>) -> Self {
        Self {
            data_dir: base_dir.into(),
            port: DEFAULT_PORT,
            secret: secret.into(),
            token_ttl: chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Read `BLOGLIST_ROOT`, `PORT`, `SECRET`, `TOKEN_TTL_HOURS` and `BCRYPT_COST`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let root = lookup("BLOGLIST_ROOT").unwrap_or_else(|| DEFAULT_ROOT.to_string());

        let secret = match lookup("SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => bail!("SECRET must be set to sign tokens"),
        };

        let mut config = Self::with_base_dir(root, secret);

        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?;
        }

        if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
            let hours: i64 = hours
                .parse()
                .with_context(|| format!("Invalid TOKEN_TTL_HOURS: {}", hours))?;
            if hours <= 0 {
                bail!("TOKEN_TTL_HOURS must be positive");
            }
            config.token_ttl = chrono::Duration::hours(hours);
        }

        if let Some(cost) = lookup("BCRYPT_COST") {
            let cost: u32 = cost
                .parse()
                .with_context(|| format!("Invalid BCRYPT_COST: {}", cost))?;
            if !BCRYPT_COST_RANGE.contains(&cost) {
                bail!(
                    "BCRYPT_COST must be between {} and {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                );
            }
            config.bcrypt_cost = cost;
        }

        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("bloglist.sqlite")
    }

    /// Ensure the data directory exists
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("Failed to create {:?}", self.data_dir))?;
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub auth: Arc<AuthManager>,
    pub users: Arc<UserStore>,
    pub blogs: Arc<BlogStore>,
}

impl AppState {
    /// Open the database and wire up the stores
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        config.ensure_dirs().await?;

        let pool = db::connect(&config.database_path()).await?;
        info!("Database ready at {:?}", config.database_path());

        let users = Arc::new(UserStore::new(pool.clone(), config.bcrypt_cost));
        let blogs = Arc::new(BlogStore::new(pool));
        let auth = Arc::new(AuthManager::new(
            &config.secret,
            config.token_ttl,
            users.clone(),
        ));

        Ok(Self {
            config,
            auth,
            users,
            blogs,
        })
    }
}
