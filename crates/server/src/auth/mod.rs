//! Authentication Module
//!
//! Password hashing with bcrypt and bearer tokens signed with HS256.

pub mod middleware;

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::User;
use crate::store::UserStore;

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

/// Body returned by `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// Hash off the async runtime; bcrypt is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    let hashed = tokio::task::spawn_blocking(move || hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    let valid = tokio::task::spawn_blocking(move || verify(password, &password_hash)).await??;
    Ok(valid)
}

/// Auth manager issues and checks tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: chrono::Duration,
    users: Arc<UserStore>,
}

impl AuthManager {
    pub fn new(secret: &str, token_ttl: chrono::Duration, users: Arc<UserStore>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
            users,
        }
    }

    /// Check credentials and issue a token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let Some(credentials) = self.users.find_credentials(username).await? else {
            warn!("[Auth] Login attempt for unknown user {}", username);
            return Err(Error::LoginFail);
        };

        let valid = verify_password(password.to_string(), credentials.password_hash).await?;
        if !valid {
            warn!("[Auth] Failed login attempt for {}", username);
            return Err(Error::LoginFail);
        }

        let token = self.issue_token(&credentials.user)?;

        info!("[Auth] User logged in: {}", credentials.user.username);

        Ok(LoginResponse {
            token,
            username: credentials.user.username,
            name: credentials.user.name,
        })
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let expires_at = Utc::now() + self.token_ttl;

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp: expires_at.timestamp().max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::Internal(format!("Token error: {}", e)))
    }

    /// Verify signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    /// Resolve a token to the user it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.verify_token(token)?;

        match self.users.get(&claims.sub).await {
            Ok(user) => Ok(user),
            Err(Error::UserNotFound { .. }) => Err(Error::AuthFailUserNotFound),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user-1".to_string(),
            username: "root".to_string(),
            name: Some("Superuser".to_string()),
            created_at: Utc::now(),
            blogs: Vec::new(),
        }
    }

    fn manager(secret: &str, ttl: chrono::Duration) -> AuthManager {
        let pool = sqlx::SqlitePool::connect_lazy("sqlite::memory:").unwrap();
        AuthManager::new(secret, ttl, Arc::new(UserStore::new(pool, 4)))
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let auth = manager("secret", chrono::Duration::hours(1));
        let token = auth.issue_token(&user()).unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "root");
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let issuer = manager("secret", chrono::Duration::hours(1));
        let verifier = manager("other", chrono::Duration::hours(1));
        let token = issuer.issue_token(&user()).unwrap();

        assert!(matches!(
            verifier.verify_token(&token),
            Err(Error::AuthFailTokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let auth = manager("secret", chrono::Duration::hours(-2));
        let token = auth.issue_token(&user()).unwrap();

        assert!(matches!(
            auth.verify_token(&token),
            Err(Error::AuthFailTokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let auth = manager("secret", chrono::Duration::hours(1));
        assert!(auth.verify_token("not.a.token").is_err());
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hashed = hash_password("sekret".to_string(), 4).await.unwrap();
        assert_ne!(hashed, "sekret");
        assert!(verify_password("sekret".to_string(), hashed.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong".to_string(), hashed).await.unwrap());
    }
}
