//! Login handler

use crate::auth::LoginResponse;
use crate::config::AppState;
use crate::error::{Error, Result};
use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    // A missing field is treated like a wrong credential
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(Error::LoginFail);
    };

    info!("POST /api/login - {}", username);

    let response = state.auth.login(&username, &password).await?;

    Ok(Json(response))
}
