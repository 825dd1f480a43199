//! User handlers

use crate::config::AppState;
use crate::error::Result;
use crate::models::{NewUser, User};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    info!("POST /api/users - {:?}", req.username);

    let user = state.users.create(req).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    info!("GET /api/users");
    Ok(Json(state.users.list().await?))
}
