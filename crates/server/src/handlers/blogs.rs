//! Blog handlers

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::Result;
use crate::models::{Blog, BlogUpdate, NewBlog};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bloglist_core::Summary;
use tracing::info;

/// GET /api/blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>> {
    info!("GET /api/blogs");
    Ok(Json(state.blogs.list().await?))
}

/// GET /api/blogs/stats
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<Summary>> {
    info!("GET /api/blogs/stats");
    let blogs = state.blogs.list().await?;
    Ok(Json(bloglist_core::summarize(&blogs)))
}

/// GET /api/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>> {
    info!("GET /api/blogs/{}", id);
    Ok(Json(state.blogs.get(&id).await?))
}

/// POST /api/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    Json(req): Json<NewBlog>,
) -> Result<(StatusCode, Json<Blog>)> {
    info!("POST /api/blogs - by {}", ctx.username());

    let blog = state.blogs.create(req, ctx.user_id()).await?;

    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /api/blogs/{id}
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BlogUpdate>,
) -> Result<Json<Blog>> {
    info!("PUT /api/blogs/{}", id);
    Ok(Json(state.blogs.update(&id, req).await?))
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    info!("DELETE /api/blogs/{} - by {}", id, ctx.username());

    state.blogs.delete(&id, ctx.user_id()).await?;

    Ok(StatusCode::NO_CONTENT)
}
