//! Route table
//!
//! Creating and deleting blogs sit behind the bearer-token middleware;
//! everything else is public.

use crate::auth::middleware::mw_require_auth;
use crate::config::AppState;
use crate::handlers::{
    blog_stats, create_blog, create_user, delete_blog, get_blog, list_blogs, list_users, login,
    update_blog,
};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/blogs", post(create_blog))
        .route("/api/blogs/{id}", delete(delete_blog))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_require_auth,
        ));

    let public = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/login", post(login))
        .route("/api/blogs", get(list_blogs))
        .route("/api/blogs/stats", get(blog_stats))
        .route("/api/blogs/{id}", get(get_blog).put(update_blog))
        .route("/health", get(health_check));

    public
        .merge(protected)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK - Bloglist Server"
}
