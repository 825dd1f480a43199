#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bloglist_server::{db, router, AppState, ServerConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "testpassword";

pub struct TestApp {
    pub app: Router,
    database_path: PathBuf,
    // Keeps the database directory alive for the duration of the test
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

pub fn initial_blogs() -> Vec<Value> {
    vec![
        json!({
            "title": "React patterns",
            "author": "Michael Chan",
            "url": "https://reactpatterns.com/",
            "likes": 7
        }),
        json!({
            "title": "Go To Statement Considered Harmful",
            "author": "Edsger W. Dijkstra",
            "url": "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
            "likes": 5
        }),
    ]
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::with_base_dir(dir.path(), "test-secret").with_bcrypt_cost(4);
        let database_path = config.database_path();
        let state = AppState::new(config).await.unwrap();

        Self {
            app: router(state),
            database_path,
            _dir: dir,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None, None).await
    }

    pub async fn create_user(&self, username: &str, name: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/users",
            Some(json!({ "username": username, "name": name, "password": password })),
            None,
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Register the default user and return a token for them.
    pub async fn signed_in(&self) -> String {
        let response = self.create_user(USERNAME, "Test User", PASSWORD).await;
        assert_eq!(response.status, StatusCode::CREATED);
        self.login(USERNAME, PASSWORD).await
    }

    pub async fn seed_blogs(&self, token: &str) {
        for blog in initial_blogs() {
            let response = self.request("POST", "/api/blogs", Some(blog), Some(token)).await;
            assert_eq!(response.status, StatusCode::CREATED);
        }
    }

    pub async fn blogs_in_db(&self) -> Vec<Value> {
        let response = self.get("/api/blogs").await;
        assert_eq!(response.status, StatusCode::OK);
        response.body.as_array().unwrap().clone()
    }

    /// Delete a user row behind the API's back.
    pub async fn remove_user(&self, username: &str) {
        let pool = db::connect(&self.database_path).await.unwrap();
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(result.rows_affected(), 1);
        pool.close().await;
    }

    pub async fn users_in_db(&self) -> Vec<Value> {
        let response = self.get("/api/users").await;
        assert_eq!(response.status, StatusCode::OK);
        response.body.as_array().unwrap().clone()
    }
}

pub fn is_json(response: &TestResponse) -> bool {
    response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json"))
}
