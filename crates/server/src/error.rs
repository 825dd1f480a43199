use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth Errors
    #[error("invalid username or password")]
    LoginFail,
    #[error("token missing")]
    AuthFailNoToken,
    #[error("token invalid")]
    AuthFailTokenInvalid,
    #[error("operation not permitted")]
    AuthFailUserNotFound,
    #[error("auth context missing")]
    AuthFailCtxNotInRequestExt,

    // Model Errors
    #[error("blog not found")]
    BlogNotFound { id: String },
    #[error("invalid username")]
    BlogDeleteFailNotOwner { id: String },
    #[error("user not found")]
    UserNotFound { id: String },

    // Generic
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::LoginFail
            | Error::AuthFailNoToken
            | Error::AuthFailTokenInvalid
            | Error::AuthFailUserNotFound
            | Error::BlogDeleteFailNotOwner { .. } => StatusCode::UNAUTHORIZED,
            Error::BlogNotFound { .. } | Error::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::AuthFailCtxNotInRequestExt | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!("{}", self);
            "internal server error".to_string()
        } else {
            warn!("{} - {}", status, self);
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        Error::AuthFailTokenInvalid
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Internal(err.to_string())
    }
}
