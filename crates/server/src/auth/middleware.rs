use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Result<&str> {
    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or(Error::AuthFailTokenInvalid)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::AuthFailTokenInvalid);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::AuthFailTokenInvalid);
    }

    Ok(token)
}

pub async fn mw_require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    debug!("MIDDLEWARE: require_auth");

    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(h) => h.to_str().map_err(|_| Error::AuthFailTokenInvalid)?,
        None => return Err(Error::AuthFailNoToken),
    };

    let token = bearer_token(auth_header)?;

    let user = state.auth.authenticate(token).await?;

    req.extensions_mut().insert(Ctx::new(user.id, user.username));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(bearer_token("bearer abc").unwrap(), "abc");
        assert!(bearer_token("Basic abc").is_err());
        assert!(bearer_token("Bearer").is_err());
        assert!(bearer_token("Bearer   ").is_err());
    }
}
