use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use serein_auth::{validate_token, CapabilitySet};
use serein_core::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, decoded from the bearer token and inserted into
/// request extensions for handlers to use.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub capabilities: CapabilitySet,
}

/// Bearer-token validation middleware.
///
/// Extracts `Authorization: Bearer <token>`, validates the JWT against
/// the configured secret, and injects [`AuthUser`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let claims = validate_token(token, state.config.token_secret.as_bytes())?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        capabilities: CapabilitySet::new(claims.roles),
    });

    Ok(next.run(req).await)
}

/// Admin capability gate, layered inside [`require_auth`] on the admin
/// routes.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let auth = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))?;

    auth.capabilities.require(Role::Admin)?;

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_the_token_after_the_bearer_prefix() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_non_bearer_schemes() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn rejects_an_empty_token() {
        let headers = headers_with("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }
}
