//! Auth Gate: JWT bearer-token check for protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use iconlib_core::error::CoreError;

use crate::auth::jwt::{verify_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Identity proven by a valid bearer token.
///
/// [`require_auth`] stores it in the request extensions; handlers can take it
/// as an extractor to log who made a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

/// Check the `Authorization: Bearer <token>` header.
///
/// A missing header, or one in another format, is 401. A token that does not
/// verify (bad signature, expired, garbage) is 403.
pub fn authenticate(headers: &HeaderMap, jwt: &JwtConfig) -> Result<AuthUser, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;

    let claims = verify_token(token, jwt)
        .map_err(|_| AppError::Core(CoreError::Forbidden("Invalid token".into())))?;

    Ok(AuthUser {
        username: claims.username,
    })
}

/// Middleware run in front of every protected route, before the handler's
/// extractors read the request body.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate(req.headers(), &state.config.jwt) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(path = %req.uri().path(), error = %err, "Rejected by auth gate");
            err.into_response()
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        authenticate(&parts.headers, &state.config.jwt)
    }
}
