//! Handlers for login and the cookie-based auth check.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use super::required;
use crate::auth::jwt::verify_token;
use crate::auth::login::login as authenticate;
use crate::error::{AppError, AppResult};
use crate::response::LoginResponse;
use crate::state::AppState;

/// Name of the cookie `GET /check-auth` reads the token from.
pub const AUTH_COOKIE: &str = "authToken";

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /login
///
/// Exchange a username and password for a token valid for one day.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let missing = "Username and password are required";
    let username = required(input.username, missing)?;
    let password = required(input.password, missing)?;

    let token = authenticate(
        state.credentials.as_ref(),
        &state.config.jwt,
        &username,
        &password,
    )
    .await?;

    tracing::info!(user = %username, "Login successful");

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    }))
}

/// GET /check-auth
///
/// Verify the token in the `authToken` cookie and echo its claims.
pub async fn check_auth(State(state): State<AppState>, jar: CookieJar) -> Response {
    let claims = jar
        .get(AUTH_COOKIE)
        .and_then(|cookie| verify_token(cookie.value(), &state.config.jwt).ok());

    match claims {
        Some(user) => Json(json!({ "authenticated": true, "user": user })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false })),
        )
            .into_response(),
    }
}
