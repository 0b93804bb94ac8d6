//! Route definitions for authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Public authentication routes.
///
/// ```text
/// POST /login       -> login
/// GET  /check-auth  -> check_auth (token from the authToken cookie)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/check-auth", get(auth::check_auth))
}
