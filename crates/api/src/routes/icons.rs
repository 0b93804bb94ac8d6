//! Route definitions for icon categories and uploads.

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{icons, uploads};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Routes behind the auth gate.
///
/// ```text
/// POST  /add-icon-category                 -> add_category
/// GET   /icon-categories                   -> list_categories
/// GET   /icon-category/{name}              -> get_category
/// PATCH /delete-icon-category              -> delete_category
/// POST  /icon-category/{name}/upload       -> upload_icons (multipart)
/// PATCH /icon-category/{name}/delete-icon  -> delete_icon
/// ```
pub fn protected(state: &AppState) -> Router<AppState> {
    let upload_limit = DefaultBodyLimit::max(state.config.upload.max_request_bytes);

    Router::new()
        .route("/add-icon-category", post(icons::add_category))
        .route("/icon-categories", get(icons::list_categories))
        .route("/icon-category/{name}", get(icons::get_category))
        .route("/delete-icon-category", patch(icons::delete_category))
        .route(
            "/icon-category/{name}/upload",
            post(uploads::upload_icons).layer(upload_limit),
        )
        .route("/icon-category/{name}/delete-icon", patch(icons::delete_icon))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}

/// Unauthenticated listing, mounted only when the showcase is enabled.
///
/// ```text
/// GET /public/icon-categories  -> public_showcase
/// ```
pub fn showcase() -> Router<AppState> {
    Router::new().route("/public/icon-categories", get(icons::public_showcase))
}
