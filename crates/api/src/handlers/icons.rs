//! Handlers for icon categories.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use super::required;
use crate::error::{AppError, AppResult, StatusError};
use crate::middleware::auth::AuthUser;
use crate::response::{CategoryResponse, MessageResponse, StatusResponse};
use crate::state::AppState;

/// Request body for adding or deleting a category.
#[derive(Debug, Deserialize)]
pub struct CategoryNameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for removing one icon from a category.
#[derive(Debug, Deserialize)]
pub struct DeleteIconRequest {
    #[serde(default, rename = "iconUrl")]
    pub icon_url: Option<String>,
}

type Listing = BTreeMap<String, Vec<String>>;

/// GET /icon-categories
///
/// Live categories keyed by capitalized name, each mapped to its icon URLs.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse<bool, Listing>>, StatusError> {
    let data = state.library.list_categories().await?;
    Ok(Json(StatusResponse { status: true, data }))
}

/// GET /public/icon-categories
///
/// Same listing as [`list_categories`], without authentication. Only
/// routed when the public showcase is enabled.
pub async fn public_showcase(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse<&'static str, Listing>>, StatusError> {
    let data = state.library.list_categories().await?;
    Ok(Json(StatusResponse {
        status: "success",
        data,
    }))
}

/// GET /icon-category/{name}
///
/// Exact-name lookup; deleted categories are returned with `deleted: true`.
pub async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.library.get_category(&name).await?;
    Ok(Json(CategoryResponse {
        success: true,
        category: BTreeMap::from([(name, category)]),
    }))
}

/// POST /add-icon-category
pub async fn add_category(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CategoryNameRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let name = required(input.name, "Category name is required")?;

    state.library.add_category(&name).await?;
    tracing::info!(category = %name, user = %user.username, "Category added");

    Ok(Json(MessageResponse::ok(format!(
        "Category '{name}' added successfully"
    ))))
}

/// PATCH /delete-icon-category
///
/// Soft delete: the category stays in the document with `deleted: true`.
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CategoryNameRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let name = required(input.name, "Category name is required")?;

    state.library.delete_category(&name).await?;
    tracing::info!(category = %name, user = %user.username, "Category marked as deleted");

    Ok(Json(MessageResponse::ok(format!(
        "Category '{name}' marked as deleted"
    ))))
}

/// PATCH /icon-category/{name}/delete-icon
///
/// The category name is lowercased before lookup, as on upload.
pub async fn delete_icon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    payload: Result<Json<DeleteIconRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let icon_url = required(input.icon_url, "Icon URL is required")?;
    let category = name.to_lowercase();

    state
        .library
        .delete_icon(&category, &icon_url)
        .await
        .map_err(|e| e.during("Server error during icon deletion"))?;
    tracing::info!(category = %category, icon_url = %icon_url, user = %user.username, "Icon deleted");

    Ok(Json(MessageResponse::ok(format!(
        "Icon deleted successfully from category '{category}'"
    ))))
}
