//! Response envelope types for API handlers.
//!
//! Mutations and lookups answer with a `{ "success": true, ... }` envelope;
//! the category listings answer with `{ "status": ..., "data": ... }`.

use std::collections::BTreeMap;

use iconlib_core::types::Category;
use serde::Serialize;

/// `{ "success": true, "message": ... }`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{ "status": S, "data": T }`, used by the listing endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse<S: Serialize, T: Serialize> {
    pub status: S,
    pub data: T,
}

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Body of `GET /icon-category/{name}`: the category keyed by the requested name.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: BTreeMap<String, Category>,
}

/// Body of a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: UploadData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadData {
    pub category: String,
    pub icon_urls: Vec<String>,
    pub files: Vec<UploadedFile>,
}

/// Per-file metadata returned after an upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    pub original_name: String,
    pub file_size: u64,
}
