//! Multipart icon upload.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use iconlib_core::upload::{check_content_type, check_size, is_icon_field, UploadRejection};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{UploadData, UploadResponse, UploadedFile};
use crate::services::uploads::{IncomingIcon, PublicOrigin};
use crate::state::AppState;

/// POST /icon-category/{name}/upload
///
/// Accepts image files on the `icons` field (also `icons[]`). Every part is
/// validated before anything is written; one bad part rejects the request.
pub async fn upload_icons(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let icons = read_icons(multipart, state.config.upload.max_file_bytes).await?;

    let origin = PublicOrigin {
        scheme: state.config.public_scheme.clone(),
        host: headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}:{}", state.config.host, state.config.port)),
    };

    let outcome = state
        .library
        .upload_icons(&name, &origin, icons)
        .await
        .map_err(|e| e.during("Server error during file upload"))?;

    tracing::info!(
        category = %outcome.category,
        count = outcome.icon_urls.len(),
        user = %user.username,
        "Icons uploaded"
    );

    let message = format!("{} icon(s) uploaded successfully", outcome.icon_urls.len());
    let files = outcome
        .files
        .into_iter()
        .map(|f| UploadedFile {
            file_name: f.file_name,
            original_name: f.original_name,
            file_size: f.size,
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            message,
            data: UploadData {
                category: outcome.category,
                icon_urls: outcome.icon_urls,
                files,
            },
        }),
    ))
}

/// Drain the multipart body into validated icons.
///
/// Parts without a filename are plain form fields and are skipped. File parts
/// on any field other than `icons` are rejected.
async fn read_icons(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> AppResult<Vec<IncomingIcon>> {
    let mut icons = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let field_name = field.name().unwrap_or_default().to_string();
        if !is_icon_field(&field_name) {
            return Err(UploadRejection::UnexpectedField { field: field_name }.into());
        }

        let content_type = field.content_type().map(str::to_string);
        if let Err(rejection) = check_content_type(content_type.as_deref()) {
            tracing::debug!(?content_type, "Rejected non-image upload");
            return Err(rejection.into());
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            check_size(bytes.len() + chunk.len(), max_file_bytes)?;
            bytes.extend_from_slice(&chunk);
        }

        icons.push(IncomingIcon {
            original_name,
            content_type: content_type.unwrap_or_default(),
            bytes,
        });
    }

    Ok(icons)
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}
