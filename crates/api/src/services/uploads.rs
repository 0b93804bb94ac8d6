//! Upload Handler: persist validated icon files and attach them to a category.
//!
//! Files are written to disk before the document is touched. Any failure
//! after that point removes the files written for the request, so a
//! rejected upload leaves no orphans behind (short of a crash mid-request).

use std::path::PathBuf;

use iconlib_core::error::CoreError;
use iconlib_core::upload::{generate_file_name, icon_url};

use super::icons::{remove_file_quietly, IconLibraryService};
use crate::error::{AppError, AppResult};

/// An icon file read from the request and already validated.
#[derive(Debug, Clone)]
pub struct IncomingIcon {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An icon file written to the icons directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIcon {
    /// Generated name on disk (and the last segment of its URL).
    pub file_name: String,
    pub original_name: String,
    pub size: u64,
    pub path: PathBuf,
}

/// Where public icon URLs point: `<scheme>://<host>/icons/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicOrigin {
    pub scheme: String,
    pub host: String,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Category name after lowercasing.
    pub category: String,
    pub icon_urls: Vec<String>,
    pub files: Vec<StoredIcon>,
}

impl IconLibraryService {
    /// Write `icons` to disk and append their URLs to `category`.
    ///
    /// The category name is lowercased before lookup. A missing document or
    /// category is a 404, a deleted category a 400, and an update that
    /// modifies nothing a 500; every failure removes the written files.
    pub async fn upload_icons(
        &self,
        category: &str,
        origin: &PublicOrigin,
        icons: Vec<IncomingIcon>,
    ) -> AppResult<UploadOutcome> {
        if icons.is_empty() {
            return Err(AppError::BadRequest("No files uploaded".into()));
        }

        let category = category.to_lowercase();
        let stored = self.write_files(icons).await?;

        match self.attach(&category, origin, &stored).await {
            Ok(icon_urls) => Ok(UploadOutcome {
                category,
                icon_urls,
                files: stored,
            }),
            Err(err) => {
                discard(&stored).await;
                Err(err)
            }
        }
    }

    async fn write_files(&self, icons: Vec<IncomingIcon>) -> AppResult<Vec<StoredIcon>> {
        let mut stored = Vec::with_capacity(icons.len());

        for icon in icons {
            let file_name = generate_file_name(&icon.original_name);
            let path = self.icons_dir().join(&file_name);

            if let Err(e) = tokio::fs::write(&path, &icon.bytes).await {
                discard(&stored).await;
                return Err(AppError::InternalError(format!(
                    "Failed to write icon file {}: {e}",
                    path.display()
                )));
            }

            tracing::debug!(
                file_name = %file_name,
                original_name = %icon.original_name,
                content_type = %icon.content_type,
                size = icon.bytes.len(),
                "Stored icon file"
            );

            stored.push(StoredIcon {
                file_name,
                original_name: icon.original_name,
                size: icon.bytes.len() as u64,
                path,
            });
        }

        Ok(stored)
    }

    async fn attach(
        &self,
        category: &str,
        origin: &PublicOrigin,
        stored: &[StoredIcon],
    ) -> AppResult<Vec<String>> {
        let library = self.load_library().await?;

        let Some(current) = library.category(category) else {
            return Err(CoreError::NotFound(format!("Category '{category}' not found")).into());
        };
        if current.deleted {
            return Err(CoreError::InvalidState(format!(
                "Category '{category}' is deleted and cannot accept new icons"
            ))
            .into());
        }

        let icon_urls: Vec<String> = stored
            .iter()
            .map(|icon| icon_url(&origin.scheme, &origin.host, &icon.file_name))
            .collect();

        let modified = self.store().append_icons(category, &icon_urls).await?;
        if modified == 0 {
            return Err(CoreError::Internal("Failed to update database".into()).into());
        }

        Ok(icon_urls)
    }
}

async fn discard(stored: &[StoredIcon]) {
    for icon in stored {
        remove_file_quietly(&icon.path).await;
    }
}
