//! Icon Store Accessor: category and icon operations over the icons document.
//!
//! Every operation that checks the document and then writes to it issues two
//! independent store calls (see [`IconStore`] for the lost-update race this
//! allows). Nothing here serializes concurrent requests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use iconlib_core::error::CoreError;
use iconlib_core::library::visible_categories;
use iconlib_core::types::{Category, IconLibrary};
use iconlib_core::upload::file_name_from_url;
use iconlib_db::IconStore;

use crate::error::{AppError, AppResult};

/// Category and icon operations bound to one store and one icons directory.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct IconLibraryService {
    store: Arc<dyn IconStore>,
    icons_dir: Arc<PathBuf>,
}

impl IconLibraryService {
    pub fn new(store: Arc<dyn IconStore>, icons_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            icons_dir: Arc::new(icons_dir.into()),
        }
    }

    pub fn store(&self) -> &dyn IconStore {
        self.store.as_ref()
    }

    /// Directory uploaded icons live in.
    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }

    /// Load the document or fail with 404.
    pub(crate) async fn load_library(&self) -> AppResult<IconLibrary> {
        self.store
            .load()
            .await?
            .ok_or_else(|| CoreError::NotFound("Icons document not found".into()).into())
    }

    /// Live categories keyed by capitalized name, mapped to their icon URLs.
    pub async fn list_categories(&self) -> AppResult<BTreeMap<String, Vec<String>>> {
        let library = self.load_library().await?;
        Ok(visible_categories(&library))
    }

    /// Exact, case-sensitive lookup. Deleted categories are returned too.
    pub async fn get_category(&self, name: &str) -> AppResult<Category> {
        let library = self.store.load().await?;
        library
            .and_then(|mut l| l.icons.remove(name))
            .ok_or_else(|| CoreError::NotFound("Category not found".into()).into())
    }

    /// Insert `{deleted: false, data: []}` under `name`.
    ///
    /// Fails if the name exists, deleted or not, or if the document has not
    /// been created.
    pub async fn add_category(&self, name: &str) -> AppResult<()> {
        let library = self.load_library().await?;
        if library.icons.contains_key(name) {
            return Err(CoreError::Conflict("Category already exists".into()).into());
        }

        self.store.put_category(name, &Category::empty()).await?;
        Ok(())
    }

    /// Flag `name` as deleted. Succeeds again on an already deleted category.
    pub async fn delete_category(&self, name: &str) -> AppResult<()> {
        let library = self.load_library().await?;
        if !library.icons.contains_key(name) {
            return Err(CoreError::NotFound("Category not found".into()).into());
        }

        self.store.mark_deleted(name).await?;
        Ok(())
    }

    /// Remove one occurrence of `url` from `category`, then delete the file
    /// it points at. The category's deleted flag is not checked.
    pub async fn delete_icon(&self, category: &str, url: &str) -> AppResult<()> {
        let library = self.load_library().await?;
        let Some(current) = library.category(category) else {
            return Err(CoreError::NotFound(format!("Category '{category}' not found")).into());
        };
        if !current.contains(url) {
            return Err(CoreError::NotFound("Icon not found in this category".into()).into());
        }

        let modified = self.store.remove_icon(category, url).await?;
        if modified == 0 {
            return Err(CoreError::Internal("Failed to delete icon from database".into()).into());
        }

        if let Some(file_name) = file_name_from_url(url) {
            remove_file_quietly(&self.icons_dir.join(file_name)).await;
        }
        Ok(())
    }
}

/// Delete `path`, treating a missing file as success. Other failures are
/// logged and swallowed.
pub(crate) async fn remove_file_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed icon file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove icon file"),
    }
}
