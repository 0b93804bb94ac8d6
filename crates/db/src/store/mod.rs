//! Storage seam for the icons document and user credentials.
//!
//! Handlers never talk to a database directly; they receive an
//! `Arc<dyn IconStore>` and an `Arc<dyn CredentialStore>` built once at
//! startup.
//!
//! - [`postgres::PgStore`] -- PostgreSQL, one JSONB document per library.
//! - [`memory::MemoryStore`] -- process-local, for tests and local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use iconlib_core::types::{Category, IconLibrary, UserCredential};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed icons document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Access to the single icons document of a library.
///
/// Every mutation is a targeted update of one category that reports how many
/// documents it modified (0 or 1). Mutations do not re-check the
/// preconditions a caller verified with an earlier [`IconStore::load`]:
/// a caller that loads, checks, then writes runs two independent operations
/// with no transaction or version check in between. Concurrent writers can
/// therefore overwrite each other (lost update), e.g. two `put_category`
/// calls for the same name, or an `append_icons` landing in a category that
/// was marked deleted after the caller's check.
#[async_trait]
pub trait IconStore: Send + Sync + 'static {
    /// Fetch the whole document, or `None` if it was never created.
    async fn load(&self) -> StoreResult<Option<IconLibrary>>;

    /// Create an empty document if none exists.
    ///
    /// Returns `true` if a document was created.
    async fn create_library(&self) -> StoreResult<bool>;

    /// Set `icons.<name>` to `category`, replacing any existing value.
    async fn put_category(&self, name: &str, category: &Category) -> StoreResult<u64>;

    /// Set `icons.<name>.deleted = true`. Modifies nothing if the category
    /// does not exist.
    async fn mark_deleted(&self, name: &str) -> StoreResult<u64>;

    /// Append `urls` to `icons.<name>.data` in one update. Modifies nothing
    /// if the category does not exist or `urls` is empty.
    async fn append_icons(&self, name: &str, urls: &[String]) -> StoreResult<u64>;

    /// Remove the first occurrence of `url` from `icons.<name>.data`.
    /// Modifies nothing if the URL is not present.
    async fn remove_icon(&self, name: &str, url: &str) -> StoreResult<u64>;
}

/// Lookup of login credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find the credential whose username and password both match exactly.
    async fn find_credential(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<UserCredential>>;

    /// Insert a credential, replacing the password if the username exists.
    async fn upsert_credential(&self, username: &str, password: &str) -> StoreResult<()>;
}
