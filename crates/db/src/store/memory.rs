//! Process-local backend.
//!
//! Holds the document and the credential list behind tokio locks. Each
//! trait call takes the lock once, so it gives the same per-call atomicity
//! as the PostgreSQL backend and nothing more. All data is lost when the
//! process exits.

use std::sync::Arc;

use async_trait::async_trait;
use iconlib_core::types::{Category, IconLibrary, UserCredential};
use tokio::sync::RwLock;

use super::{CredentialStore, IconStore, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    library: RwLock<Option<IconLibrary>>,
    users: RwLock<Vec<UserCredential>>,
}

/// In-memory [`IconStore`] and [`CredentialStore`].
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// A store with no document and no users.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose document already exists with the given contents.
    pub fn with_library(library: IconLibrary) -> Self {
        Self {
            inner: Arc::new(Inner {
                library: RwLock::new(Some(library)),
                users: RwLock::default(),
            }),
        }
    }

    /// Copy of the current document, if any.
    pub async fn snapshot(&self) -> Option<IconLibrary> {
        self.inner.library.read().await.clone()
    }
}

#[async_trait]
impl IconStore for MemoryStore {
    async fn load(&self) -> StoreResult<Option<IconLibrary>> {
        Ok(self.snapshot().await)
    }

    async fn create_library(&self) -> StoreResult<bool> {
        let mut library = self.inner.library.write().await;
        if library.is_some() {
            return Ok(false);
        }
        *library = Some(IconLibrary::default());
        Ok(true)
    }

    async fn put_category(&self, name: &str, category: &Category) -> StoreResult<u64> {
        let mut library = self.inner.library.write().await;
        let Some(library) = library.as_mut() else {
            return Ok(0);
        };
        library.icons.insert(name.to_string(), category.clone());
        Ok(1)
    }

    async fn mark_deleted(&self, name: &str) -> StoreResult<u64> {
        let mut library = self.inner.library.write().await;
        match library.as_mut().and_then(|l| l.icons.get_mut(name)) {
            Some(category) => {
                category.deleted = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn append_icons(&self, name: &str, urls: &[String]) -> StoreResult<u64> {
        if urls.is_empty() {
            return Ok(0);
        }
        let mut library = self.inner.library.write().await;
        match library.as_mut().and_then(|l| l.icons.get_mut(name)) {
            Some(category) => {
                category.data.extend_from_slice(urls);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_icon(&self, name: &str, url: &str) -> StoreResult<u64> {
        let mut library = self.inner.library.write().await;
        let Some(category) = library.as_mut().and_then(|l| l.icons.get_mut(name)) else {
            return Ok(0);
        };
        match category.data.iter().position(|u| u == url) {
            Some(idx) => {
                category.data.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_credential(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<UserCredential>> {
        let users = self.inner.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    async fn upsert_credential(&self, username: &str, password: &str) -> StoreResult<()> {
        let mut users = self.inner.users.write().await;
        if let Some(existing) = users.iter_mut().find(|u| u.username == username) {
            existing.password = password.to_string();
            return Ok(());
        }
        let id = users.len() as i64 + 1;
        users.push(UserCredential {
            id,
            username: username.to_string(),
            password: password.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn mutations_without_document_modify_nothing() {
        let store = MemoryStore::new();

        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(
            store.put_category("food", &Category::empty()).await.unwrap(),
            0
        );
        assert_eq!(store.mark_deleted("food").await.unwrap(), 0);
        assert_eq!(store.append_icons("food", &urls(&["a"])).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_library_is_one_shot() {
        let store = MemoryStore::new();
        assert!(store.create_library().await.unwrap());
        assert!(!store.create_library().await.unwrap());
        assert_eq!(store.load().await.unwrap(), Some(IconLibrary::default()));
    }

    #[tokio::test]
    async fn append_keeps_order() {
        let store = MemoryStore::with_library(IconLibrary::default());
        store.put_category("food", &Category::empty()).await.unwrap();

        store.append_icons("food", &urls(&["a", "b"])).await.unwrap();
        store.append_icons("food", &urls(&["c"])).await.unwrap();

        let lib = store.snapshot().await.unwrap();
        assert_eq!(lib.icons["food"].data, urls(&["a", "b", "c"]));
    }

    #[tokio::test]
    async fn append_with_no_urls_modifies_nothing() {
        let store = MemoryStore::with_library(IconLibrary::default());
        store.put_category("food", &Category::empty()).await.unwrap();
        assert_eq!(store.append_icons("food", &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn remove_icon_drops_first_occurrence_only() {
        let store = MemoryStore::with_library(IconLibrary::default());
        store.put_category("food", &Category::empty()).await.unwrap();
        store
            .append_icons("food", &urls(&["a", "b", "a"]))
            .await
            .unwrap();

        assert_eq!(store.remove_icon("food", "a").await.unwrap(), 1);
        assert_eq!(
            store.snapshot().await.unwrap().icons["food"].data,
            urls(&["b", "a"])
        );
        assert_eq!(store.remove_icon("food", "zzz").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn credentials_match_both_fields() {
        let store = MemoryStore::new();
        store.upsert_credential("admin", "secret").await.unwrap();

        let found = store.find_credential("admin", "secret").await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("admin".to_string()));
        assert!(store
            .find_credential("admin", "SECRET")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_credential("Admin", "secret")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_password() {
        let store = MemoryStore::new();
        store.upsert_credential("admin", "old").await.unwrap();
        store.upsert_credential("admin", "new").await.unwrap();

        assert!(store.find_credential("admin", "old").await.unwrap().is_none());
        assert!(store.find_credential("admin", "new").await.unwrap().is_some());
    }
}
