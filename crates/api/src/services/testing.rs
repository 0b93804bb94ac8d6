//! Store doubles shared by the service tests.

use async_trait::async_trait;
use iconlib_core::types::{Category, IconLibrary};
use iconlib_db::store::StoreResult;
use iconlib_db::{IconStore, MemoryStore, StoreError};

/// How [`FaultyStore`] answers the writes that follow a successful load.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WriteFault {
    /// The update matches no document.
    NothingModified,
    /// The backend fails outright.
    Broken,
}

/// Reads from a real [`MemoryStore`]; `append_icons` and `remove_icon`
/// fail as configured without touching it.
pub(crate) struct FaultyStore {
    pub inner: MemoryStore,
    pub fault: WriteFault,
}

impl FaultyStore {
    fn fail(&self) -> StoreResult<u64> {
        match self.fault {
            WriteFault::NothingModified => Ok(0),
            WriteFault::Broken => Err(StoreError::Document(
                serde_json::from_str::<u64>("{").unwrap_err(),
            )),
        }
    }
}

#[async_trait]
impl IconStore for FaultyStore {
    async fn load(&self) -> StoreResult<Option<IconLibrary>> {
        self.inner.load().await
    }

    async fn create_library(&self) -> StoreResult<bool> {
        self.inner.create_library().await
    }

    async fn put_category(&self, name: &str, category: &Category) -> StoreResult<u64> {
        self.inner.put_category(name, category).await
    }

    async fn mark_deleted(&self, name: &str) -> StoreResult<u64> {
        self.inner.mark_deleted(name).await
    }

    async fn append_icons(&self, _name: &str, _urls: &[String]) -> StoreResult<u64> {
        self.fail()
    }

    async fn remove_icon(&self, _name: &str, _url: &str) -> StoreResult<u64> {
        self.fail()
    }
}
