use async_trait::async_trait;
use tinylink_core::error::Result;
use tinylink_core::repository::{ReadRepository, Repository};
use tinylink_core::{ShortCode, StorageError};

use crate::store::Store;

/// Runs a store operation on the blocking pool.
///
/// Waiting for the store lock, and in every-insert mode the file write done
/// under it, must not stall the async workers serving other requests.
async fn blocking<T, F>(store: &Store, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(Store) -> Result<T> + Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || f(store))
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
}

#[async_trait]
impl ReadRepository for Store {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let code = code.clone();
        blocking(self, move |store| Ok(store.lookup(code.as_str()))).await
    }
}

#[async_trait]
impl Repository for Store {
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<Option<String>> {
        let code = code.clone();
        blocking(self, move |store| store.insert(code, original_url)).await
    }

    async fn flush(&self) -> Result<()> {
        blocking(self, |store| store.flush()).await
    }
}
