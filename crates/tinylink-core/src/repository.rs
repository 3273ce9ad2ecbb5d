use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// One stored association between a short code and the URL it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub code: ShortCode,
    pub original_url: String,
}

impl Entry {
    pub fn new(code: impl Into<ShortCode>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing the redirect path to hold read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the original URL for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.get(code).await?.is_some())
    }
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores `original_url` under `code`, replacing whatever was there.
    ///
    /// Returns the URL that was replaced, if the code was already taken.
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<Option<String>>;

    /// Writes any pending changes to durable storage.
    async fn flush(&self) -> Result<()>;
}
