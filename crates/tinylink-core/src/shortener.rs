use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens the given URL and returns the short code it is stored under.
    async fn shorten(&self, original_url: &str) -> Result<ShortCode>;

    /// Resolves a short code to the URL stored under it.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Writes any pending changes to durable storage.
    async fn flush(&self) -> Result<()>;
}
