use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{Repository, ShortCode, Shortener, ShortenerError};
use tinylink_generator::Generator;
use tracing::{debug, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// The code for a URL is derived from the URL alone, so shortening the same
/// URL twice yields the same code. When two different URLs derive the same
/// code the later one wins: it replaces the earlier association and the
/// collision is logged.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        let code: ShortCode = self.generator.generate(original_url)?.into();

        let replaced = self
            .repository
            .insert(&code, original_url.to_owned())
            .await?;

        match replaced {
            Some(previous) if previous != original_url => {
                warn!(
                    code = %code,
                    previous = %previous,
                    url = %original_url,
                    "short code collision, replacing previous url"
                );
            }
            Some(_) => debug!(code = %code, "url was already shortened"),
            None => debug!(code = %code, url = %original_url, "shortened url"),
        }

        Ok(code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>, ShortenerError> {
        let url = self.repository.get(code).await?;
        trace!(code = %code, found = url.is_some(), "resolved short code");
        Ok(url)
    }

    async fn flush(&self) -> Result<(), ShortenerError> {
        Ok(self.repository.flush().await?)
    }
}
