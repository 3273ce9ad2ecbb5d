pub mod hash;

pub use hash::{generate, HashGenerator};

use tinylink_core::{GenerateError, ShortCode};

/// Trait for generating short codes.
///
/// Implementations are pure functions of the URL being shortened and never
/// interact with storage. Two different URLs may map to the same code; how
/// that is handled is up to the caller.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Derives a short code for `original_url`.
    fn generate(&self, original_url: &str) -> Result<Self::Output, GenerateError>;
}
