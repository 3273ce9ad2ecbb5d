use std::sync::Arc;

use tinylink_shortener::Shortener;

/// Shared by every handler. Cloning only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
}

impl AppState {
    pub fn new<S: Shortener>(shortener: S) -> Self {
        Self::from_shared(Arc::new(shortener))
    }

    pub fn from_shared(shortener: Arc<dyn Shortener>) -> Self {
        Self { shortener }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }
}
