mod url;

pub use url::{HealthResponse, ShortenForm};
