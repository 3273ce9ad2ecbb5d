use serde::{Deserialize, Serialize};

/// Form body of a shorten request.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    /// A missing field is treated like an empty one.
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
