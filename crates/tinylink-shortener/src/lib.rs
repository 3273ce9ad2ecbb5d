//! URL shortener service implementation.
//!
//! This crate ties the code generator to a repository. Core types are
//! re-exported from `tinylink_core`.

pub mod service;

pub use service::ShortenerService;
pub use tinylink_core::{ShortCode, Shortener, ShortenerError};
