//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the types shared by the generator, the storage
//! engine, the shortener service and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{GenerateError, ShortenerError, StorageError};
pub use repository::{Entry, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
