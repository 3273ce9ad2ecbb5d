//! Command-line client for a tinylink gateway.
//!
//! [`TinylinkClient`] wraps the HTTP routes, [`short_code_from`] turns
//! whatever the user pasted into a short code, and [`interactive::run`]
//! drives the numbered menu.

pub mod browser;
pub mod client;
pub mod code;
pub mod interactive;

pub use client::{TinylinkClient, DEFAULT_SERVER};
pub use code::short_code_from;
