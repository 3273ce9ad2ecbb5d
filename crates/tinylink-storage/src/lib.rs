//! File-backed storage engine for tinylink.
//!
//! [`MappingTable`] holds the code to URL associations in memory,
//! [`persist`] reads and writes them as a JSON Lines file, and [`Store`]
//! serializes every access to the table behind a single lock.

pub mod flusher;
pub mod persist;
pub mod repository;
pub mod store;
pub mod table;

pub use flusher::Flusher;
pub use store::{FlushPolicy, LockedTable, Store, StoreOptions};
pub use table::MappingTable;
pub use tinylink_core::repository::{ReadRepository, Repository};
pub use tinylink_core::{Entry, StorageError};
