use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tinylink_core::error::Result;
use tinylink_core::{Entry, ShortCode, StorageError};
use tracing::{debug, error, info, warn};
use typed_builder::TypedBuilder;

use crate::persist;
use crate::table::MappingTable;

/// When the table is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Rewrite the file after every insert, before the lock is released.
    #[default]
    EveryInsert,
    /// Only mark the table dirty on insert. A [`Flusher`][crate::Flusher]
    /// writes a snapshot every `interval`, outside the lock.
    Periodic { interval: Duration },
}

/// Options for opening a file-backed [`Store`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreOptions {
    /// Location of the table file.
    #[builder(setter(into))]
    pub path: PathBuf,
    #[builder(default)]
    pub flush_policy: FlushPolicy,
}

#[derive(Debug)]
struct State {
    table: MappingTable,
    /// Inserts applied since the store was opened.
    revision: u64,
    /// Revision last written to disk.
    persisted_revision: u64,
}

impl State {
    fn is_dirty(&self) -> bool {
        self.revision != self.persisted_revision
    }
}

/// The table as seen from inside [`Store::with_lock`].
///
/// Inserting is the only way to change the table, and the store counts every
/// insert, so it always knows whether the file is behind memory.
#[derive(Debug)]
pub struct LockedTable<'a> {
    state: &'a mut State,
}

impl LockedTable<'_> {
    /// Stores `original_url` under `code` and returns the URL it replaced.
    pub fn insert(
        &mut self,
        code: impl Into<ShortCode>,
        original_url: impl Into<String>,
    ) -> Option<String> {
        self.state.revision += 1;
        self.state.table.insert(code, original_url)
    }

    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.state.table.lookup(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.state.table.contains(code)
    }

    pub fn len(&self) -> usize {
        self.state.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.table.is_empty()
    }

    /// Iterates over all entries in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.state.table.iter()
    }
}

#[derive(Debug)]
struct Inner {
    path: Option<PathBuf>,
    flush_policy: FlushPolicy,
    state: Mutex<State>,
    /// Orders snapshot writes in periodic mode.
    writer: Mutex<()>,
}

/// Owns the mapping table and serializes every access to it.
///
/// There is exactly one lock. Lookups and inserts both take it, so two
/// concurrent lookups also run one after the other. In
/// [`FlushPolicy::EveryInsert`] mode the file is rewritten while the lock
/// is still held, which guarantees the file always reflects a complete
/// table state.
///
/// `Store` is a cheap handle; clones share the same table.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Creates a store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::from_parts(None, FlushPolicy::EveryInsert, MappingTable::new())
    }

    /// Opens the table file described by `options`.
    ///
    /// A missing file starts an empty table. An unreadable or malformed
    /// file is logged, moved aside to `<name>.corrupt-<unix seconds>` and
    /// replaced by an empty table, so a bad file never keeps the service
    /// from starting.
    pub fn open(options: StoreOptions) -> Result<Self> {
        let StoreOptions { path, flush_policy } = options;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::PersistenceWrite {
                path: path.clone(),
                source,
            })?;
        }

        let table = match persist::load(&path) {
            Ok(table) => table,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load table, starting empty");
                match persist::quarantine(&path) {
                    Ok(moved) => {
                        warn!(from = %path.display(), to = %moved.display(), "moved unreadable table aside")
                    }
                    Err(e) => {
                        error!(path = %path.display(), error = %e, "failed to move unreadable table aside")
                    }
                }
                MappingTable::new()
            }
        };

        info!(
            path = %path.display(),
            entries = table.len(),
            flush_policy = ?flush_policy,
            "opened store"
        );

        Ok(Self::from_parts(Some(path), flush_policy, table))
    }

    fn from_parts(path: Option<PathBuf>, flush_policy: FlushPolicy, table: MappingTable) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                flush_policy,
                state: Mutex::new(State {
                    table,
                    revision: 0,
                    persisted_revision: 0,
                }),
                writer: Mutex::new(()),
            }),
        }
    }

    /// Runs `f` against the table while holding the store lock.
    ///
    /// If `f` inserted anything and the policy is
    /// [`FlushPolicy::EveryInsert`], the table is saved before the lock is
    /// released. A failed save is returned as an error but leaves the
    /// in-memory table as `f` left it; the next successful save writes it
    /// out. The lock is released on every exit path, including a panic in
    /// `f`.
    pub fn with_lock<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut LockedTable<'_>) -> T,
    {
        let mut state = self.inner.state.lock();
        let before = state.revision;

        let value = f(&mut LockedTable { state: &mut *state });

        if state.revision != before && self.inner.flush_policy == FlushPolicy::EveryInsert {
            self.persist_locked(&mut state)?;
        }

        Ok(value)
    }

    /// Stores `original_url` under `code`, overwriting any previous value.
    ///
    /// Returns the URL that was replaced, if any.
    pub fn insert(&self, code: ShortCode, original_url: String) -> Result<Option<String>> {
        self.with_lock(|table| table.insert(code, original_url))
    }

    /// Returns the URL stored under `code`, or `None` on a miss.
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.inner.state.lock().table.lookup(code).map(str::to_owned)
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every entry out of the table, in table order.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.inner.state.lock().table.iter().cloned().collect()
    }

    /// Whether the table holds inserts that are not on disk yet.
    pub fn is_dirty(&self) -> bool {
        self.inner.path.is_some() && self.inner.state.lock().is_dirty()
    }

    /// Writes the table to disk if it changed since the last save.
    ///
    /// In every-insert mode the write happens under the store lock. In
    /// periodic mode a snapshot is taken under the lock and written after
    /// releasing it, so lookups and inserts are not held up by disk I/O.
    pub fn flush(&self) -> Result<()> {
        if self.inner.path.is_none() {
            return Ok(());
        }

        match self.inner.flush_policy {
            FlushPolicy::EveryInsert => {
                let mut state = self.inner.state.lock();
                self.persist_locked(&mut state)
            }
            FlushPolicy::Periodic { .. } => self.persist_snapshot(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    pub fn flush_policy(&self) -> FlushPolicy {
        self.inner.flush_policy
    }

    fn persist_locked(&self, state: &mut State) -> Result<()> {
        let Some(path) = self.inner.path.as_deref() else {
            return Ok(());
        };
        if !state.is_dirty() {
            return Ok(());
        }

        persist::save(path, &state.table)?;
        state.persisted_revision = state.revision;
        Ok(())
    }

    fn persist_snapshot(&self) -> Result<()> {
        let Some(path) = self.inner.path.as_deref() else {
            return Ok(());
        };
        let _writer = self.inner.writer.lock();

        let (entries, revision) = {
            let state = self.inner.state.lock();
            if !state.is_dirty() {
                return Ok(());
            }
            let entries: Vec<Entry> = state.table.iter().cloned().collect();
            (entries, state.revision)
        };

        persist::save(path, &entries)?;

        let mut state = self.inner.state.lock();
        if revision > state.persisted_revision {
            state.persisted_revision = revision;
        }
        debug!(revision, entries = entries.len(), "flushed snapshot");
        Ok(())
    }
}
