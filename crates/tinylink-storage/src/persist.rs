//! On-disk representation of a [`MappingTable`].
//!
//! The file is JSON Lines: one `{"code": ..., "url": ...}` object per line,
//! in table order. JSON string escaping lets any code or URL round-trip,
//! including ones that contain newlines or quotes.
//!
//! Saving always rewrites the whole file. Records go to a sibling temporary
//! file which is synced and then renamed over the target, so readers see
//! either the old table or the new one, never a torn write.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tinylink_core::error::Result;
use tinylink_core::{Entry, StorageError};
use tracing::debug;

use crate::table::MappingTable;

#[derive(Serialize)]
struct RecordRef<'a> {
    code: &'a str,
    url: &'a str,
}

#[derive(Deserialize)]
struct Record {
    code: String,
    url: String,
}

/// Reads the table stored at `path`.
///
/// A missing file is not an error: it yields an empty table. Blank lines are
/// skipped, and a later record for a code overrides an earlier one.
pub fn load(path: &Path) -> Result<MappingTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "table file does not exist, starting empty");
            return Ok(MappingTable::new());
        }
        Err(source) => {
            return Err(StorageError::PersistenceRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut table = MappingTable::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => StorageError::Corrupted {
                path: path.to_path_buf(),
                line: line_no,
                reason: source.to_string(),
            },
            _ => StorageError::PersistenceRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let record: Record =
            serde_json::from_str(&line).map_err(|e| StorageError::Corrupted {
                path: path.to_path_buf(),
                line: line_no,
                reason: e.to_string(),
            })?;
        table.insert(record.code, record.url);
    }

    debug!(path = %path.display(), entries = table.len(), "loaded table");
    Ok(table)
}

/// Replaces the contents of `path` with `entries`.
///
/// On failure the previous file is left untouched and the temporary file is
/// removed.
pub fn save<'a, I>(path: &Path, entries: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let tmp = temp_path(path);

    let written = write_records(&tmp, entries).and_then(|count| {
        fs::rename(&tmp, path)?;
        sync_parent(path)?;
        Ok(count)
    });

    match written {
        Ok(count) => {
            debug!(path = %path.display(), entries = count, "saved table");
            Ok(())
        }
        Err(source) => {
            let _ = fs::remove_file(&tmp);
            Err(StorageError::PersistenceWrite {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn write_records<'a, I>(tmp: &Path, entries: I) -> io::Result<usize>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut writer = BufWriter::new(File::create(tmp)?);
    let mut count = 0;

    for entry in entries {
        let record = RecordRef {
            code: entry.code.as_str(),
            url: &entry.original_url,
        };
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        count += 1;
    }

    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;
    Ok(count)
}

/// Makes the rename of `path` durable by syncing the directory entry.
#[cfg(unix)]
fn sync_parent(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

// Directories cannot be opened as files on other platforms.
#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Moves an unreadable table file out of the way so that the next save does
/// not overwrite it. Returns where the file went.
///
/// The target is `<name>.corrupt-<unix seconds>`. If that name is taken, a
/// counter is appended (`-1`, `-2`, ...) so earlier quarantined files are
/// never replaced.
pub fn quarantine(path: &Path) -> io::Result<PathBuf> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    let base = format!("{}.corrupt-{}", file_name, Timestamp::now().as_second());

    let mut target = path.with_file_name(&base);
    let mut attempt = 0_u32;
    while target.try_exists()? {
        attempt += 1;
        target = path.with_file_name(format!("{base}-{attempt}"));
    }

    fs::rename(path, &target)?;
    Ok(target)
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}
