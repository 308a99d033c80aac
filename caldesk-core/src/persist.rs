//! Reading and writing the JSON data file.
//!
//! Loading never fails: a missing, empty, oversized, corrupt or unreadable
//! file yields an empty [`Document`]. Files that cannot be used are renamed
//! aside (`.backup`, `.corrupted`) rather than deleted, and a file that loads
//! with some entries left out is copied to `.corrupted` first. When no such
//! copy can be made, the load is marked read-only so nothing overwrites the
//! only copy.
//!
//! Saving writes the whole document to a `.tmp` sibling and renames it over
//! the data file, so readers only ever see the old or the new contents.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::Value;

use crate::constants::{BACKUP_SUFFIX, CORRUPTED_SUFFIX, TMP_SUFFIX};
use crate::document::Document;
use crate::error::{CalDeskError, CalDeskResult};

/// The outcome of [`load`].
#[derive(Debug)]
pub struct Loaded {
    pub document: Document,
    /// `false` when the file on disk holds data that is neither in `document`
    /// nor preserved elsewhere. Saving to the path would destroy it.
    pub writable: bool,
}

impl Loaded {
    fn fresh() -> Self {
        Loaded {
            document: Document::default(),
            writable: true,
        }
    }
}

/// `calendar_data.json` + `tmp` -> `calendar_data.json.tmp`
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Load the document at `path`, falling back to an empty one on any problem.
pub fn load(path: &Path, max_file_size: u64) -> Loaded {
    match try_load(path, max_file_size) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!(
                "Could not read {}: {}. Starting with an empty document and leaving the file untouched",
                path.display(),
                e
            );
            Loaded {
                document: Document::default(),
                writable: false,
            }
        }
    }
}

fn try_load(path: &Path, max_file_size: u64) -> CalDeskResult<Loaded> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No data file at {}. Starting fresh", path.display());
            return Ok(Loaded::fresh());
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.len() > max_file_size {
        let backup = set_aside(path, BACKUP_SUFFIX)?;
        warn!(
            "Data file is too large ({} bytes, limit {}). Moved it to {} and started fresh",
            metadata.len(),
            max_file_size,
            backup.display()
        );
        return Ok(Loaded::fresh());
    }

    let bytes = fs::read(path)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        info!("Data file {} is empty. Starting fresh", path.display());
        return Ok(Loaded::fresh());
    }

    let parsed = serde_json::from_slice::<Value>(&bytes)
        .map_err(|e| e.to_string())
        .and_then(|value| {
            Document::from_value(value).ok_or_else(|| "top level is not an object".to_string())
        });

    let decoded = match parsed {
        Ok(decoded) => decoded,
        Err(reason) => {
            let corrupted = set_aside(path, CORRUPTED_SUFFIX)?;
            warn!(
                "Data file is not valid ({}). Moved it to {} and started fresh",
                reason,
                corrupted.display()
            );
            return Ok(Loaded::fresh());
        }
    };

    if decoded.dropped == 0 {
        debug!("Loaded data from {}", path.display());
        return Ok(Loaded {
            document: decoded.document,
            writable: true,
        });
    }

    // The next save rewrites the file without the skipped entries.
    let writable = match keep_copy(path, CORRUPTED_SUFFIX) {
        Ok(copy) => {
            warn!(
                "Skipped {} unreadable entries in {}. The original file was copied to {}",
                decoded.dropped,
                path.display(),
                copy.display()
            );
            true
        }
        Err(e) => {
            warn!(
                "Skipped {} unreadable entries in {} and could not copy it aside ({}). It will not be overwritten",
                decoded.dropped,
                path.display(),
                e
            );
            false
        }
    };

    Ok(Loaded {
        document: decoded.document,
        writable,
    })
}

/// Rename `path` to its `suffix` sibling, replacing any earlier copy there.
fn set_aside(path: &Path, suffix: &str) -> CalDeskResult<PathBuf> {
    let target = sibling_path(path, suffix);
    fs::rename(path, &target)?;
    Ok(target)
}

/// Copy `path` to its `suffix` sibling, leaving `path` in place.
fn keep_copy(path: &Path, suffix: &str) -> CalDeskResult<PathBuf> {
    let target = sibling_path(path, suffix);
    fs::copy(path, &target)?;
    Ok(target)
}

/// Create the parent directories of `path` if they are missing.
pub fn ensure_parent_dir(path: &Path) -> CalDeskResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Atomically write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &[u8]) -> CalDeskResult<()> {
    ensure_parent_dir(path)?;
    write_atomic(path, |writer| Ok(writer.write_all(contents)?))
}

/// Serialize the full document and atomically replace the file at `path`.
pub fn save(path: &Path, document: &Document) -> CalDeskResult<()> {
    ensure_parent_dir(path)?;

    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, document)?;
        writer.write_all(b"\n")?;
        Ok(())
    })?;

    debug!("Saved data to {}", path.display());
    Ok(())
}

/// Write through a `.tmp` sibling, then rename it over `path`.
///
/// If `write` or the rename fails, the `.tmp` file is removed and `path` is
/// left exactly as it was.
pub fn write_atomic<F>(path: &Path, write: F) -> CalDeskResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> CalDeskResult<()>,
{
    let temp = sibling_path(path, TMP_SUFFIX);

    let result = write_then_rename(&temp, path, write);
    if result.is_err() {
        match fs::remove_file(&temp) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {}: {}", temp.display(), e),
        }
    }
    result
}

fn write_then_rename<F>(temp: &Path, path: &Path, write: F) -> CalDeskResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> CalDeskResult<()>,
{
    let mut writer = BufWriter::new(File::create(temp)?);
    write(&mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| CalDeskError::Io(e.into_error()))?;
    file.sync_all()?;

    // Replaces an existing file; a plain rename when there is none yet.
    fs::rename(temp, path)?;
    Ok(())
}
