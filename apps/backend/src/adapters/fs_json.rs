//! Atomic JSON file helpers shared by the file backends.
//!
//! Writes go to a temp file in the target directory, are fsynced, renamed
//! over the target and followed by a directory fsync. A crash leaves either
//! the old file or the new one on disk.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::errors::domain::{DomainError, InfraErrorKind};

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), DomainError> {
    let dir = path
        .parent()
        .ok_or_else(|| DomainError::storage(format!("{} has no parent", path.display())))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| io_error("create temp file in", dir, e))?;
    serde_json::to_writer_pretty(&mut tmp, value)
        .map_err(|e| DomainError::storage(format!("serialize {}: {e}", path.display())))?;
    tmp.write_all(b"\n")
        .map_err(|e| io_error("write", path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| io_error("sync", path, e))?;
    tmp.persist(path)
        .map_err(|e| io_error("rename into", path, e.error))?;

    sync_dir(dir)
}

/// Read and parse `path`. A missing file is `Ok(None)`; an unparsable one is
/// data corruption.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DomainError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error("open", path, e)),
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| DomainError::corruption(format!("{}: {e}", path.display())))
}

pub fn ensure_dir(dir: &Path) -> Result<(), DomainError> {
    std::fs::create_dir_all(dir).map_err(|e| io_error("create directory", dir, e))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), DomainError> {
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| io_error("sync directory", dir, e))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), DomainError> {
    Ok(())
}

pub(crate) fn io_error(action: &str, path: &Path, e: std::io::Error) -> DomainError {
    DomainError::storage(format!("{action} {}: {e}", path.display()))
}

/// Run blocking file work off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("blocking task".to_string()),
            format!("file task failed: {e}"),
        )
    })?
}
