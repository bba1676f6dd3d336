//! Exclusive OS lock on `<data_dir>/.kubix.lock`.
//!
//! Held for the lifetime of the file backend so two server processes never
//! share one data directory. The OS drops the lock when the file closes.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::fs_json::{ensure_dir, io_error};
use crate::errors::domain::DomainError;

const LOCK_FILE: &str = ".kubix.lock";

#[derive(Debug)]
pub struct DataDirLock {
    _file: File,
    path: PathBuf,
}

impl DataDirLock {
    pub fn acquire(data_dir: &Path) -> Result<Self, DomainError> {
        use fs4::fs_std::FileExt;

        ensure_dir(data_dir)?;
        let path = data_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| io_error("open lock file", &path, e))?;

        // Ok(false) means another holder.
        match FileExt::try_lock_exclusive(&file) {
            Ok(true) => {
                debug!(lock_path = %path.display(), "Data directory lock acquired");
                Ok(Self { _file: file, path })
            }
            Ok(false) => Err(held_elsewhere(&path)),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(held_elsewhere(&path)),
            Err(e) => Err(io_error("lock", &path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn held_elsewhere(path: &Path) -> DomainError {
    DomainError::storage(format!(
        "data directory is locked by another process ({})",
        path.display()
    ))
}
