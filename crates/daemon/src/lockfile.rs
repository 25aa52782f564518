// SPDX-License-Identifier: MIT

//! Singleton lock file, preventing two daemons from binding the same control socket
//! (SPEC_FULL.md §6). Ported from the teacher's `lifecycle::startup` lock acquisition: open
//! without truncating, take the advisory lock, only then truncate and write our PID — so a
//! losing process never clobbers the winner's PID.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;

use fs2::FileExt;

use crate::error::SetupError;

/// PID file mode per SPEC_FULL.md §6; subject to the process umask like any other `open()`.
const LOCK_FILE_MODE: u32 = 0o755;

/// An exclusively-locked PID file, released (and the file left behind) when dropped.
pub struct LockFile {
    path: String,
    file: File,
}

impl LockFile {
    pub fn acquire(path: &str) -> Result<Self, SetupError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .mode(LOCK_FILE_MODE)
            .open(path)
            .map_err(|source| SetupError::LockFailed { path: path.to_string(), source })?;
        file.try_lock_exclusive().map_err(|source| SetupError::LockFailed {
            path: path.to_string(),
            source,
        })?;

        let mut file = file;
        file.set_len(0).map_err(|source| SetupError::LockFailed {
            path: path.to_string(),
            source,
        })?;
        writeln!(file, "{}", std::process::id()).map_err(|source| SetupError::LockFailed {
            path: path.to_string(),
            source,
        })?;

        Ok(Self { path: path.to_string(), file })
    }

    /// Remove the lock file from disk. Called on clean shutdown, not on startup failure
    /// (a failed `try_lock_exclusive` means another daemon owns the file — never delete it).
    pub fn remove(self) {
        let _ = std::fs::remove_file(&self.path);
        drop(self.file);
    }
}

#[cfg(test)]
#[path = "lockfile_tests.rs"]
mod tests;
