//! PID file guard: exclusive-run bookkeeping for the cleaner.
//!
//! The PID file is created with **create_new** semantics so only one process
//! can hold it at a time; it contains the holder's process id. The guard is
//! RAII: dropping it removes the file. If removal fails during drop, a
//! warning is printed but the program does not crash.

use crate::error::{Result, SweepError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// RAII guard for the PID file.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Create the PID file exclusively and write the current process id.
    ///
    /// Fails with `SweepError::PidFileHeld` when the file already exists,
    /// which is the signal that another instance is running (or crashed
    /// without cleanup and needs manual attention).
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    SweepError::PidFileHeld(path.display().to_string())
                } else {
                    SweepError::PidFile(format!(
                        "failed to create PID file '{}': {}",
                        path.display(),
                        e
                    ))
                }
            })?;

        write!(file, "{}", std::process::id()).map_err(|e| {
            // Clean up the half-written file so a retry can succeed.
            let _ = fs::remove_file(path);
            SweepError::PidFile(format!(
                "failed to write PID file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(PidFile {
            path: path.to_path_buf(),
        })
    }

    /// Path of the held PID file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            eprintln!(
                "Warning: failed to remove PID file '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_writes_pid_and_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmpsweep.pid");

        {
            let guard = PidFile::acquire(&path).unwrap();
            assert_eq!(guard.path(), path);
            let content = fs::read_to_string(&path).unwrap();
            assert_eq!(content, std::process::id().to_string());
        }

        assert!(!path.exists());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmpsweep.pid");

        let _guard = PidFile::acquire(&path).unwrap();
        match PidFile::acquire(&path) {
            Err(SweepError::PidFileHeld(held)) => assert!(held.contains("tmpsweep.pid")),
            other => panic!("expected PidFileHeld, got {:?}", other),
        }
    }

    #[test]
    fn acquire_succeeds_again_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmpsweep.pid");

        drop(PidFile::acquire(&path).unwrap());
        assert!(PidFile::acquire(&path).is_ok());
    }

    #[test]
    fn unwritable_location_is_a_pidfile_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("tmpsweep.pid");
        match PidFile::acquire(&path) {
            Err(SweepError::PidFile(_)) => {}
            other => panic!("expected PidFile error, got {:?}", other),
        }
    }
}
