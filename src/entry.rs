//! Entry descriptors: a typed wrapper around one filesystem path's metadata.
//!
//! An `Entry` is built from a single lstat of the path and carries the
//! mutable match/removal state that the walker and the summary read. Entries
//! live only for the duration of one visit; once their statistics have been
//! recorded they are discarded.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Kind of a visited filesystem entry.
///
/// Anything that is neither a regular file nor a directory (symlinks,
/// devices, sockets, fifos) is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Why an `Entry` could not be constructed for a path.
#[derive(Debug)]
pub enum EntryError {
    /// The path is neither a regular file nor a directory.
    Unsupported(PathBuf),
    /// The lstat itself failed (vanished, permission, I/O).
    Io(io::Error),
}

/// One filesystem path visited during a walk.
#[derive(Debug)]
pub struct Entry {
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Kind, fixed at construction from a single lstat.
    pub kind: EntryKind,
    /// Size in bytes (meaningful for files only).
    pub size: u64,
    /// Last access time.
    pub atime: DateTime<Utc>,
    /// Last modification time.
    pub mtime: DateTime<Utc>,
    /// Last inode change time.
    pub ctime: DateTime<Utc>,
    /// Name of the rule that claimed this entry for statistics, if any.
    pub matched_rule: Option<String>,
    /// Whether the entry was removed (or would be, in dry-run mode).
    pub removed: bool,
    /// Whether a removal attempt failed. A failed removal leaves
    /// `removed = false`.
    pub failed: bool,
}

impl Entry {
    /// Build an entry from a single lstat of `path`.
    ///
    /// Symlinks are not followed, so a symlink is reported as an unsupported
    /// kind rather than as its target.
    pub fn from_path(path: &Path) -> Result<Self, EntryError> {
        let meta = fs::symlink_metadata(path).map_err(EntryError::Io)?;

        let file_type = meta.file_type();
        let kind = if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            return Err(EntryError::Unsupported(path.to_path_buf()));
        };

        Ok(Entry {
            path: path.to_path_buf(),
            kind,
            size: meta.size(),
            atime: timestamp(meta.atime(), meta.atime_nsec()),
            mtime: timestamp(meta.mtime(), meta.mtime_nsec()),
            ctime: timestamp(meta.ctime(), meta.ctime_nsec()),
            matched_rule: None,
            removed: false,
            failed: false,
        })
    }

    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Human-readable kind label for log messages.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }

    /// Remove the entry from the filesystem.
    ///
    /// Directories are removed with rmdir semantics and must be empty; the
    /// walker's post-order traversal guarantees this outside of races.
    /// Sets `removed` only when the filesystem call succeeded.
    pub fn remove(&mut self) -> io::Result<()> {
        match self.kind {
            EntryKind::Directory => fs::remove_dir(&self.path)?,
            EntryKind::File => fs::remove_file(&self.path)?,
        }
        self.removed = true;
        Ok(())
    }
}

fn timestamp(secs: i64, nsecs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, nsecs as u32).unwrap_or(DateTime::UNIX_EPOCH)
}
