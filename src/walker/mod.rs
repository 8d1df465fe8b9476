//! Walker/matcher engine: a single bottom-up traversal that applies rules,
//! removes matching entries, and records statistics exactly once per entry.
//!
//! The walk is strictly single-threaded and recursive. Each recursion frame
//! carries the counts of still-live immediate children, so directory
//! emptiness is decided without re-reading the filesystem and the working
//! state is bounded by the current path depth times the fan-out at each
//! level, never by the total tree size. Children are fully resolved (their
//! statistics recorded, removals attempted) before their parent directory is
//! evaluated.
//!
//! The filesystem is shared with other processes: every call here tolerates
//! "entry vanished since it was listed", and no error inside the walk is
//! fatal. A completed walk always yields a summary.


use crate::entry::{Entry, EntryError};
use crate::rule::Rule;
use crate::stats::Summary;
use chrono::Utc;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What became of a directory once its subtree was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirFate {
    /// Gone (removed by us, marked removed in dry-run, or vanished): the
    /// parent no longer counts it as a live child.
    Removed,
    /// Still present; the parent cannot become empty.
    Kept,
}

/// The traversal engine for one run.
pub struct Walker<'a> {
    rules: &'a [Rule],
    path_ignore: Option<&'a Regex>,
    dry_run: bool,
    summary: Summary,
}

impl<'a> Walker<'a> {
    /// Build a walker over the given rules.
    ///
    /// `path_ignore` is the global directory-ignore pattern; `dry_run`
    /// suppresses every filesystem mutation while still marking entries
    /// removed for statistics.
    pub fn new(rules: &'a [Rule], path_ignore: Option<&'a Regex>, dry_run: bool) -> Self {
        Walker {
            rules,
            path_ignore,
            dry_run,
            summary: Summary::new(rules.iter().map(Rule::name)),
        }
    }

    /// Walk the configured root bottom-up.
    ///
    /// The root is the starting point, not a candidate: it is traversed but
    /// never matched, removed, or counted.
    pub fn walk(&mut self, root: &Path) {
        self.visit_dir(root, true, false);
    }

    /// The summary accumulated so far.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Consume the walker, yielding its summary.
    pub fn into_summary(self) -> Summary {
        self.summary
    }

    /// Visit one directory: resolve all children first, then the directory
    /// itself.
    ///
    /// `parent_ignored` carries the ignore status of the enclosing
    /// directory; entries directly inside an ignored directory are preserved
    /// unconditionally and left out of the statistics.
    fn visit_dir(&mut self, path: &Path, is_root: bool, parent_ignored: bool) -> DirFate {
        let mut live_files: usize = 0;
        let mut live_dirs: usize = 0;
        let mut files: Vec<PathBuf> = Vec::new();
        let mut subdirs: Vec<PathBuf> = Vec::new();

        match fs::read_dir(path) {
            Ok(reader) => {
                for dent in reader {
                    let dent = match dent {
                        Ok(dent) => dent,
                        Err(err) => {
                            self.log_enumeration_error(path, &err);
                            continue;
                        }
                    };
                    match dent.file_type() {
                        Ok(file_type) if file_type.is_dir() => subdirs.push(dent.path()),
                        Ok(_) => files.push(dent.path()),
                        Err(err) if err.kind() == io::ErrorKind::NotFound => {
                            debug!(path = %dent.path().display(), "entry vanished during listing");
                        }
                        Err(err) => {
                            self.log_enumeration_error(&dent.path(), &err);
                            // Type unknown; it still keeps the directory
                            // non-empty.
                            live_files += 1;
                        }
                    }
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "directory vanished before listing");
                return DirFate::Removed;
            }
            Err(err) => {
                self.log_enumeration_error(path, &err);
                // Contents unknown: treat as non-empty and preserve.
                live_dirs += 1;
            }
        }

        let ignored = self
            .path_ignore
            .is_some_and(|pattern| pattern.is_match(&path.to_string_lossy()));
        if ignored {
            debug!(path = %path.display(), "directory matches pathIgnore, contents preserved");
        }

        // Files first, then subdirectories.
        for file_path in files {
            if ignored {
                live_files += 1;
                continue;
            }
            match Entry::from_path(&file_path) {
                Ok(mut entry) => {
                    self.match_and_remove(&mut entry);
                    if !entry.removed {
                        live_files += 1;
                    }
                }
                Err(EntryError::Unsupported(p)) => {
                    warn!(path = %p.display(), "not a regular file or directory ..skipping");
                    live_files += 1;
                }
                Err(EntryError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %file_path.display(), "file vanished before stat");
                }
                Err(EntryError::Io(err)) => {
                    error!(path = %file_path.display(), %err, "failed to stat file");
                    live_files += 1;
                }
            }
        }

        for dir_path in subdirs {
            match self.visit_dir(&dir_path, false, ignored) {
                DirFate::Removed => {}
                DirFate::Kept => live_dirs += 1,
            }
        }

        // All children are resolved; now the directory itself.
        if is_root || parent_ignored {
            return DirFate::Kept;
        }

        let mut entry = match Entry::from_path(path) {
            Ok(entry) => entry,
            Err(EntryError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "directory vanished after its children");
                return DirFate::Removed;
            }
            Err(EntryError::Unsupported(p)) => {
                warn!(path = %p.display(), "not a regular file or directory ..skipping");
                return DirFate::Kept;
            }
            Err(EntryError::Io(err)) => {
                error!(path = %path.display(), %err, "failed to stat directory");
                return DirFate::Kept;
            }
        };

        if live_files == 0 && live_dirs == 0 {
            self.match_and_remove(&mut entry);
        } else {
            // Still has live children: preserved without further matching,
            // but its own visit is accounted for.
            self.summary.record(&entry);
        }

        if entry.removed {
            DirFate::Removed
        } else {
            DirFate::Kept
        }
    }

    /// Evaluate the rules for one entry, attempt removal when a rule
    /// decides, and record the entry's statistics exactly once.
    fn match_and_remove(&mut self, entry: &mut Entry) {
        if let Some(rule) = evaluate(self.rules, entry) {
            info!(
                path = %entry.path.display(),
                rule = rule.name(),
                "removing {}",
                entry.kind_label()
            );
            if self.dry_run {
                entry.removed = true;
            } else if let Err(err) = entry.remove() {
                classify_removal_error(entry, &err);
            }
        }
        self.summary.record(entry);
    }

    fn log_enumeration_error(&self, path: &Path, err: &io::Error) {
        match err.kind() {
            io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "vanished during traversal");
            }
            io::ErrorKind::PermissionDenied => {
                error!(path = %path.display(), %err, "permission denied during traversal");
            }
            _ => {
                // Deliberately not fatal: a single corrupted entry must not
                // block cleanup of the rest of the tree.
                error!(path = %path.display(), %err, "unexpected error during traversal");
            }
        }
    }
}

/// Find the rule that decides this entry's removal, if any.
///
/// Rules are tried in declared order. The first rule whose path check passes
/// gets to run its age check; if both pass and the rule is not report-only,
/// it decides the entry. A rule with an include pattern owns any path it
/// matches, win or lose: no later rule is consulted, which keeps a broad
/// rule from deleting what a more specific one declined.
fn evaluate<'r>(rules: &'r [Rule], entry: &mut Entry) -> Option<&'r Rule> {
    let now = Utc::now();
    for rule in rules {
        if rule.matches_path(entry) {
            if rule.matches_age(entry, now) {
                if !rule.report_only() {
                    return Some(rule);
                }
                debug!(
                    path = %entry.path.display(),
                    rule = rule.name(),
                    "matches report-only rule, not removing"
                );
            } else {
                debug!(
                    path = %entry.path.display(),
                    rule = rule.name(),
                    "matched path but not age thresholds"
                );
            }
            if rule.has_path_match() {
                break;
            }
        }
    }
    None
}

/// Fold a removal error into the entry's state per the error taxonomy.
///
/// Vanished entries and not-empty directories are benign races: the entry
/// stays unremoved and unfailed, and lands under `existing`. Permission
/// problems and anything else mark the entry failed. Nothing here aborts the
/// walk.
fn classify_removal_error(entry: &mut Entry, err: &io::Error) {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::DirectoryNotEmpty => {
            info!(path = %entry.path.display(), %err, "benign removal failure");
        }
        io::ErrorKind::PermissionDenied => {
            entry.failed = true;
            error!(path = %entry.path.display(), %err, "permission denied removing entry");
        }
        _ => {
            entry.failed = true;
            error!(path = %entry.path.display(), %err, "failed to remove entry");
        }
    }
}
