//! Summary table: per-rule cleanup statistics.
//!
//! The table maps (rule identity or "unmatched") × outcome × kind to
//! counters, plus a byte counter per (bucket, outcome) covering files only.
//! `Summary::record` is the single writer; the walker calls it exactly once
//! per visited entry, after any removal attempt.

use crate::entry::{Entry, EntryKind};
use std::collections::BTreeMap;
use std::fmt;

/// Final outcome of one visited entry.
///
/// Priority when flags overlap: failed > removed > existing. A failed
/// removal leaves the entry in place, so an entry is never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Removed,
    Failed,
    Existing,
}

/// Counters for one (bucket, outcome) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub files: u64,
    pub dirs: u64,
    /// Cumulative size of counted files, in bytes. Directories contribute
    /// nothing here.
    pub bytes: u64,
}

/// All three outcome cells for one rule (or the unmatched bucket).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeTable {
    pub removed: Tally,
    pub failed: Tally,
    pub existing: Tally,
}

impl OutcomeTable {
    /// The tally for a given outcome.
    pub fn tally(&self, outcome: Outcome) -> &Tally {
        match outcome {
            Outcome::Removed => &self.removed,
            Outcome::Failed => &self.failed,
            Outcome::Existing => &self.existing,
        }
    }

    fn tally_mut(&mut self, outcome: Outcome) -> &mut Tally {
        match outcome {
            Outcome::Removed => &mut self.removed,
            Outcome::Failed => &mut self.failed,
            Outcome::Existing => &mut self.existing,
        }
    }
}

/// The summary table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    unmatched: OutcomeTable,
    rules: BTreeMap<String, OutcomeTable>,
}

impl Summary {
    /// Create a summary with a pre-populated (all-zero) bucket per rule plus
    /// the unmatched bucket, so every configured rule appears in the output
    /// even when it never matched anything.
    pub fn new<'a>(rule_names: impl IntoIterator<Item = &'a str>) -> Self {
        Summary {
            unmatched: OutcomeTable::default(),
            rules: rule_names
                .into_iter()
                .map(|name| (name.to_string(), OutcomeTable::default()))
                .collect(),
        }
    }

    /// Record one visited entry.
    ///
    /// Selects the bucket from the entry's claim (or "unmatched"), the
    /// outcome from its flags, and the counter from its kind; file sizes are
    /// added to the outcome's byte counter.
    pub fn record(&mut self, entry: &Entry) {
        let outcome = if entry.failed {
            Outcome::Failed
        } else if entry.removed {
            Outcome::Removed
        } else {
            Outcome::Existing
        };

        let table = match &entry.matched_rule {
            Some(name) => self.rules.entry(name.clone()).or_default(),
            None => &mut self.unmatched,
        };

        let tally = table.tally_mut(outcome);
        match entry.kind {
            EntryKind::Directory => tally.dirs += 1,
            EntryKind::File => {
                tally.files += 1;
                tally.bytes += entry.size;
            }
        }
    }

    /// The bucket for entries no rule ever claimed.
    pub fn unmatched(&self) -> &OutcomeTable {
        &self.unmatched
    }

    /// The bucket for a rule, by identity.
    pub fn rule(&self, name: &str) -> Option<&OutcomeTable> {
        self.rules.get(name)
    }

    /// Iterate over the rule buckets, sorted by rule identity.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &OutcomeTable)> {
        self.rules.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Total number of entries recorded across all cells.
    pub fn total_entries(&self) -> u64 {
        std::iter::once(&self.unmatched)
            .chain(self.rules.values())
            .flat_map(|table| [&table.removed, &table.failed, &table.existing])
            .map(|tally| tally.files + tally.dirs)
            .sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, table) in self.rules() {
            write_bucket(f, name, table)?;
        }
        write_bucket(f, "unmatched", &self.unmatched)
    }
}

fn write_bucket(f: &mut fmt::Formatter<'_>, name: &str, table: &OutcomeTable) -> fmt::Result {
    writeln!(
        f,
        "{}: removed {} files / {} dirs ({} B), failed {} files / {} dirs ({} B), \
         existing {} files / {} dirs ({} B)",
        name,
        table.removed.files,
        table.removed.dirs,
        table.removed.bytes,
        table.failed.files,
        table.failed.dirs,
        table.failed.bytes,
        table.existing.files,
        table.existing.dirs,
        table.existing.bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn entry(kind: EntryKind, size: u64) -> Entry {
        let now = Utc::now();
        Entry {
            path: PathBuf::from("/tmp/x"),
            kind,
            size,
            atime: now,
            mtime: now,
            ctime: now,
            matched_rule: None,
            removed: false,
            failed: false,
        }
    }

    #[test]
    fn buckets_are_pre_populated() {
        let summary = Summary::new(["a", "b"]);
        assert!(summary.rule("a").is_some());
        assert!(summary.rule("b").is_some());
        assert!(summary.rule("c").is_none());
        assert_eq!(summary.total_entries(), 0);
    }

    #[test]
    fn unclaimed_entry_lands_in_unmatched() {
        let mut summary = Summary::new([]);
        summary.record(&entry(EntryKind::Directory, 0));
        assert_eq!(summary.unmatched().existing.dirs, 1);
        assert_eq!(summary.total_entries(), 1);
    }

    #[test]
    fn claimed_entry_lands_in_its_rule_bucket() {
        let mut summary = Summary::new(["old-uploads"]);
        let mut e = entry(EntryKind::File, 42);
        e.matched_rule = Some("old-uploads".to_string());
        e.removed = true;
        summary.record(&e);

        let tally = summary.rule("old-uploads").unwrap().tally(Outcome::Removed);
        assert_eq!(tally.files, 1);
        assert_eq!(tally.dirs, 0);
        assert_eq!(tally.bytes, 42);
    }

    #[test]
    fn failed_takes_priority_over_removed() {
        let mut summary = Summary::new([]);
        let mut e = entry(EntryKind::File, 10);
        e.failed = true;
        summary.record(&e);
        assert_eq!(summary.unmatched().failed.files, 1);
        assert_eq!(summary.unmatched().removed.files, 0);
        assert_eq!(summary.unmatched().failed.bytes, 10);
    }

    #[test]
    fn directory_sizes_are_not_counted() {
        let mut summary = Summary::new([]);
        let mut e = entry(EntryKind::Directory, 4096);
        e.removed = true;
        summary.record(&e);
        assert_eq!(summary.unmatched().removed.dirs, 1);
        assert_eq!(summary.unmatched().removed.bytes, 0);
    }

    #[test]
    fn display_lists_every_bucket() {
        let summary = Summary::new(["a"]);
        let rendered = summary.to_string();
        assert!(rendered.contains("a: removed 0 files"));
        assert!(rendered.contains("unmatched: removed 0 files"));
    }
}
