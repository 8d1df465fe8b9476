//! Cleanup rules: immutable matching definitions combining path patterns and
//! age thresholds.
//!
//! Rules are built once from the configuration at startup and evaluated in
//! declared order for every visited entry. A rule "claims" an entry for
//! statistics the moment its include pattern matches, even when the age
//! thresholds later fail; the first claim wins. Rules without an include
//! pattern apply to every path and claim only once the age thresholds pass.

#[cfg(test)]
mod tests;

use crate::config::RuleSpec;
use crate::entry::Entry;
use crate::error::{Result, SweepError};
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// A single cleanup rule.
///
/// Age thresholds are declared in hours and converted to durations once,
/// here at construction.
#[derive(Debug)]
pub struct Rule {
    name: String,
    path_match: Option<Regex>,
    path_exclude: Option<Regex>,
    report_only: bool,
    atime: Option<Duration>,
    mtime: Option<Duration>,
    ctime: Option<Duration>,
}

impl Rule {
    /// Build a rule from its configuration spec.
    ///
    /// `index` is the rule's position in the configured list; it doubles as
    /// the identity of unnamed rules.
    pub fn from_spec(spec: &RuleSpec, index: usize) -> Result<Self> {
        Ok(Rule {
            name: spec.name.clone().unwrap_or_else(|| index.to_string()),
            path_match: spec.path_match.as_deref().map(compile_anchored).transpose()?,
            path_exclude: spec
                .path_exclude
                .as_deref()
                .map(compile_anchored)
                .transpose()?,
            report_only: spec.no_remove,
            atime: spec.atime.map(|hours| Duration::hours(hours as i64)),
            mtime: spec.mtime.map(|hours| Duration::hours(hours as i64)),
            ctime: spec.ctime.map(|hours| Duration::hours(hours as i64)),
        })
    }

    /// The rule's identity: its configured name, or its declaration index.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this rule matches entries for statistics only, never removing.
    pub fn report_only(&self) -> bool {
        self.report_only
    }

    /// Whether an include pattern was declared.
    ///
    /// A rule with an include pattern takes exclusive jurisdiction over every
    /// path it matches; the walker stops evaluating later rules for that
    /// entry regardless of the age outcome.
    pub fn has_path_match(&self) -> bool {
        self.path_match.is_some()
    }

    /// Check the entry's path against the exclude and include patterns.
    ///
    /// Returns false when the exclude pattern matches. Otherwise, an include
    /// pattern match claims the entry for statistics (if still unclaimed) and
    /// returns true; with no include pattern the rule applies to all paths
    /// and returns true without claiming.
    pub fn matches_path(&self, entry: &mut Entry) -> bool {
        let path = entry.path.to_string_lossy();

        if let Some(exclude) = &self.path_exclude
            && exclude.is_match(&path)
        {
            return false;
        }

        if let Some(include) = &self.path_match {
            if !include.is_match(&path) {
                return false;
            }
            // Claim for statistics even if the age thresholds fail later.
            if entry.matched_rule.is_none() {
                entry.matched_rule = Some(self.name.clone());
            }
        }

        true
    }

    /// Check the entry's timestamps against the configured age thresholds.
    ///
    /// Every threshold that is set must pass: an entry younger than the
    /// threshold does not match. The comparison is strict, so an entry whose
    /// age equals the threshold exactly does match. With no thresholds set
    /// the rule always matches. A pass claims the entry if still unclaimed.
    pub fn matches_age(&self, entry: &mut Entry, now: DateTime<Utc>) -> bool {
        let checks = [
            (self.atime, entry.atime),
            (self.mtime, entry.mtime),
            (self.ctime, entry.ctime),
        ];
        for (threshold, stamp) in checks {
            if let Some(threshold) = threshold
                && stamp > now - threshold
            {
                return false;
            }
        }

        if entry.matched_rule.is_none() {
            entry.matched_rule = Some(self.name.clone());
        }

        true
    }
}

/// Compile a user pattern so that it matches from the start of the path.
///
/// Patterns are prefix-anchored: `/tmp/scratch/.*` matches everything under
/// that prefix without needing an explicit `^`.
pub fn compile_anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})"))
        .map_err(|e| SweepError::Config(format!("invalid pattern '{}': {}", pattern, e)))
}
