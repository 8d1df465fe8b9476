//! Tests for rule matching and claiming semantics.

use crate::config::RuleSpec;
use crate::entry::{Entry, EntryKind};
use crate::rule::{Rule, compile_anchored};
use chrono::{Duration, Utc};
use std::path::PathBuf;

fn spec() -> RuleSpec {
    RuleSpec {
        name: Some("test".to_string()),
        path_match: None,
        path_exclude: None,
        no_remove: false,
        atime: None,
        mtime: None,
        ctime: None,
    }
}

fn entry(path: &str, age_hours: i64) -> Entry {
    let stamp = Utc::now() - Duration::hours(age_hours);
    Entry {
        path: PathBuf::from(path),
        kind: EntryKind::File,
        size: 0,
        atime: stamp,
        mtime: stamp,
        ctime: stamp,
        matched_rule: None,
        removed: false,
        failed: false,
    }
}

#[test]
fn include_pattern_matches_and_claims() {
    let rule = Rule::from_spec(
        &RuleSpec {
            path_match: Some("/tmp/scratch/.*".to_string()),
            ..spec()
        },
        0,
    )
    .unwrap();

    let mut entry = entry("/tmp/scratch/old.log", 0);
    assert!(rule.matches_path(&mut entry));
    assert_eq!(entry.matched_rule.as_deref(), Some("test"));

    let mut other = self::entry("/var/data/old.log", 0);
    assert!(!rule.matches_path(&mut other));
    assert!(other.matched_rule.is_none());
}

#[test]
fn patterns_are_prefix_anchored() {
    let rule = Rule::from_spec(
        &RuleSpec {
            path_match: Some("/tmp/scratch/.*".to_string()),
            ..spec()
        },
        0,
    )
    .unwrap();

    // The pattern occurs mid-path but not at the start.
    let mut entry = entry("/backup/tmp/scratch/old.log", 0);
    assert!(!rule.matches_path(&mut entry));
}

#[test]
fn exclude_pattern_wins_over_include() {
    let rule = Rule::from_spec(
        &RuleSpec {
            path_match: Some("/tmp/scratch/.*".to_string()),
            path_exclude: Some("/tmp/scratch/keep/.*".to_string()),
            ..spec()
        },
        0,
    )
    .unwrap();

    let mut entry = entry("/tmp/scratch/keep/precious", 0);
    assert!(!rule.matches_path(&mut entry));
    assert!(entry.matched_rule.is_none());
}

#[test]
fn no_include_pattern_matches_all_without_claiming() {
    let rule = Rule::from_spec(&spec(), 0).unwrap();

    let mut entry = entry("/anywhere/at/all", 0);
    assert!(rule.matches_path(&mut entry));
    assert!(entry.matched_rule.is_none());
}

#[test]
fn no_thresholds_always_match_age_and_claim() {
    let rule = Rule::from_spec(&spec(), 0).unwrap();

    let mut entry = entry("/tmp/fresh", 0);
    assert!(rule.matches_age(&mut entry, Utc::now()));
    assert_eq!(entry.matched_rule.as_deref(), Some("test"));
}

#[test]
fn younger_than_threshold_does_not_match() {
    let rule = Rule::from_spec(
        &RuleSpec {
            mtime: Some(5),
            ..spec()
        },
        0,
    )
    .unwrap();

    let mut young = entry("/tmp/young", 2);
    assert!(!rule.matches_age(&mut young, Utc::now()));
    assert!(young.matched_rule.is_none());

    let mut old = entry("/tmp/old", 10);
    assert!(rule.matches_age(&mut old, Utc::now()));
    assert_eq!(old.matched_rule.as_deref(), Some("test"));
}

#[test]
fn age_boundary_is_inclusive() {
    let rule = Rule::from_spec(
        &RuleSpec {
            mtime: Some(5),
            ..spec()
        },
        0,
    )
    .unwrap();

    // Pin `now` so the entry is exactly five hours old.
    let now = Utc::now();
    let mut entry = entry("/tmp/boundary", 0);
    entry.mtime = now - Duration::hours(5);
    assert!(rule.matches_age(&mut entry, now));
}

#[test]
fn every_set_threshold_must_pass() {
    let rule = Rule::from_spec(
        &RuleSpec {
            atime: Some(1),
            mtime: Some(1),
            ..spec()
        },
        0,
    )
    .unwrap();

    let mut entry = entry("/tmp/split", 5);
    entry.atime = Utc::now();
    assert!(!rule.matches_age(&mut entry, Utc::now()));
}

#[test]
fn first_claim_wins() {
    let rule = Rule::from_spec(
        &RuleSpec {
            path_match: Some("/tmp/.*".to_string()),
            ..spec()
        },
        0,
    )
    .unwrap();

    let mut entry = entry("/tmp/claimed", 10);
    entry.matched_rule = Some("earlier".to_string());
    assert!(rule.matches_path(&mut entry));
    assert!(rule.matches_age(&mut entry, Utc::now()));
    assert_eq!(entry.matched_rule.as_deref(), Some("earlier"));
}

#[test]
fn unnamed_rule_falls_back_to_index() {
    let rule = Rule::from_spec(
        &RuleSpec {
            name: None,
            ..spec()
        },
        3,
    )
    .unwrap();
    assert_eq!(rule.name(), "3");
}

#[test]
fn invalid_pattern_is_a_config_error() {
    assert!(compile_anchored("(unclosed").is_err());
    assert!(
        Rule::from_spec(
            &RuleSpec {
                path_exclude: Some("[".to_string()),
                ..spec()
            },
            0,
        )
        .is_err()
    );
}
