//! Config struct definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, as loaded from the YAML config file.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root path to clean. Entries strictly inside it are removal
    /// candidates; the root itself never is.
    pub path: PathBuf,

    /// Optional PID file guarding against concurrent runs. Skipped in
    /// dry-run mode.
    #[serde(default)]
    pub pidfile: Option<PathBuf>,

    /// Optional global ignore pattern: files directly inside a matching
    /// directory are preserved unconditionally and not counted.
    #[serde(default)]
    pub path_ignore: Option<String>,

    /// Ordered list of cleanup definitions. Order is matching precedence.
    #[serde(default)]
    pub definitions: Vec<RuleSpec>,
}

/// One cleanup definition, before pattern compilation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    /// Rule name; unnamed rules are identified by their list index.
    #[serde(default)]
    pub name: Option<String>,

    /// Include pattern (regex, prefix-anchored over the full path).
    #[serde(default)]
    pub path_match: Option<String>,

    /// Exclude pattern, evaluated before the include pattern.
    #[serde(default)]
    pub path_exclude: Option<String>,

    /// Report-only flag: match and claim for statistics, never remove.
    #[serde(default)]
    pub no_remove: bool,

    /// Access-time threshold in hours.
    #[serde(default)]
    pub atime: Option<u64>,

    /// Modify-time threshold in hours.
    #[serde(default)]
    pub mtime: Option<u64>,

    /// Change-time threshold in hours.
    #[serde(default)]
    pub ctime: Option<u64>,
}
