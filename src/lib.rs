//! Tmpsweep: single-pass temp cleaner with per-rule cleanup statistics.
//!
//! The crate walks a configured root bottom-up exactly once. Each visited
//! file or directory is checked against an ordered list of [`rule::Rule`]s;
//! matches are removed (directories only once all of their children are
//! gone) and every entry is accounted for exactly once in a
//! [`stats::Summary`] keyed by rule, outcome, and kind. The walk never
//! aborts on per-entry failures: permission problems and races with other
//! processes are folded into the counters and logs.

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod exit_codes;
pub mod pidfile;
pub mod rule;
pub mod stats;
pub mod walker;

pub use cleaner::Cleaner;
pub use config::Config;
pub use error::{Result, SweepError};
