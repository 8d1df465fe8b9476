//! Configuration for tmpsweep.
//!
//! The configuration is a YAML file naming one root path to clean, an
//! optional PID file, an optional global path-ignore pattern, and an ordered
//! list of cleanup definitions. Field names are camelCase on disk.

mod model;
mod operations;


pub use model::{Config, RuleSpec};
