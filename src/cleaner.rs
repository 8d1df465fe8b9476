//! Run controller: sequences one cleanup pass over the configured root.
//!
//! The cleaner is the only piece that touches the external configuration
//! object. It compiles the rules once, acquires the PID file (outside of
//! dry-run), drives the walker over the configured root, and keeps the
//! resulting summary and elapsed time for the caller to consume.

use crate::config::Config;
use crate::error::Result;
use crate::pidfile::PidFile;
use crate::rule::{Rule, compile_anchored};
use crate::stats::Summary;
use crate::walker::Walker;
use regex::Regex;
use std::time::{Duration, Instant};
use tracing::info;

/// One configured cleanup run.
pub struct Cleaner {
    config: Config,
    rules: Vec<Rule>,
    path_ignore: Option<Regex>,
    dry_run: bool,
    summary: Summary,
    elapsed: Duration,
}

impl Cleaner {
    /// Build a cleaner from a validated configuration.
    ///
    /// Compiles every rule pattern up front; pattern problems surface here,
    /// before anything touches the filesystem.
    pub fn new(config: Config, dry_run: bool) -> Result<Self> {
        config.validate()?;

        let rules = config
            .definitions
            .iter()
            .enumerate()
            .map(|(index, spec)| Rule::from_spec(spec, index))
            .collect::<Result<Vec<_>>>()?;

        let path_ignore = config
            .path_ignore
            .as_deref()
            .map(compile_anchored)
            .transpose()?;

        if dry_run {
            info!("running in dry-run mode");
        }

        let summary = Summary::new(rules.iter().map(Rule::name));
        Ok(Cleaner {
            config,
            rules,
            path_ignore,
            dry_run,
            summary,
            elapsed: Duration::ZERO,
        })
    }

    /// Run one cleanup pass.
    ///
    /// Holds the PID file (when configured and not in dry-run mode) for the
    /// duration of the pass. Per-entry failures never fail the run; they are
    /// visible through the summary's `failed` counters and the logs.
    pub fn run(&mut self) -> Result<()> {
        let _pidfile = match (&self.config.pidfile, self.dry_run) {
            (Some(path), false) => Some(PidFile::acquire(path)?),
            _ => None,
        };

        info!(path = %self.config.path.display(), "passing");
        let start = Instant::now();

        let mut walker = Walker::new(&self.rules, self.path_ignore.as_ref(), self.dry_run);
        walker.walk(&self.config.path);
        self.summary = walker.into_summary();

        self.elapsed = start.elapsed();
        info!(elapsed = ?self.elapsed, "pass finished");
        Ok(())
    }

    /// The summary table of the most recent run.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Wall-clock duration of the most recent run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
