//! Config loading and validation.

use super::model::Config;
use crate::error::{Result, SweepError};
use crate::rule::compile_anchored;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SweepError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Rules:
    /// - `path` must be non-empty
    /// - `definitions` must be non-empty
    /// - every pattern (rule include/exclude and `pathIgnore`) must compile
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(SweepError::Config(
                "config validation failed: path must not be empty".to_string(),
            ));
        }

        if self.definitions.is_empty() {
            return Err(SweepError::Config(
                "config validation failed: config section definitions not present".to_string(),
            ));
        }

        if let Some(pattern) = &self.path_ignore {
            compile_anchored(pattern)?;
        }

        for spec in &self.definitions {
            for pattern in [&spec.path_match, &spec.path_exclude].into_iter().flatten() {
                compile_anchored(pattern)?;
            }
        }

        Ok(())
    }
}
