//! Error types for the tmpsweep CLI.
//!
//! Uses thiserror for derive macros. Only conditions that surface before the
//! walk begins are modeled as errors; once the walk is running, filesystem
//! problems are folded into per-entry state and the summary counters instead
//! (a completed run never fails as a whole).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for tmpsweep operations.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Configuration file missing, unparseable, or semantically invalid.
    #[error("{0}")]
    Config(String),

    /// The PID file already exists: another instance appears to be running.
    #[error("PID file {0} already exists")]
    PidFileHeld(String),

    /// The PID file could not be created or written for another reason.
    #[error("{0}")]
    PidFile(String),
}

impl SweepError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::Config(_) => exit_codes::USER_ERROR,
            SweepError::PidFileHeld(_) => exit_codes::PIDFILE_FAILURE,
            SweepError::PidFile(_) => exit_codes::PIDFILE_FAILURE,
        }
    }
}

/// Result type alias for tmpsweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
