//! Exit code constants for the tmpsweep CLI.
//!
//! A completed run always exits 0, even when individual entries failed to be
//! removed; failures are visible through the `failed` counters and logs.
//! Non-zero codes are reserved for problems that surface before the walk
//! begins (configuration, PID file).

/// Successful execution (including runs with per-entry removal failures).
pub const SUCCESS: i32 = 0;

/// User error: missing or invalid configuration, bad arguments.
pub const USER_ERROR: i32 = 1;

/// PID file failure: another instance is running or the file is unwritable.
pub const PIDFILE_FAILURE: i32 = 2;
