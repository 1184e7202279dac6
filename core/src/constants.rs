//! Constants shared by the benchmark workloads.

/// Number of records every benchmark container holds.
pub const LENGTH: usize = 100;

/// Default log level for the standalone runner.
pub const DEFAULT_LOG_LEVEL: &str = "info";
