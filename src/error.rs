//! Configuration-load errors.
//!
//! The inference core itself recovers locally from every data-quality
//! problem (missing fields, unknown culture keys, short histories) and
//! reports them through typed result statuses. The only hard failures are
//! genuine integration bugs, and the only fallible I/O is loading the
//! cultural modifier table at startup.

use thiserror::Error;

/// Failure while loading the cultural modifier table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The table file could not be read.
    #[error("failed to read cultural table: {0}")]
    Io(#[from] std::io::Error),
    /// The table file is not valid JSON in the expected shape.
    #[error("failed to parse cultural table: {0}")]
    Parse(#[from] serde_json::Error),
}
