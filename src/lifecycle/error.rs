//! Error types for table construction and teardown.

use thiserror::Error;

/// A configuration the table refuses to start with.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A ring needs at least two seats.
    #[error("Need at least 2 philosophers, got {0}")]
    TooFewPhilosophers(usize),

    /// A duration range whose lower bound exceeds its upper bound.
    #[error("Invalid {name} range: min {min_ms}ms > max {max_ms}ms")]
    InvertedRange {
        name: &'static str,
        min_ms: u64,
        max_ms: u64,
    },

    /// An acquisition timeout of zero would fail every contended acquire.
    #[error("Acquire timeout must be greater than zero")]
    ZeroTimeout,

    /// A bounded run must allow at least one meal.
    #[error("max_cycles must be at least 1 when set")]
    ZeroCycles,
}

/// Errors surfaced by [`DiningTable`](super::DiningTable).
#[derive(Debug, Error)]
pub enum TableError {
    /// Rejected before any philosopher started.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A philosopher task panicked or was cancelled.
    #[error("Philosopher {philosopher} task failed: {source}")]
    Join {
        philosopher: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}
