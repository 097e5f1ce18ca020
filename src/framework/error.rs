//! # Resource Errors
//!
//! Errors produced by the exclusive-resource primitive. They carry the fork index so
//! callers can report *which* resource misbehaved without extra bookkeeping.

use std::time::Duration;

/// Errors that can occur while acquiring a fork.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ForkError {
    /// A bounded wait for the fork exceeded its timeout.
    #[error("Timed out after {timeout:?} waiting for fork {fork}")]
    TimedOut { fork: usize, timeout: Duration },

    /// A non-blocking acquire found the fork already held.
    #[error("Fork {fork} is busy (held by {holder:?})")]
    Busy { fork: usize, holder: Option<usize> },
}
