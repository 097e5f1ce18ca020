//! Error types for the philosopher actor.

use crate::domain::PhilosopherState;
use crate::framework::ForkError;
use std::time::Duration;
use thiserror::Error;

/// Errors a philosopher's task can end with.
///
/// Both variants are only ever returned after every fork the philosopher held has
/// been released.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhilosopherError {
    /// Waiting for a fork exceeded the configured timeout.
    #[error("Philosopher {philosopher} timed out after {timeout:?} waiting for fork {fork} ({state})")]
    AcquisitionTimeout {
        philosopher: usize,
        fork: usize,
        state: PhilosopherState,
        timeout: Duration,
    },

    /// The resource primitive failed in some other way.
    #[error("Philosopher {philosopher} resource error: {source}")]
    Resource {
        philosopher: usize,
        #[source]
        source: ForkError,
    },
}

impl PhilosopherError {
    pub(crate) fn from_fork(philosopher: usize, state: PhilosopherState, err: ForkError) -> Self {
        match err {
            ForkError::TimedOut { fork, timeout } => PhilosopherError::AcquisitionTimeout {
                philosopher,
                fork,
                state,
                timeout,
            },
            source => PhilosopherError::Resource {
                philosopher,
                source,
            },
        }
    }

    pub fn philosopher(&self) -> usize {
        match *self {
            PhilosopherError::AcquisitionTimeout { philosopher, .. }
            | PhilosopherError::Resource { philosopher, .. } => philosopher,
        }
    }
}
