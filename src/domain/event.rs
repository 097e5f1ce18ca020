use super::state::PhilosopherState;
use serde::{Deserialize, Serialize};

/// Why a philosopher stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// Finished its configured number of meals.
    CyclesCompleted,
    /// Gave up after a fork acquisition timed out.
    AcquisitionTimeout,
}

/// A notification emitted by a philosopher at the moment something happens.
///
/// These are the only externally visible effects of a philosopher. Observers consume
/// them; nothing in the table reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TableEvent {
    /// The philosopher entered `state`.
    StateChanged {
        philosopher: usize,
        state: PhilosopherState,
    },
    /// Waiting for `fork` timed out while in `state`. Any fork held at that point has
    /// already been released when this is emitted.
    TimedOut {
        philosopher: usize,
        fork: usize,
        state: PhilosopherState,
    },
    /// The philosopher stopped and holds no forks.
    Halted {
        philosopher: usize,
        reason: HaltReason,
    },
}

impl TableEvent {
    pub fn philosopher(&self) -> usize {
        match *self {
            TableEvent::StateChanged { philosopher, .. }
            | TableEvent::TimedOut { philosopher, .. }
            | TableEvent::Halted { philosopher, .. } => philosopher,
        }
    }

    /// The new state, if this is a state transition.
    pub fn state(&self) -> Option<PhilosopherState> {
        match *self {
            TableEvent::StateChanged { state, .. } => Some(state),
            _ => None,
        }
    }
}
