use super::TableObserver;
use crate::domain::TableEvent;
use tracing::{debug, info, warn};

/// Logs every event with structured fields.
///
/// Transitions go out at `debug`, timeouts at `warn`, halts at `info`. Run with
/// `RUST_LOG=debug` to watch the whole table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TableObserver for TracingObserver {
    fn notify(&self, event: &TableEvent) {
        match *event {
            TableEvent::StateChanged { philosopher, state } => {
                debug!(philosopher, %state, "State changed");
            }
            TableEvent::TimedOut {
                philosopher,
                fork,
                state,
            } => {
                warn!(philosopher, fork, %state, "Fork acquisition timed out");
            }
            TableEvent::Halted {
                philosopher,
                reason,
            } => {
                info!(philosopher, ?reason, "Philosopher halted");
            }
        }
    }
}
