//! Sinks for the events philosophers emit.
//!
//! Philosophers call [`TableObserver::notify`] synchronously at the moment of each
//! transition. An observer must therefore return quickly and never wait on anything a
//! philosopher might hold: it may buffer, sample or drop events, but it must not push
//! back.
//!
//! # Implementations
//!
//! - [`NullObserver`] - discards everything
//! - [`TracingObserver`] - logs every event through `tracing`
//! - [`ChannelObserver`] - forwards events into an unbounded Tokio channel
//! - any `Fn(&TableEvent) + Send + Sync` closure

pub mod channel;
pub mod logging;

pub use channel::*;
pub use logging::*;

use crate::domain::TableEvent;

/// Receives every [`TableEvent`] emitted around the table.
pub trait TableObserver: Send + Sync {
    fn notify(&self, event: &TableEvent);
}

/// Observer that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl TableObserver for NullObserver {
    fn notify(&self, _event: &TableEvent) {}
}

impl<F> TableObserver for F
where
    F: Fn(&TableEvent) + Send + Sync,
{
    fn notify(&self, event: &TableEvent) {
        self(event)
    }
}
