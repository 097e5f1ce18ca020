//! # Exclusive Resource Contract
//!
//! The philosopher state machine never talks to a concrete lock. It consumes the
//! [`ExclusiveResource`] trait instead, which is the whole contract it needs from a
//! mutual-exclusion primitive:
//!
//! - **acquire with timeout** - block the *calling task only*, up to a bound.
//! - **try acquire** - never block.
//! - **release** - implicit when the guard drops, or explicit via [`ResourceGuard::release`].
//!
//! ## Scoped Acquisition
//!
//! Release is tied to the guard's lifetime, so it cannot be skipped on any exit path:
//! an early `return`, a `?` on a sibling acquisition, or the task being aborted all
//! drop the guard. Consuming `release(self)` makes a double release unrepresentable.

use crate::framework::error::ForkError;
use async_trait::async_trait;
use std::time::Duration;

/// Guard returned by a successful acquisition. Dropping it releases the resource.
pub trait ResourceGuard: Send {
    /// Index of the resource this guard holds.
    fn resource(&self) -> usize;

    /// Releases the resource now. Equivalent to dropping the guard.
    fn release(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}

/// Contract for an exclusively-lockable unit shared between actors.
///
/// `holder` identifies the acquiring actor so the primitive can track ownership.
#[async_trait]
pub trait ExclusiveResource: Send + Sync + 'static {
    /// The scoped lock token handed to the holder.
    type Guard: ResourceGuard;

    /// Stable index of this resource within its set.
    fn index(&self) -> usize;

    /// Blocks the caller until the resource is free or `timeout` elapses.
    async fn acquire(&self, holder: usize, timeout: Duration) -> Result<Self::Guard, ForkError>;

    /// Acquires the resource only if it is free right now.
    fn try_acquire(&self, holder: usize) -> Result<Self::Guard, ForkError>;

    /// The actor currently holding the resource, if any.
    fn holder(&self) -> Option<usize>;
}
