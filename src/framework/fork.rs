//! # Fork
//!
//! The concrete [`ExclusiveResource`] used by the table: a `tokio::sync::Mutex` plus
//! holder tracking and a set of atomic counters.
//!
//! ## Instrumentation
//!
//! Every fork counts acquisitions, releases, timeouts and the number of guards alive
//! at once. The counters are updated *inside* the critical section (after the lock is
//! taken, before it is handed back), so `peak_holders > 1` can only mean a broken lock.
//!
//! ## Fairness
//!
//! Tokio's mutex queues waiters in FIFO order, so a philosopher blocked on a fork is
//! served before anyone who starts waiting after it.

use crate::framework::error::ForkError;
use crate::framework::resource::{ExclusiveResource, ResourceGuard};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

const NO_HOLDER: usize = usize::MAX;

/// Live counters for one fork.
#[derive(Debug, Default)]
struct ForkStats {
    acquires: AtomicU64,
    releases: AtomicU64,
    timeouts: AtomicU64,
    holders: AtomicUsize,
    peak_holders: AtomicUsize,
}

impl ForkStats {
    fn record_acquire(&self) {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        let now = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_holders.fetch_max(now, Ordering::SeqCst);
    }

    fn record_release(&self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
        self.releases.fetch_add(1, Ordering::SeqCst);
    }

    fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Point-in-time copy of a fork's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForkSnapshot {
    pub index: usize,
    pub holder: Option<usize>,
    pub acquires: u64,
    pub releases: u64,
    pub timeouts: u64,
    pub peak_holders: usize,
}

impl ForkSnapshot {
    /// Every acquire has a matching release and nobody holds the fork.
    pub fn is_balanced(&self) -> bool {
        self.acquires == self.releases && self.holder.is_none()
    }

    /// At no point did two guards coexist.
    pub fn is_exclusive(&self) -> bool {
        self.peak_holders <= 1
    }
}

#[derive(Debug)]
struct Shared {
    holder: AtomicUsize,
    stats: ForkStats,
}

/// An exclusively-lockable fork shared by two neighbouring philosophers.
#[derive(Debug)]
pub struct Fork {
    index: usize,
    lock: Arc<Mutex<()>>,
    shared: Arc<Shared>,
}

impl Fork {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lock: Arc::new(Mutex::new(())),
            shared: Arc::new(Shared {
                holder: AtomicUsize::new(NO_HOLDER),
                stats: ForkStats::default(),
            }),
        }
    }

    pub fn snapshot(&self) -> ForkSnapshot {
        let stats = &self.shared.stats;
        ForkSnapshot {
            index: self.index,
            holder: self.holder(),
            acquires: stats.acquires.load(Ordering::SeqCst),
            releases: stats.releases.load(Ordering::SeqCst),
            timeouts: stats.timeouts.load(Ordering::SeqCst),
            peak_holders: stats.peak_holders.load(Ordering::SeqCst),
        }
    }

    fn grant(&self, holder: usize, permit: OwnedMutexGuard<()>) -> ForkGuard {
        self.shared.holder.store(holder, Ordering::SeqCst);
        self.shared.stats.record_acquire();
        trace!(fork = self.index, holder, "Fork acquired");
        ForkGuard {
            index: self.index,
            holder,
            shared: Arc::clone(&self.shared),
            _permit: permit,
        }
    }
}

#[async_trait]
impl ExclusiveResource for Fork {
    type Guard = ForkGuard;

    fn index(&self) -> usize {
        self.index
    }

    async fn acquire(&self, holder: usize, timeout: Duration) -> Result<ForkGuard, ForkError> {
        match tokio::time::timeout(timeout, Arc::clone(&self.lock).lock_owned()).await {
            Ok(permit) => Ok(self.grant(holder, permit)),
            Err(_) => {
                self.shared.stats.record_timeout();
                Err(ForkError::TimedOut {
                    fork: self.index,
                    timeout,
                })
            }
        }
    }

    fn try_acquire(&self, holder: usize) -> Result<ForkGuard, ForkError> {
        match Arc::clone(&self.lock).try_lock_owned() {
            Ok(permit) => Ok(self.grant(holder, permit)),
            Err(_) => Err(ForkError::Busy {
                fork: self.index,
                holder: self.holder(),
            }),
        }
    }

    fn holder(&self) -> Option<usize> {
        match self.shared.holder.load(Ordering::SeqCst) {
            NO_HOLDER => None,
            holder => Some(holder),
        }
    }
}

/// Scoped hold on a [`Fork`]. The fork is released when the guard drops.
#[derive(Debug)]
pub struct ForkGuard {
    index: usize,
    holder: usize,
    shared: Arc<Shared>,
    // Dropped after `Drop::drop` runs, so counters settle before the next waiter wakes.
    _permit: OwnedMutexGuard<()>,
}

impl ForkGuard {
    pub fn holder(&self) -> usize {
        self.holder
    }
}

impl ResourceGuard for ForkGuard {
    fn resource(&self) -> usize {
        self.index
    }
}

impl Drop for ForkGuard {
    fn drop(&mut self) {
        self.shared.holder.store(NO_HOLDER, Ordering::SeqCst);
        self.shared.stats.record_release();
        trace!(fork = self.index, holder = self.holder, "Fork released");
    }
}
