//! # Fork Ring
//!
//! The fixed, ordered set of forks laid around the table. Built once at startup and
//! never resized. Forks are handed out as `Arc<Fork>` so each is shared by reference
//! between its two neighbours for the lifetime of the run.

use crate::framework::fork::{Fork, ForkSnapshot};
use crate::framework::policy::AcquisitionOrder;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ForkRing {
    forks: Vec<Arc<Fork>>,
}

impl ForkRing {
    /// Lays out `n` forks indexed `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            forks: (0..n).map(|i| Arc::new(Fork::new(i))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Fork>> {
        self.forks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Fork>> {
        self.forks.iter()
    }

    /// The `(first, second)` forks philosopher `philosopher` takes under `order`.
    ///
    /// `philosopher` must be below [`len`](Self::len) and the ring must hold at least
    /// two forks; both are checked by config validation before any seat is built.
    pub fn pair_for(&self, philosopher: usize, order: AcquisitionOrder) -> (Arc<Fork>, Arc<Fork>) {
        let (first, second) = order.order(philosopher, self.forks.len());
        (
            Arc::clone(&self.forks[first]),
            Arc::clone(&self.forks[second]),
        )
    }

    pub fn snapshot(&self) -> Vec<ForkSnapshot> {
        self.forks.iter().map(|f| f.snapshot()).collect()
    }

    /// Every fork is free and has seen as many releases as acquires.
    pub fn is_balanced(&self) -> bool {
        self.forks.iter().all(|f| f.snapshot().is_balanced())
    }

    /// No fork ever had two holders at once.
    pub fn is_exclusive(&self) -> bool {
        self.forks.iter().all(|f| f.snapshot().is_exclusive())
    }
}
