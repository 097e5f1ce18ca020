//! # Philosopher Actor
//!
//! One philosopher is one Tokio task running [`Philosopher::run`]. It owns its state
//! outright; the rest of the world only learns about it through the events it hands
//! to its [`TableObserver`].
//!
//! ## The Cycle
//!
//! ```text
//! Thinking --(think delay)--> WaitingFirst --(first fork)--> WaitingSecond
//!     ^                                                            |
//!     +--(release second, then first)-- Eating <--(second fork)---+
//! ```
//!
//! The philosopher keeps its first fork while blocked on the second. Deadlock
//! freedom comes from the fixed global order of the pair, not from backing off.
//!
//! ## Suspension Points
//!
//! The task only yields at the think sleep, the eat sleep and the two acquisitions.
//! Everything between them is a state change plus one synchronous `notify`.
//!
//! ## Timeouts
//!
//! Fork guards are locals of [`Philosopher::dine`], so a failed acquisition drops the
//! already-held fork on its way out. The `TimedOut` event is emitted only after that,
//! so no observer ever sees a philosopher report a timeout while still holding a fork.

use super::error::PhilosopherError;
use crate::domain::{HaltReason, PhilosopherState, TableEvent};
use crate::framework::{ExclusiveResource, Fork, ForkRing, ResourceGuard};
use crate::lifecycle::{DurationRange, TableConfig, TimeoutPolicy};
use crate::observer::TableObserver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Summary returned by a philosopher that halted after its configured meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhilosopherReport {
    pub index: usize,
    pub meals: u64,
    pub timeouts: u64,
}

/// A single seat at the table.
///
/// Generic over the resource primitive so the state machine can run against any
/// [`ExclusiveResource`]; the table itself always uses [`Fork`].
pub struct Philosopher<R: ExclusiveResource = Fork> {
    index: usize,
    state: PhilosopherState,
    first: Arc<R>,
    second: Arc<R>,
    think: DurationRange,
    eat: DurationRange,
    timeout: Duration,
    on_timeout: TimeoutPolicy,
    max_cycles: Option<u64>,
    rng: ChaCha8Rng,
    observer: Arc<dyn TableObserver>,
    meals: u64,
    timeouts: u64,
}

impl Philosopher<Fork> {
    /// Seats philosopher `index` at `ring`, taking its forks in `config.order`.
    pub fn seat(
        index: usize,
        ring: &ForkRing,
        config: &TableConfig,
        observer: Arc<dyn TableObserver>,
    ) -> Self {
        Self::new(index, ring.pair_for(index, config.order), config, observer)
    }
}

impl<R: ExclusiveResource> Philosopher<R> {
    /// Builds a philosopher that takes `forks.0` then `forks.1`.
    ///
    /// The pair is fixed for the philosopher's whole life.
    pub fn new(
        index: usize,
        forks: (Arc<R>, Arc<R>),
        config: &TableConfig,
        observer: Arc<dyn TableObserver>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let (first, second) = forks;
        Self {
            index,
            state: PhilosopherState::Thinking,
            first,
            second,
            think: config.think,
            eat: config.eat,
            timeout: config.acquire_timeout(),
            on_timeout: config.on_timeout,
            max_cycles: config.max_cycles,
            rng,
            observer,
            meals: 0,
            timeouts: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> PhilosopherState {
        self.state
    }

    /// `(first, second)` fork indices in acquisition order.
    pub fn forks(&self) -> (usize, usize) {
        (self.first.index(), self.second.index())
    }

    /// Runs the think/eat cycle.
    ///
    /// Never returns unless `max_cycles` is set or a timeout hits under
    /// [`TimeoutPolicy::Abort`]. An unbounded table is stopped by aborting the task,
    /// which drops any held guard and so releases the forks.
    pub async fn run(mut self) -> Result<PhilosopherReport, PhilosopherError> {
        let (first, second) = self.forks();
        info!(philosopher = self.index, first, second, "Philosopher seated");
        self.emit(TableEvent::StateChanged {
            philosopher: self.index,
            state: self.state,
        });

        loop {
            if self.max_cycles.is_some_and(|max| self.meals >= max) {
                info!(philosopher = self.index, meals = self.meals, "Done eating");
                self.emit(TableEvent::Halted {
                    philosopher: self.index,
                    reason: HaltReason::CyclesCompleted,
                });
                return Ok(self.report());
            }

            let think = self.think.sample(&mut self.rng);
            tokio::time::sleep(think).await;

            if let Err(err) = self.dine().await {
                self.record_failure(&err);

                let recoverable = matches!(err, PhilosopherError::AcquisitionTimeout { .. });
                if recoverable && self.on_timeout == TimeoutPolicy::Restart {
                    warn!(philosopher = self.index, error = %err, "Back to thinking");
                    self.reset();
                    continue;
                }

                warn!(philosopher = self.index, error = %err, "Leaving the table");
                self.emit(TableEvent::Halted {
                    philosopher: self.index,
                    reason: HaltReason::AcquisitionTimeout,
                });
                return Err(err);
            }
        }
    }

    /// One pass from `Thinking` through `Eating` and back.
    async fn dine(&mut self) -> Result<(), PhilosopherError> {
        self.advance(); // WaitingFirst
        let first = self.take(&self.first).await?;

        self.advance(); // WaitingSecond
        let second = self.take(&self.second).await?;

        self.advance(); // Eating
        let eat = self.eat.sample(&mut self.rng);
        tokio::time::sleep(eat).await;

        second.release();
        first.release();
        self.meals += 1;
        self.advance(); // Thinking
        Ok(())
    }

    async fn take(&self, fork: &Arc<R>) -> Result<R::Guard, PhilosopherError> {
        fork.acquire(self.index, self.timeout)
            .await
            .map_err(|e| PhilosopherError::from_fork(self.index, self.state, e))
    }

    /// Moves to the single legal successor state and reports it.
    fn advance(&mut self) {
        self.state = self.state.next();
        debug!(philosopher = self.index, state = %self.state, "Transition");
        self.emit(TableEvent::StateChanged {
            philosopher: self.index,
            state: self.state,
        });
    }

    /// Returns to `Thinking` after an aborted cycle. Only valid with no forks held.
    fn reset(&mut self) {
        self.state = PhilosopherState::Thinking;
        self.emit(TableEvent::StateChanged {
            philosopher: self.index,
            state: self.state,
        });
    }

    /// Counts and reports a failed cycle. Only timeouts are counted and reported.
    fn record_failure(&mut self, err: &PhilosopherError) {
        if let PhilosopherError::AcquisitionTimeout { fork, state, .. } = *err {
            self.timeouts += 1;
            self.emit(TableEvent::TimedOut {
                philosopher: self.index,
                fork,
                state,
            });
        }
    }

    fn emit(&self, event: TableEvent) {
        self.observer.notify(&event);
    }

    fn report(&self) -> PhilosopherReport {
        PhilosopherReport {
            index: self.index,
            meals: self.meals,
            timeouts: self.timeouts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ForkError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn recorder() -> (Arc<dyn TableObserver>, Arc<Mutex<Vec<TableEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let observer: Arc<dyn TableObserver> =
            Arc::new(move |event: &TableEvent| sink.lock().unwrap().push(*event));
        (observer, events)
    }

    fn quick_config() -> TableConfig {
        TableConfig::default()
            .with_philosophers(2)
            .with_think(DurationRange::millis(1, 3))
            .with_eat(DurationRange::millis(1, 3))
            .with_seed(7)
    }

    /// A resource nobody can ever get.
    struct Unobtainable(usize);

    struct NeverGranted;

    impl ResourceGuard for NeverGranted {
        fn resource(&self) -> usize {
            unreachable!("never granted")
        }
    }

    #[async_trait]
    impl ExclusiveResource for Unobtainable {
        type Guard = NeverGranted;

        fn index(&self) -> usize {
            self.0
        }

        async fn acquire(&self, _holder: usize, timeout: Duration) -> Result<NeverGranted, ForkError> {
            tokio::time::sleep(timeout).await;
            Err(ForkError::TimedOut {
                fork: self.0,
                timeout,
            })
        }

        fn try_acquire(&self, holder: usize) -> Result<NeverGranted, ForkError> {
            Err(ForkError::Busy {
                fork: self.0,
                holder: Some(holder),
            })
        }

        fn holder(&self) -> Option<usize> {
            None
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_run_emits_full_cycles() {
        let ring = ForkRing::new(2);
        let (observer, events) = recorder();
        let config = quick_config().with_max_cycles(3);

        let report = Philosopher::seat(1, &ring, &config, observer)
            .run()
            .await
            .unwrap();
        assert_eq!(report.meals, 3);
        assert_eq!(report.timeouts, 0);

        let events = events.lock().unwrap();
        let states: Vec<_> = events.iter().filter_map(|e| e.state()).collect();
        let mut expected = vec![PhilosopherState::Thinking];
        for _ in 0..3 {
            expected.extend([
                PhilosopherState::WaitingFirst,
                PhilosopherState::WaitingSecond,
                PhilosopherState::Eating,
                PhilosopherState::Thinking,
            ]);
        }
        assert_eq!(states, expected);
        assert_eq!(
            events.last(),
            Some(&TableEvent::Halted {
                philosopher: 1,
                reason: HaltReason::CyclesCompleted
            })
        );
        assert!(ring.is_balanced());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_on_first_fork_timeout() {
        let (observer, events) = recorder();
        let config = quick_config().with_timeout_policy(TimeoutPolicy::Abort);
        let forks = (Arc::new(Unobtainable(0)), Arc::new(Unobtainable(1)));

        let err = Philosopher::new(0, forks, &config, observer)
            .run()
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PhilosopherError::AcquisitionTimeout {
                philosopher: 0,
                fork: 0,
                state: PhilosopherState::WaitingFirst,
                timeout: config.acquire_timeout(),
            }
        );

        let events = events.lock().unwrap();
        assert_eq!(
            events.as_slice(),
            &[
                TableEvent::StateChanged {
                    philosopher: 0,
                    state: PhilosopherState::Thinking
                },
                TableEvent::StateChanged {
                    philosopher: 0,
                    state: PhilosopherState::WaitingFirst
                },
                TableEvent::TimedOut {
                    philosopher: 0,
                    fork: 0,
                    state: PhilosopherState::WaitingFirst
                },
                TableEvent::Halted {
                    philosopher: 0,
                    reason: HaltReason::AcquisitionTimeout
                },
            ]
        );
    }

    #[test]
    fn test_only_timeouts_are_counted_and_reported() {
        let ring = ForkRing::new(2);
        let (observer, events) = recorder();
        let mut philosopher = Philosopher::seat(0, &ring, &quick_config(), observer);

        philosopher.record_failure(&PhilosopherError::Resource {
            philosopher: 0,
            source: ForkError::Busy {
                fork: 1,
                holder: Some(1),
            },
        });
        assert_eq!(philosopher.report().timeouts, 0);
        assert!(events.lock().unwrap().is_empty());

        philosopher.record_failure(&PhilosopherError::AcquisitionTimeout {
            philosopher: 0,
            fork: 1,
            state: PhilosopherState::WaitingSecond,
            timeout: Duration::from_millis(5),
        });
        assert_eq!(philosopher.report().timeouts, 1);
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[TableEvent::TimedOut {
                philosopher: 0,
                fork: 1,
                state: PhilosopherState::WaitingSecond
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_releases_first_fork_before_reporting() {
        let ring = ForkRing::new(2);
        // Philosopher 0 takes fork 0 then fork 1; keep fork 1 away from it.
        let blocker = ring.get(1).unwrap().try_acquire(99).unwrap();

        let fork0 = Arc::clone(ring.get(0).unwrap());
        let observer = {
            let fork0 = Arc::clone(&fork0);
            move |event: &TableEvent| {
                if let TableEvent::TimedOut { .. } = event {
                    assert_eq!(fork0.holder(), None, "fork 0 still held at timeout report");
                }
            }
        };

        let config = quick_config()
            .with_acquire_timeout(Duration::from_millis(100))
            .with_timeout_policy(TimeoutPolicy::Restart);
        let philosopher = Philosopher::seat(0, &ring, &config, Arc::new(observer));
        let handle = tokio::spawn(philosopher.run());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(fork0.snapshot().timeouts, 0);
        assert!(ring.get(1).unwrap().snapshot().timeouts >= 2);

        drop(blocker);
        handle.abort();
        let _ = handle.await;
        assert!(ring.is_balanced());
        assert!(ring.is_exclusive());
    }
}
