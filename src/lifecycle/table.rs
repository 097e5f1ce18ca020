use super::config::TableConfig;
use super::error::TableError;
use crate::framework::{ForkRing, ForkSnapshot};
use crate::observer::TableObserver;
use crate::philosopher::{Philosopher, PhilosopherError, PhilosopherReport};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, warn, Instrument};

/// Outcome of one philosopher's task.
pub type SeatResult = Result<PhilosopherReport, PhilosopherError>;

/// The runtime orchestrator for a dining-philosophers run.
///
/// `DiningTable` is responsible for:
/// - **Validation**: Rejecting bad configurations before anything starts
/// - **Setup**: Laying out the fork ring and seating one philosopher per fork
/// - **Lifecycle Management**: Spawning one Tokio task per philosopher and tearing
///   them all down at the end
///
/// # Example
///
/// ```rust
/// use dining_philosophers::lifecycle::{DiningTable, TableConfig};
/// use dining_philosophers::observer::NullObserver;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let config = TableConfig::default().with_max_cycles(2);
///     let table = DiningTable::start(config, Arc::new(NullObserver)).unwrap();
///     for seat in table.join().await.unwrap() {
///         assert_eq!(seat.unwrap().meals, 2);
///     }
/// }
/// ```
pub struct DiningTable {
    config: TableConfig,
    forks: ForkRing,

    /// Task handles, indexed by philosopher.
    handles: Vec<JoinHandle<SeatResult>>,
}

impl DiningTable {
    /// Validates `config`, lays out the forks and starts every philosopher.
    ///
    /// Must be called from within a Tokio runtime. Nothing is spawned if the
    /// configuration is rejected.
    pub fn start(
        config: TableConfig,
        observer: Arc<dyn TableObserver>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        if !config.order.is_deadlock_free() {
            warn!(order = ?config.order, "Acquisition order admits circular wait");
        }

        let forks = ForkRing::new(config.philosophers);
        let handles = (0..config.philosophers)
            .map(|index| {
                let philosopher = Philosopher::seat(index, &forks, &config, Arc::clone(&observer));
                let span = info_span!("philosopher", index);
                tokio::spawn(philosopher.run().instrument(span))
            })
            .collect();

        info!(
            philosophers = config.philosophers,
            order = ?config.order,
            on_timeout = ?config.on_timeout,
            max_cycles = ?config.max_cycles,
            "Table started"
        );

        Ok(Self {
            config,
            forks,
            handles,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn forks(&self) -> &ForkRing {
        &self.forks
    }

    /// Waits for every philosopher to finish.
    ///
    /// Only returns for bounded runs (`max_cycles`) or once every philosopher has
    /// aborted on a timeout. Results are indexed by philosopher.
    ///
    /// If a task panics, the philosophers not yet joined are aborted before the error
    /// is returned, so none of them keeps holding forks afterwards.
    pub async fn join(self) -> Result<Vec<SeatResult>, TableError> {
        let mut results = Vec::with_capacity(self.handles.len());
        let mut handles = self.handles.into_iter().enumerate();
        while let Some((philosopher, handle)) = handles.next() {
            match handle.await {
                Ok(result) => results.push(result),
                Err(source) => {
                    error!(philosopher, error = %source, "Philosopher task failed");
                    for (_, rest) in handles {
                        rest.abort();
                    }
                    return Err(TableError::Join {
                        philosopher,
                        source,
                    });
                }
            }
        }
        info!("All philosophers have left the table");
        Ok(results)
    }

    /// Tears the table down.
    ///
    /// Aborts every philosopher task, waits for them to unwind (which drops and so
    /// releases any held fork), and returns the final fork counters.
    pub async fn shutdown(self) -> Vec<ForkSnapshot> {
        info!("Shutting down table...");

        for handle in &self.handles {
            handle.abort();
        }
        for (philosopher, handle) in self.handles.into_iter().enumerate() {
            // Cancellation is the expected outcome here.
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!(philosopher, error = %e, "Philosopher task panicked");
                }
            }
        }

        let snapshot = self.forks.snapshot();
        info!(balanced = self.forks.is_balanced(), "Table shutdown complete.");
        snapshot
    }
}
