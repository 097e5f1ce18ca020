//! Demo entry point: seats the default five philosophers for a short bounded run and
//! logs how it went.

use dining_philosophers::lifecycle::{setup_tracing, DiningTable, TableConfig};
use dining_philosophers::observer::TracingObserver;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = TableConfig::default().with_max_cycles(20);
    info!(?config, "Starting dinner");

    let table = DiningTable::start(config, Arc::new(TracingObserver)).map_err(|e| e.to_string())?;
    let forks = table.forks().clone();

    let results = table.join().await.map_err(|e| e.to_string())?;
    for result in results {
        match result {
            Ok(report) => info!(
                philosopher = report.index,
                meals = report.meals,
                timeouts = report.timeouts,
                "Philosopher finished"
            ),
            Err(e) => error!(error = %e, "Philosopher gave up"),
        }
    }

    for fork in forks.snapshot() {
        info!(
            fork = fork.index,
            acquires = fork.acquires,
            releases = fork.releases,
            timeouts = fork.timeouts,
            "Fork usage"
        );
    }

    if !forks.is_balanced() || !forks.is_exclusive() {
        return Err("fork accounting is inconsistent".to_string());
    }

    info!("Dinner completed successfully");
    Ok(())
}
