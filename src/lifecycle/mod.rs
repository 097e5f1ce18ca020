//! # Table Lifecycle & Orchestration
//!
//! This module owns everything that happens *around* the philosophers: validating the
//! configuration, laying out the forks, spawning one task per seat, and tearing the
//! whole table down again.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - [`TableConfig`] with defaults, builders and validation
//! 2. **Actor Creation** - Seat every philosopher with its fixed fork pair
//! 3. **Lifecycle Management** - Spawn the tasks, await bounded runs
//! 4. **Teardown** - Abort every task and check the forks came back
//! 5. **Observability Setup** - [`setup_tracing`]
//!
//! ## Teardown
//!
//! Philosophers never stop on their own in an unbounded run, and a philosopher blocked
//! on a fork receives no cancellation signal. [`DiningTable::shutdown`] therefore
//! aborts the tasks. Aborting drops the task's future, which drops any fork guard it
//! holds, which releases the fork. After shutdown every fork is free and its acquire
//! and release counters match.

pub mod config;
pub mod error;
pub mod table;
pub mod tracing;

pub use self::tracing::*;
pub use config::*;
pub use error::*;
pub use table::*;
