//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Every philosopher task runs inside a `philosopher{index=N}` span, so each line shows
//! which seat it came from.
//!
//! ## What Gets Traced
//!
//! - **Table Lifecycle**: start (with the effective configuration), join, shutdown
//! - **Philosophers**: seating (with the fork pair), halts, timeouts
//! - **Transitions**: every state change at `debug`
//! - **Forks**: every acquire and release at `trace`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every state transition
//! RUST_LOG=debug cargo run
//!
//! # Individual fork acquisitions as well
//! RUST_LOG=trace cargo run
//!
//! # Only the philosopher actor
//! RUST_LOG=dining_philosophers::philosopher=debug cargo run
//! ```
//!
//! ## Output Format
//!
//! The compact format shows the span inline:
//!
//! ```text
//! INFO philosopher{index=0}: Philosopher seated first=0 second=4
//! WARN philosopher{index=3}: Back to thinking error=Philosopher 3 timed out after 5s waiting for fork 3 (waiting_second)
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Spans already say which philosopher is talking
        .compact()
        .init();
}
