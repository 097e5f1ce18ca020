#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Dining Philosophers
//!
//! > **Ordered lock acquisition for actors that share exclusive resources.**
//!
//! `N` philosophers sit around a table with one fork between each pair of neighbours.
//! Each philosopher is an independent Tokio task that thinks, picks up both adjacent
//! forks, eats, puts them down, and starts over. This crate is the coordination core
//! of that simulation: the fork primitive, the acquisition policy, the per-philosopher
//! state machine, and the lifecycle that runs them.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a Fixed Acquisition Order?
//!
//! Deadlock needs a cycle of actors each holding one resource and waiting for the next.
//! Every philosopher here takes its two forks in ascending index order (see
//! [`resources_for`](framework::resources_for)), so all waits point "upwards" and no
//! cycle can form. The philosopher keeps its first fork while it waits for the second;
//! there is no release-and-retry, and therefore no livelock.
//!
//! ### Why Guards?
//!
//! A fork is released when its guard drops. Normal completion, a timeout on the other
//! fork, and a task abort during teardown all run the same drop, so a philosopher can
//! never leave the table holding a fork.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Resource Seam
//! [`Philosopher<R>`](philosopher::Philosopher) is generic over
//! [`ExclusiveResource`](framework::ExclusiveResource). The table uses the instrumented
//! [`Fork`](framework::Fork); tests plug in resources that never grant, to drive the
//! timeout paths deterministically.
//!
//! ### Events, not Shared State
//! Philosophers share nothing but forks. What they do is visible only through the
//! [`TableEvent`](domain::TableEvent)s they hand to a
//! [`TableObserver`](observer::TableObserver).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Resources ([`framework`])
//! - **Role**: The fork primitive, the ring of forks, and the acquisition policy.
//! - **Key items**: [`Fork`](framework::Fork), [`ForkRing`](framework::ForkRing),
//!   [`resources_for`](framework::resources_for).
//!
//! ### 2. The Actor ([`philosopher`])
//! - **Role**: The four-state think/eat machine and its timeout handling.
//! - **Key items**: [`Philosopher`](philosopher::Philosopher),
//!   [`PhilosopherError`](philosopher::PhilosopherError).
//!
//! ### 3. The Vocabulary ([`domain`])
//! - **Role**: States and events.
//!
//! ### 4. The Sinks ([`observer`])
//! - **Role**: Where events go: logs, channels, closures.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, startup, join and teardown.
//! - **Key items**: [`DiningTable`](lifecycle::DiningTable),
//!   [`TableConfig`](lifecycle::TableConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with lifecycle logs
//! RUST_LOG=info cargo run
//!
//! # Watch every transition
//! RUST_LOG=debug cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod domain;
pub mod framework;
pub mod lifecycle;
pub mod observer;
pub mod philosopher;
