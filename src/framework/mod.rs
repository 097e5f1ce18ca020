//! Shared-resource layer of the table.
//!
//! This module provides the exclusive resources the philosophers compete for and
//! the rule that decides in which order they are taken.
//!
//! # Main Components
//!
//! - [`ExclusiveResource`] - Contract every lockable resource satisfies
//! - [`Fork`] - Instrumented Tokio-mutex implementation of that contract
//! - [`ForkRing`] - The fixed ring of forks around the table
//! - [`resources_for`] - The ascending-index acquisition policy
//! - [`ForkError`] - Timeout and busy errors

pub mod error;
pub mod fork;
pub mod policy;
pub mod resource;
pub mod ring;

// Re-export core types for convenience
pub use error::ForkError;
pub use fork::{Fork, ForkGuard, ForkSnapshot};
pub use policy::{neighbours, resources_for, AcquisitionOrder};
pub use resource::{ExclusiveResource, ResourceGuard};
pub use ring::ForkRing;
