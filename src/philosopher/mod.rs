//! The philosopher actor: a four-state machine that competes for its two forks.

pub mod actor;
pub mod error;

pub use actor::*;
pub use error::*;
