//! Pure data types shared by philosophers and observers: the state machine states and
//! the events emitted on every transition.

pub mod event;
pub mod state;

pub use event::*;
pub use state::*;
