//! Cyclic sequencer core
//!
//! Validation, state-key resolution, cycle-length derivation, and the
//! per-tick advance algorithm.

pub mod engine;
pub mod error;
pub mod key;
pub mod params;
pub mod range;
pub mod store;

pub use engine::{Sequencer, Tick};
pub use error::SequenceError;
pub use key::resolve_state_key;
pub use params::{Mode, TickParams};
pub use store::{CounterState, StateStore};
