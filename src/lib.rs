//! Tickseq - stateful cyclic integer sequencer
//!
//! Tickseq produces deterministic or randomized integer sequences over a
//! range, one value per tick, tracking how many full traversals of the
//! range have completed. Counter state lives in an in-process store keyed
//! by caller identity or a shared group key.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod log;
pub mod sequencer;

// Re-export commonly used types
pub use cli::TickDisplay;
pub use config::{GlobalConfig, SequenceConfig, TickseqConfig};
pub use log::{JsonlLogger, TickRecord};
pub use sequencer::{
    resolve_state_key, CounterState, Mode, SequenceError, Sequencer, StateStore, Tick, TickParams,
};
