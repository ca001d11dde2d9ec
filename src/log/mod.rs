//! Logging and observability
//!
//! Append-only JSONL history of emitted ticks.

pub mod jsonl;

pub use jsonl::{JsonlLogger, TickRecord};
