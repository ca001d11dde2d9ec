//! CLI output formatting
//!
//! Provides human-readable terminal display for tick runs, keeping stdout
//! clean for piping bare values.

pub mod display;

pub use display::TickDisplay;
