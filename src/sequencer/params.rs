//! Invocation parameters
//!
//! Parameters are supplied fresh on every tick and never persisted; only
//! the counter state behind the resolved state-key survives between calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sequencer::error::SequenceError;

/// How the sequencer advances the value on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Always return the range start; the position does not advance.
    Fixed,
    /// Walk upward from the range start, stepping modulo the span.
    Increment,
    /// Walk downward from the range end, stepping modulo the span.
    Decrement,
    /// Return a uniformly random value in the range on every tick.
    Randomize,
}

impl Mode {
    /// The lowercase name used in configuration and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Randomize => "randomize",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SequenceError;

    /// Parse a mode name. Surrounding whitespace and letter case are
    /// ignored, so `" Increment "` parses the same as `"increment"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "increment" => Ok(Self::Increment),
            "decrement" => Ok(Self::Decrement),
            "randomize" => Ok(Self::Randomize),
            _ => Err(SequenceError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Everything the host supplies for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickParams {
    /// Advance mode for this tick
    pub mode: Mode,
    /// Range start (any order relative to `end`; normalized internally)
    pub start: i64,
    /// Range end
    pub end: i64,
    /// Advance magnitude per tick; must be >= 1
    pub step: i64,
    /// Shared state-key hint. When non-blank, all callers supplying the
    /// same string share one counter regardless of caller identity.
    pub group_key: String,
    /// Opaque per-caller identity used as the state key when `group_key`
    /// is blank. `None` maps to the global sentinel key.
    pub caller_id: Option<String>,
    /// Full reset: zero the position and cycle offset before computing.
    pub reset: bool,
    /// Partial reset: redefine the current cycle as zero without touching
    /// the position. Ignored when `reset` is also set.
    pub reset_cycle_only: bool,
}

impl Default for TickParams {
    /// Defaults match the original controller widget: increment over
    /// `0..=6` with step 1, no sharing, no reset.
    fn default() -> Self {
        Self {
            mode: Mode::Increment,
            start: 0,
            end: 6,
            step: 1,
            group_key: String::new(),
            caller_id: None,
            reset: false,
            reset_cycle_only: false,
        }
    }
}
