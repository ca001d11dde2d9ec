//! Sequencer error types
//!
//! All sequencer failures are configuration errors raised synchronously
//! before any counter state is touched. Each variant carries the offending
//! parameter values so hosts can report them verbatim.

use std::fmt;

/// A validation failure for one `next()` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The mode string is not one of the four recognized modes.
    InvalidMode {
        /// The rejected mode string, as supplied
        mode: String,
    },
    /// The normalized range has a non-positive span (only reachable via
    /// arithmetic overflow, since normalization swaps the endpoints).
    InvalidRange {
        /// Supplied range start
        start: i64,
        /// Supplied range end
        end: i64,
    },
    /// The step is zero or negative.
    InvalidStep {
        /// The rejected step
        step: i64,
    },
    /// The derived cycle length is non-positive. Unreachable after range
    /// and step validation, kept as a guard.
    InvalidCycleLength {
        /// Normalized span
        span: i64,
        /// Validated step
        step: i64,
    },
}

impl SequenceError {
    /// Stable category name, usable by hosts to discriminate error kinds
    /// without matching on message text.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMode { .. } => "InvalidMode",
            Self::InvalidRange { .. } => "InvalidRange",
            Self::InvalidStep { .. } => "InvalidStep",
            Self::InvalidCycleLength { .. } => "InvalidCycleLength",
        }
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode { mode } => write!(
                f,
                "invalid mode '{mode}': expected one of fixed, increment, decrement, randomize"
            ),
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range: start={start}, end={end}")
            }
            Self::InvalidStep { step } => {
                write!(f, "invalid step: {step} (must be a positive integer)")
            }
            Self::InvalidCycleLength { span, step } => {
                write!(f, "invalid cycle length derived from span={span}, step={step}")
            }
        }
    }
}

impl std::error::Error for SequenceError {}
