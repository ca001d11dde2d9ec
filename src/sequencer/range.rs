//! Range normalization and cycle-length derivation
//!
//! A range is normalized so `start <= end`, giving an inclusive span of at
//! least one value. The cycle length is the true period of the stepping
//! walk: stepping by `step` modulo `span` visits `span / gcd(span, step)`
//! distinct residues before the sequence repeats.

use crate::sequencer::error::SequenceError;
use crate::sequencer::params::Mode;

/// An inclusive integer range with `start <= end` and a positive span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRange {
    start: i64,
    end: i64,
    span: i64,
}

impl NormalizedRange {
    /// Normalize a range, swapping the endpoints when supplied in
    /// descending order.
    ///
    /// # Errors
    /// Returns `InvalidRange` when the span is not representable or not
    /// positive. After the swap this is only reachable through overflow
    /// (e.g. `i64::MIN..=i64::MAX`), which checked arithmetic catches.
    pub fn new(start: i64, end: i64) -> Result<Self, SequenceError> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let span = end
            .checked_sub(start)
            .and_then(|width| width.checked_add(1))
            .filter(|span| *span > 0)
            .ok_or(SequenceError::InvalidRange { start, end })?;
        Ok(Self { start, end, span })
    }

    /// Lowest value in the range.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Highest value in the range.
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Count of distinct values in the range; always >= 1.
    #[must_use]
    pub const fn span(&self) -> i64 {
        self.span
    }
}

/// Validate the advance magnitude, returning it as unsigned.
///
/// # Errors
/// Returns `InvalidStep` when `step <= 0`.
pub fn validate_step(step: i64) -> Result<u64, SequenceError> {
    u64::try_from(step)
        .ok()
        .filter(|s| *s > 0)
        .ok_or(SequenceError::InvalidStep { step })
}

/// Derive the cycle length for a mode over a normalized range.
///
/// Increment and decrement walk residues modulo the span, so their period
/// is `span / gcd(span, step)`. Fixed and randomize have no natural period
/// from stepping; every `span` advances counts as one loop so the cycle
/// counter still progresses at a predictable cadence.
///
/// # Errors
/// Returns `InvalidCycleLength` if the derived length is zero. Unreachable
/// after range and step validation, kept as a guard.
pub fn cycle_len(mode: Mode, range: &NormalizedRange, step: u64) -> Result<u64, SequenceError> {
    #[allow(clippy::cast_sign_loss)] // span() > 0 by construction
    let span = range.span() as u64;
    let len = match mode {
        Mode::Increment | Mode::Decrement => span / gcd(span, step),
        Mode::Fixed | Mode::Randomize => span,
    };
    if len == 0 {
        return Err(SequenceError::InvalidCycleLength {
            span: range.span(),
            step: i64::try_from(step).unwrap_or(i64::MAX),
        });
    }
    Ok(len)
}

/// Greatest common divisor by Euclid's algorithm.
const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
