//! The sequencer itself
//!
//! Implements the per-tick algorithm: validate parameters, resolve the
//! state key, apply resets, compute the reported cycle, produce the value
//! for the mode, and persist the advanced state. Validation completes
//! before the store is touched, so a failed tick never mutates state.

use rand::Rng;

use crate::sequencer::error::SequenceError;
use crate::sequencer::key::resolve_state_key;
use crate::sequencer::params::{Mode, TickParams};
use crate::sequencer::range::{cycle_len, validate_step, NormalizedRange};
use crate::sequencer::store::StateStore;

/// The output of one tick: the value and the completed-cycle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The produced value, always within the normalized range
    pub value: i64,
    /// Completed full traversals of the range since the last reset
    pub cycle: u64,
}

/// A stateful cyclic-value generator.
///
/// Owns a [`StateStore`] mapping state-keys to counter state. Hosts call
/// [`next`](Self::next) once per tick; sequences are isolated or shared
/// across callers according to the resolved state key.
#[derive(Debug, Default)]
pub struct Sequencer {
    store: StateStore,
}

impl Sequencer {
    /// Create a sequencer with an empty state store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The state store, exposed for inspection (e.g. in tests or a
    /// diagnostics command). Ticks go through [`next`](Self::next).
    #[must_use]
    pub const fn store(&self) -> &StateStore {
        &self.store
    }

    /// Whether the output of [`next`](Self::next) may be cached by the
    /// host. Always `false`: the result depends on hidden counter state,
    /// so identical parameters do not imply an identical result.
    #[must_use]
    pub const fn output_is_cacheable(&self) -> bool {
        false
    }

    /// Produce the next value and cycle count for the given parameters,
    /// drawing randomness from the thread-local RNG.
    ///
    /// # Errors
    /// Returns a [`SequenceError`] when the range, step, or derived cycle
    /// length is invalid. No state is written on error.
    pub fn next(&self, params: &TickParams) -> Result<Tick, SequenceError> {
        self.next_with_rng(params, &mut rand::thread_rng())
    }

    /// Like [`next`](Self::next), but with an explicit RNG so randomize
    /// mode can be driven deterministically.
    pub fn next_with_rng<R: Rng + ?Sized>(
        &self,
        params: &TickParams,
        rng: &mut R,
    ) -> Result<Tick, SequenceError> {
        // All validation happens before the store is touched.
        let range = NormalizedRange::new(params.start, params.end)?;
        let step = validate_step(params.step)?;
        let cycle_len = cycle_len(params.mode, &range, step)?;
        let key = resolve_state_key(&params.group_key, params.caller_id.as_deref());

        let tick = self.store.update(&key, |state| {
            if params.reset {
                state.position = 0;
                state.cycle_offset = 0;
            }

            let raw_cycle = state.position / cycle_len;
            // Full reset wins when both flags are set: the partial reset
            // only applies while `reset` is false.
            if !params.reset && params.reset_cycle_only {
                state.cycle_offset = raw_cycle;
            }
            let cycle = raw_cycle.saturating_sub(state.cycle_offset);

            let value = match params.mode {
                Mode::Fixed => range.start(),
                Mode::Increment => {
                    let value = range.start() + walk_offset(state.position, step, &range);
                    state.position += 1;
                    value
                }
                Mode::Decrement => {
                    let value = range.end() - walk_offset(state.position, step, &range);
                    state.position += 1;
                    value
                }
                Mode::Randomize => {
                    let value = rng.gen_range(range.start()..=range.end());
                    state.position += 1;
                    value
                }
            };

            Tick { value, cycle }
        });

        Ok(tick)
    }
}

/// Offset of the stepping walk at `position`: `(position * step) mod span`.
///
/// The product is reduced modulo the span before and after multiplying,
/// with the multiplication widened to u128, so arbitrarily large positions
/// and spans cannot overflow.
#[allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
fn walk_offset(position: u64, step: u64, range: &NormalizedRange) -> i64 {
    // span() > 0 by construction; the final offset is < span <= i64::MAX.
    let span = range.span() as u64;
    let offset = (u128::from(position % span) * u128::from(step % span)) % u128::from(span);
    offset as i64
}
