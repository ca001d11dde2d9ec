//! Counter state storage
//!
//! One `CounterState` per state-key, held in a single table behind a
//! mutex. The original kept this as ambient class-level state; here the
//! store is an explicit object with its own lifecycle so ownership and
//! test isolation are visible (each test builds its own store).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-key counter state.
///
/// `position` counts total advances and only moves backward on a full
/// reset. `cycle_offset` is the raw-cycle value currently treated as zero
/// for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Total advances recorded for this key
    pub position: u64,
    /// Raw-cycle value redefined as "zero" by the last partial reset
    pub cycle_offset: u64,
}

/// Table of counter states, keyed by resolved state-key.
///
/// All access goes through [`update`](Self::update), which holds the table
/// lock for the whole read-modify-write so concurrent ticks on the same
/// key can never lose an advance.
#[derive(Debug, Default)]
pub struct StateStore {
    entries: Mutex<HashMap<String, CounterState>>,
}

impl StateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CounterState>> {
        // Counter state stays consistent even if a holder panicked, so a
        // poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the state for `key`, creating it lazily with
    /// zeroed fields on first use. The table lock is held for the whole
    /// call, making the read-modify-write atomic per key.
    pub fn update<T>(&self, key: &str, f: impl FnOnce(&mut CounterState) -> T) -> T {
        let mut entries = self.lock();
        let state = entries.entry(key.to_string()).or_default();
        f(state)
    }

    /// Snapshot the state for `key`, if any tick has touched it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<CounterState> {
        self.lock().get(key).copied()
    }

    /// Number of keys with recorded state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no key has recorded state yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_state_created_lazily_with_zeroed_fields() {
        let store = StateStore::new();
        assert!(store.get("a").is_none());

        let seen = store.update("a", |state| *state);
        assert_eq!(seen, CounterState::default());
        assert_eq!(store.get("a"), Some(CounterState::default()));
    }

    #[test]
    fn test_update_persists_mutation() {
        let store = StateStore::new();
        store.update("a", |state| {
            state.position = 5;
            state.cycle_offset = 2;
        });
        let state = store.get("a").unwrap();
        assert_eq!(state.position, 5);
        assert_eq!(state.cycle_offset, 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = StateStore::new();
        store.update("a", |state| state.position = 3);
        store.update("b", |state| state.position = 9);
        assert_eq!(store.get("a").unwrap().position, 3);
        assert_eq!(store.get("b").unwrap().position, 9);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_is_empty() {
        let store = StateStore::new();
        assert!(store.is_empty());
        store.update("a", |_| ());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_concurrent_updates_never_lose_an_advance() {
        let store = Arc::new(StateStore::new());
        let threads: u64 = 8;
        let per_thread: u64 = 200;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..per_thread {
                        store.update("shared", |state| state.position += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            store.get("shared").unwrap().position,
            threads * per_thread
        );
    }
}
