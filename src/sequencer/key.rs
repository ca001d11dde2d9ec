//! State-key resolution
//!
//! Decides the identity under which counter state is stored. A non-blank
//! group key shares one counter across every caller that supplies it; an
//! absent group key isolates callers by their own identity.

/// Prefix applied to shared group keys so they can never collide with a
/// caller identity of the same spelling.
const GROUP_PREFIX: &str = "GROUP::";

/// Sentinel key used when neither a group key nor a caller identity is
/// supplied.
const GLOBAL_KEY: &str = "GLOBAL";

/// Resolve the state key for one tick.
///
/// A `group_key` that is non-empty after trimming wins over the caller
/// identity, enabling cross-caller sharing. Otherwise the caller identity
/// is used as-is, falling back to a fixed global sentinel.
#[must_use]
pub fn resolve_state_key(group_key: &str, caller_id: Option<&str>) -> String {
    let trimmed = group_key.trim();
    if !trimmed.is_empty() {
        return format!("{GROUP_PREFIX}{trimmed}");
    }
    caller_id.map_or_else(|| GLOBAL_KEY.to_string(), ToString::to_string)
}
