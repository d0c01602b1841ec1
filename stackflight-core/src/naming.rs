//! Stack name generation.

use chrono::Local;

/// Generate a unique stack name from a prefix.
///
/// Appends the current local time with nanosecond precision
/// (`{prefix}-{weekday}-{HHMMSS}{nanos}`), so back-to-back calls within one
/// run never collide. Pure function of the clock and the input.
pub fn stack_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Local::now().format("%a-%H%M%S%9f"))
}
