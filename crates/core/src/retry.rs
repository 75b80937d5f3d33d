//! Backoff schedule for rate-limited calls.
//!
//! Only rate-limit-classified failures retry; every other class surfaces
//! immediately. The schedule doubles from `BASE_DELAY` on each failed
//! attempt (2, 4, 8, ...).

use std::time::Duration;

/// Maximum attempts for a rate-limited call.
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay after the first rate-limited attempt; doubles per attempt.
pub const BASE_DELAY: Duration = Duration::from_secs(2);

/// Delay to wait after `attempt` failed attempts (zero-based).
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.pow(attempt)
}
