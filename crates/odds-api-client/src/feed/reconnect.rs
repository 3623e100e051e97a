//! Reconnection policy with bounded exponential backoff.

use std::time::Duration;

/// Decides whether and when to retry after an unexpected close.
///
/// Delays grow as `base * 2^(attempt - 1)`, capped at `max_delay`.
/// Once `max_attempts` retries have been scheduled the policy gives up
/// and the feed surfaces a terminal error.
#[derive(Debug)]
pub struct ReconnectPolicy {
    base_delay: Duration,
    max_delay: Duration,
    max_attempts: u32,
    attempt: u32,
}

impl ReconnectPolicy {
    /// Creates a policy with the given delay bounds and attempt budget.
    #[must_use]
    pub const fn new(base_delay: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_delay,
            max_attempts,
            attempt: 0,
        }
    }

    /// Delay before the next retry, or `None` once the attempt budget
    /// is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }
        self.attempt += 1;

        let factor = 1u32.checked_shl(self.attempt - 1).unwrap_or(u32::MAX);
        let delay = self
            .base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay);
        Some(delay.min(self.max_delay))
    }

    /// Resets the attempt counter after a successful open.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Retries scheduled since the last successful open.
    #[must_use]
    pub const fn current_attempt(&self) -> u32 {
        self.attempt
    }

    /// Configured attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(30), 10)
    }
}
