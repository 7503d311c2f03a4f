//! Capped exponential backoff for stream reconnection.
//!
//! Pure state, no I/O: the stream client reads the current delay before
//! sleeping and advances the policy for the next failure. Any successful
//! connection resets the delay to its initial value.

use std::time::Duration;

use crate::config::RetryConfig;

/// Current retry delay, bounded between the configured initial and
/// maximum values.
///
/// The sequence produced by repeated [`advance`](Self::advance) calls is
/// non-decreasing and reaches the maximum in a finite, deterministic
/// number of steps.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    current: Duration,
    config: RetryConfig,
}

impl BackoffPolicy {
    /// Create a policy starting at the configured initial delay.
    ///
    /// Out-of-range parameters are clamped via [`RetryConfig::clamped`],
    /// so [`advance`](Self::advance) cannot panic or shrink the delay no
    /// matter what configuration reaches it.
    pub fn new(config: RetryConfig) -> Self {
        let config = config.clamped();
        Self {
            current: config.initial_delay(),
            config,
        }
    }

    /// Delay to wait before the next retry.
    pub fn current_delay(&self) -> Duration {
        self.current
    }

    /// Grow the delay for the next failure, capped at the maximum.
    pub fn advance(&mut self) {
        let grown = self.current.mul_f64(self.config.multiplier);
        self.current = grown.min(self.config.max_delay());
    }

    /// Reset to the initial delay after a successful connection.
    pub fn reset(&mut self) {
        self.current = self.config.initial_delay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(initial_ms: u64, max_ms: u64, multiplier: f64) -> BackoffPolicy {
        BackoffPolicy::new(RetryConfig {
            initial_delay_ms: initial_ms,
            max_delay_ms: max_ms,
            multiplier,
        })
    }

    #[test]
    fn sequence_is_non_decreasing_and_capped() {
        let mut backoff = policy(1_000, 30_000, 2.0);
        let mut previous = backoff.current_delay();
        for _ in 0..20 {
            backoff.advance();
            let next = backoff.current_delay();
            assert!(next >= previous);
            assert!(next <= Duration::from_millis(30_000));
            previous = next;
        }
    }

    #[test]
    fn doubles_until_the_cap_then_stabilizes() {
        let mut backoff = policy(1_000, 30_000, 2.0);
        let expected_ms = [2_000, 4_000, 8_000, 16_000, 30_000, 30_000, 30_000];
        for expected in expected_ms {
            backoff.advance();
            assert_eq!(backoff.current_delay(), Duration::from_millis(expected));
        }
    }

    #[test]
    fn reset_returns_to_initial_regardless_of_history() {
        let mut backoff = policy(1_000, 30_000, 2.0);
        for _ in 0..12 {
            backoff.advance();
        }
        backoff.reset();
        assert_eq!(backoff.current_delay(), Duration::from_millis(1_000));
    }

    #[test]
    fn initial_equal_to_max_stays_put() {
        let mut backoff = policy(5_000, 5_000, 3.0);
        backoff.advance();
        assert_eq!(backoff.current_delay(), Duration::from_millis(5_000));
    }

    #[test]
    fn hostile_parameters_never_panic_the_sequence() {
        let mut backoff = policy(0, 0, -2.0);
        assert_eq!(backoff.current_delay(), Duration::from_millis(1));
        for _ in 0..5 {
            backoff.advance();
            assert_eq!(backoff.current_delay(), Duration::from_millis(1));
        }

        let mut backoff = policy(1_000, 30_000, f64::NAN);
        backoff.advance();
        assert_eq!(backoff.current_delay(), Duration::from_millis(1_000));
    }
}
