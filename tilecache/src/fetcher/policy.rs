//! Retry policy for tile downloads.
//!
//! Only transient failures are retried (see
//! [`ProviderError::is_retryable`](crate::provider::ProviderError::is_retryable)).
//!
//! ```
//! use std::time::Duration;
//! use tilecache::fetcher::RetryPolicy;
//!
//! let policy = RetryPolicy::exponential(3);
//! assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(100)));
//! assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(200)));
//! assert_eq!(policy.delay_for_attempt(3), None);
//! ```

use std::time::Duration;

/// Default initial delay for exponential backoff (100ms).
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 100;

/// Default maximum delay for exponential backoff (10 seconds).
pub const DEFAULT_MAX_DELAY_SECS: u64 = 10;

/// Default multiplier for exponential backoff.
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Default number of attempts per tile, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How a tile download handles transient failures.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RetryPolicy {
    /// No retries - fail immediately on error.
    #[default]
    None,

    /// Fixed number of attempts with constant delay between them.
    Fixed {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay between attempts.
        delay: Duration,
    },

    /// Exponential backoff: the delay is multiplied after each failure, up
    /// to `max_delay`.
    ExponentialBackoff {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay after the first failure.
        initial_delay: Duration,
        /// Delay cap.
        max_delay: Duration,
        /// Multiplier applied after each failure (typically 2.0).
        multiplier: f64,
    },
}

impl RetryPolicy {
    /// Exponential backoff with the default delays.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Maximum number of attempts (including initial)
    pub fn exponential(max_attempts: u32) -> Self {
        Self::ExponentialBackoff {
            max_attempts,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_secs(DEFAULT_MAX_DELAY_SECS),
            multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }

    /// Fixed-delay retries.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::Fixed {
            max_attempts,
            delay,
        }
    }

    /// Policy for a configured attempt count: `None` for one attempt or
    /// fewer, exponential backoff otherwise.
    pub fn from_max_attempts(max_attempts: u32) -> Self {
        if max_attempts <= 1 {
            Self::None
        } else {
            Self::exponential(max_attempts)
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Returns `None` once `attempt` reaches the attempt limit.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Fixed {
                max_attempts,
                delay,
            } => (attempt < *max_attempts).then_some(*delay),
            Self::ExponentialBackoff {
                max_attempts,
                initial_delay,
                max_delay,
                multiplier,
            } => {
                if attempt >= *max_attempts {
                    return None;
                }
                let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let delay_ms = initial_delay.as_millis() as f64 * multiplier.powi(exponent);
                let capped = delay_ms.min(max_delay.as_millis() as f64);
                Some(Duration::from_millis(capped as u64))
            }
        }
    }

    /// Maximum number of attempts for this policy.
    pub fn max_attempts(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Fixed { max_attempts, .. } => *max_attempts,
            Self::ExponentialBackoff { max_attempts, .. } => *max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_retries() {
        let policy = RetryPolicy::None;
        assert_eq!(policy.delay_for_attempt(1), None);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_fixed_delay() {
        let policy = RetryPolicy::fixed(3, Duration::from_millis(50));
        assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(50)));
        assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(50)));
        assert_eq!(policy.delay_for_attempt(3), None);
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn test_exponential_growth_and_cap() {
        let policy = RetryPolicy::ExponentialBackoff {
            max_attempts: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            multiplier: 2.0,
        };
        assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(100)));
        assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(200)));
        assert_eq!(policy.delay_for_attempt(3), Some(Duration::from_millis(400)));
        assert_eq!(policy.delay_for_attempt(4), Some(Duration::from_millis(500)));
        assert_eq!(policy.delay_for_attempt(9), Some(Duration::from_millis(500)));
        assert_eq!(policy.delay_for_attempt(10), None);
    }

    #[test]
    fn test_from_max_attempts() {
        assert_eq!(RetryPolicy::from_max_attempts(0), RetryPolicy::None);
        assert_eq!(RetryPolicy::from_max_attempts(1), RetryPolicy::None);
        assert_eq!(RetryPolicy::from_max_attempts(4).max_attempts(), 4);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::None);
    }
}
