//! Retry policies for lookup requests.

use std::time::Duration;

use crate::LookupError;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt);
                base.saturating_mul(factor).min(*max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(200),
            max: Duration::from_secs(2),
        }
    }
}

/// How many times, and how patiently, a failed lookup is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Whether to retry after `error` on attempt `attempt` (0-indexed).
    ///
    /// Only transient failures are retried: a 4xx answer or an unreadable
    /// body won't change on a second try.
    pub fn should_retry(&self, error: &LookupError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(350),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(350));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(350));
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::new(2);
        let timeout = LookupError::Timeout("slow".into());
        let bad_request = LookupError::Http {
            status: 400,
            url: "http://x".into(),
        };

        assert!(policy.should_retry(&timeout, 0));
        assert!(policy.should_retry(&timeout, 1));
        assert!(!policy.should_retry(&timeout, 2));
        assert!(!policy.should_retry(&bad_request, 0));
        assert!(!RetryPolicy::none().should_retry(&timeout, 0));
    }
}
