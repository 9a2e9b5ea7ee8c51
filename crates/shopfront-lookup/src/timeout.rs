//! Timeout configuration for lookup requests.

use std::time::Duration;

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total time for one attempt, including reading the body.
    pub total: Duration,
}

impl TimeoutConfig {
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout; connecting gets a quarter of it.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    pub fn from_millis(total_ms: u64) -> Self {
        Self::from_total(Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total() {
        let timeout = TimeoutConfig::from_millis(2000);
        assert_eq!(timeout.connect, Duration::from_millis(500));
        assert_eq!(timeout.total, Duration::from_secs(2));
    }
}
