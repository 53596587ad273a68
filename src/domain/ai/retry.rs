use std::time::Duration;

/// Per-provider retry policy, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per provider (at least one)
    pub max_retries: u32,
    /// Deadline applied to each attempt independently
    pub per_attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            per_attempt_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, per_attempt_timeout: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            per_attempt_timeout,
        }
    }

    /// Delay slept after failed attempt `attempt` (1-based): 2^attempt seconds
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(2u64.saturating_pow(attempt).saturating_mul(1000))
    }

    /// Whether another attempt follows `attempt` on the same provider
    pub fn has_next_attempt(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_in_seconds() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_for(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(8));
    }

    #[test]
    fn test_max_retries_floor() {
        let policy = RetryPolicy::new(0, Duration::from_secs(5));
        assert_eq!(policy.max_retries, 1);
        assert!(!policy.has_next_attempt(1));
    }

    #[test]
    fn test_has_next_attempt() {
        let policy = RetryPolicy::default();
        assert!(policy.has_next_attempt(1));
        assert!(policy.has_next_attempt(2));
        assert!(!policy.has_next_attempt(3));
    }
}
