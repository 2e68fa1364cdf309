//! Capped exponential-backoff retries.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// How often and how patiently to retry a failing operation.
///
/// After the `n`-th failure the policy waits `base_delay * 2^(n-1)`, capped at
/// `max_delay`, then tries again, for at most `max_retries` retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay after the first failure.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with a 30 second delay cap.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(30),
        }
    }

    /// A policy that never waits; for tests and local endpoints.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Set the upper bound for a single delay.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// The delay after the `failures`-th consecutive failure (1-based).
    pub fn delay_for_attempt(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }

    /// Run `op` until it succeeds or the retries are used up.
    ///
    /// Returns the last error when every attempt failed.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut failures = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if failures < self.max_retries => {
                    failures += 1;
                    let delay = self.delay_for_attempt(failures);
                    debug!(failures, ?delay, error = %e, "retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    /// 15 retries starting at 500 ms.
    fn default() -> Self {
        Self::new(15, Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_delay_doubles_until_cap() {
        let policy = RetryPolicy::new(15, Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(7), Duration::from_secs(30));
        assert_eq!(policy.delay_for_attempt(15), Duration::from_secs(30));
    }

    #[test]
    fn test_immediate_never_waits() {
        let policy = RetryPolicy::immediate(3);
        assert_eq!(policy.delay_for_attempt(3), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_run_succeeds_after_failures() {
        let calls = Cell::new(0);
        let result: Result<u32, String> = RetryPolicy::immediate(5)
            .run(|| {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { if n < 3 { Err(format!("fail {}", n)) } else { Ok(n) } }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_max_retries() {
        let calls = Cell::new(0);
        let result: Result<(), String> = RetryPolicy::immediate(15)
            .run(|| {
                calls.set(calls.get() + 1);
                async { Err("down".to_string()) }
            })
            .await;

        assert_eq!(result, Err("down".to_string()));
        assert_eq!(calls.get(), 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_backs_off() {
        let start = tokio::time::Instant::now();
        let result: Result<(), &str> = RetryPolicy::new(2, Duration::from_secs(1))
            .run(|| async { Err("down") })
            .await;

        assert!(result.is_err());
        // 1s after the first failure, 2s after the second.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }
}
