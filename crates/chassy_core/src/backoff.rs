//! Exponential backoff for transient fetch failures.
//!
//! The retry helper is policy-only: it never logs on its own. Callers pass
//! an observer that is invoked once per failed attempt, before the delay.

use std::future::Future;
use std::time::Duration;

/// Exponential backoff policy applied within one poll tick.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Factor applied to the delay after each failed attempt.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            initial_delay: Duration::from_secs(2),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor)
    }
}

/// Run `op` until it succeeds or the policy's attempt budget is spent.
///
/// `on_retry` observes every failed attempt that will be retried, together
/// with the delay about to be applied. The error of the final attempt is
/// returned as-is; attempts are strictly sequential.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
    mut on_retry: impl FnMut(u32, &E, Duration),
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                on_retry(attempt, &err, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn delays_double_from_two_seconds()  {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (1..6).map(|a| policy.delay_after(a).as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8, 16, 32]);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_a_later_attempt_within_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let op_calls = calls.clone();

        let result = retry_with_backoff(
            &RetryPolicy::default(),
            move || {
                let calls = op_calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 3 {
                        Err("transient")
                    } else {
                        Ok("snapshot")
                    }
                }
            },
            |_, _, _| {},
        )
        .await;

        assert_eq!(result, Ok("snapshot"));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_the_last_error_once_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let op_calls = calls.clone();

        let result: Result<(), String> = retry_with_backoff(
            &RetryPolicy::default(),
            move || {
                let calls = op_calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(format!("attempt {n} failed"))
                }
            },
            |_, _, _| {},
        )
        .await;

        assert_eq!(result, Err("attempt 6 failed".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn observer_sees_every_retried_attempt_with_its_delay() {
        let mut observed = Vec::new();

        let result: Result<(), &str> = retry_with_backoff(
            &RetryPolicy {
                max_attempts: 4,
                ..RetryPolicy::default()
            },
            || async { Err("down") },
            |attempt, _err, delay| observed.push((attempt, delay.as_secs())),
        )
        .await;

        assert!(result.is_err());
        // The final attempt is not retried, so it is not observed.
        assert_eq!(observed, vec![(1, 2), (2, 4), (3, 8)]);
    }
}
