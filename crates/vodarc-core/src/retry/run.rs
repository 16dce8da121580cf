//! Retry loop: run a closure until success or policy says stop.

use std::fmt;

use super::policy::{RetryDecision, RetryPolicy, Retryable};

/// Value produced by the attempt that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Succeeded<T> {
    pub value: T,
    /// Attempts used, including the successful one.
    pub attempts: u32,
}

/// Last error seen once the policy gave up.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub last_error: E,
    pub attempts: u32,
}

impl<E: fmt::Display> fmt::Display for Exhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed after {} attempt(s): {}", self.attempts, self.last_error)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Exhausted<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// Runs `f` until it succeeds or the retry policy says to stop.
/// `f` receives the 1-based attempt number. On retryable failure, sleeps for the
/// policy delay then tries again.
pub fn run_with_retry<T, E, F>(policy: &RetryPolicy, mut f: F) -> Result<Succeeded<T>, Exhausted<E>>
where
    E: Retryable + fmt::Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(value) => {
                return Ok(Succeeded {
                    value,
                    attempts: attempt,
                })
            }
            Err(e) => match policy.decide(attempt, e.kind()) {
                RetryDecision::NoRetry => {
                    return Err(Exhausted {
                        last_error: e,
                        attempts: attempt,
                    })
                }
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(attempt, max = policy.max_attempts, "attempt failed: {}; retrying in {:?}", e, d);
                    if !d.is_zero() {
                        std::thread::sleep(d);
                    }
                    attempt += 1;
                }
            },
        }
    }
}
