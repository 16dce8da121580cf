use std::time::Duration;

/// High-level classification of an error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The action ran and reported failure (e.g. nonzero exit); may succeed next time.
    Transient,
    /// Retrying cannot help (e.g. the program could not be started at all).
    Permanent,
}

/// Implemented by error types that `run_with_retry` can classify.
pub trait Retryable {
    fn kind(&self) -> ErrorKind;
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay policy with an attempt cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy that never sleeps; used by dry runs and tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    /// `attempt` is 1-based (1 = first attempt). Returns `RetryDecision::NoRetry`
    /// when we should stop retrying.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Permanent => RetryDecision::NoRetry,
            ErrorKind::Transient => RetryDecision::RetryAfter(self.delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_retry_for_permanent() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Permanent), RetryDecision::NoRetry);
    }

    #[test]
    fn delay_is_fixed() {
        let p = RetryPolicy {
            max_attempts: 10,
            delay: Duration::from_secs(5),
        };
        for attempt in 1..10 {
            assert_eq!(
                p.decide(attempt, ErrorKind::Transient),
                RetryDecision::RetryAfter(Duration::from_secs(5))
            );
        }
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(
            p.decide(1, ErrorKind::Transient),
            RetryDecision::RetryAfter(_)
        ));
        assert!(matches!(
            p.decide(2, ErrorKind::Transient),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Transient), RetryDecision::NoRetry);
    }

    #[test]
    fn single_attempt_policy_never_retries() {
        let p = RetryPolicy::immediate(1);
        assert_eq!(p.decide(1, ErrorKind::Transient), RetryDecision::NoRetry);
    }
}
