//! Retry with a fixed delay between attempts.
//!
//! One abstraction for every retryable action: the caller supplies the action,
//! the policy supplies the attempt bound and delay, and the error type says
//! whether a failure is worth another attempt.

mod policy;
mod run;

pub use policy::{ErrorKind, RetryDecision, RetryPolicy, Retryable};
pub use run::{run_with_retry, Exhausted, Succeeded};
