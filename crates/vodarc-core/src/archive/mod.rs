//! Run orchestration: fetch the catalog, filter, plan, download, audit.
//!
//! Records are processed strictly one after another. Every record reaches a
//! terminal outcome before the next one starts, and all outcomes are tallied
//! into a single `RunSummary` owned by the caller.

mod outcome;
mod run;

pub use outcome::{RecordOutcome, RunSummary};
pub use run::{Archiver, RunReport};
