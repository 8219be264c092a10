//! Offline evaluation harness: golden-set regression, miss triage, and
//! pin-table ablation.
//!
//! Consumes the resolver as a black box, off the hot path. Nothing here runs
//! during live resolution.

pub mod ablation;
pub mod classify;
pub mod error;
pub mod golden;
pub mod runner;
pub mod types;

#[cfg(test)]
mod tests;

pub use ablation::{ablate, prune_redundant};
pub use classify::classify;
pub use error::GoldenSetError;
pub use golden::{GoldenCase, GoldenSet};
pub use runner::EvalRunner;
pub use types::{AblationResult, EvalReport, LatencyPercentiles, MissRecord, RootCause};
