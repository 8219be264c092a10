//! Pinpoint library crate (used by the guard/eval binaries and integration
//! tests).
//!
//! Resolves one free-text support question to exactly one canonical FAQ id,
//! or to "no confident answer", through a tiered cascade: deterministic pin
//! rules, hybrid retrieval behind a confidence gate, then a
//! constrained-output LLM disambiguator.
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`FaqId`], [`Candidate`] - Shared data model
//! - [`PinTable`], [`PinRule`], [`PinError`] - Deterministic routing tier
//! - [`Resolver`], [`ResolutionOutcome`], [`NoAnswerReason`] - The pipeline
//!
//! ## Collaborator Boundaries
//! - [`SearchBackend`], [`HybridSearchClient`], [`RetrieverError`] - Hybrid search
//! - [`Selector`], [`LlmSelector`], [`SelectorError`] - LLM disambiguation
//!
//! ## Offline Tooling
//! - [`EvalRunner`], [`EvalReport`], [`RootCause`] - Golden-set regression
//! - [`ablate`], [`prune_redundant`], [`AblationResult`] - Pin ablation
//! - [`guard`] - Static table checks for CI
//!
//! ## Constants
//! Gate thresholds, the candidate budget, and the rule ceiling live in
//! [`constants`] so the evaluation harness can discover and override them.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod eval;
pub mod gate;
pub mod guard;
pub mod model;
pub mod normalize;
pub mod pins;
pub mod resolver;
pub mod retriever;
pub mod selector;

pub use config::{Config, ConfigError, DEFAULT_MODEL, DEFAULT_SEARCH_URL};
pub use constants::{
    DEFAULT_MAX_RULES, DEFAULT_TOP_K, EVAL_P50_SLA, MARGIN_MIN, MAX_PATTERN_CHARS, SCORE_MIN,
};
pub use eval::{
    AblationResult, EvalReport, EvalRunner, GoldenCase, GoldenSet, GoldenSetError,
    LatencyPercentiles, MissRecord, RootCause, ablate, prune_redundant,
};
pub use gate::{GateThresholds, is_confident, margin};
pub use guard::{GuardError, GuardReport, check_file, check_table};
pub use model::{Candidate, FaqId};
pub use normalize::normalize;
pub use pins::{PinError, PinRule, PinTable};
pub use resolver::{NoAnswerReason, ResolutionOutcome, ResolutionTrace, Resolver, ResolverConfig};
#[cfg(any(test, feature = "mock"))]
pub use retriever::MockSearchBackend;
pub use retriever::{HybridSearchClient, RetrieverError, SearchBackend, sanitize_candidates};
#[cfg(any(test, feature = "mock"))]
pub use selector::MockSelector;
pub use selector::{LlmSelector, Selector, SelectorError, parse_verdict, render_prompt};
