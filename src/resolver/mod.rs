//! Resolution orchestrator: pins → retrieval → confidence gate → LLM.
//!
//! One query in, one [`ResolutionOutcome`] out, stateless across calls. The
//! orchestrator owns all degradation decisions: backend failures and
//! timeouts become `None` outcomes with the reason attached, never panics
//! and never fabricated answers.

pub mod types;


pub use types::{NoAnswerReason, ResolutionOutcome, ResolutionTrace};

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::constants::{DEFAULT_RETRIEVER_TIMEOUT, DEFAULT_SELECTOR_TIMEOUT, DEFAULT_TOP_K};
use crate::gate::{GateThresholds, is_confident, margin};
use crate::normalize::normalize;
use crate::pins::PinTable;
use crate::retriever::SearchBackend;
use crate::selector::Selector;

/// Orchestrator tunables. Defaults come from [`crate::constants`].
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    /// Candidates requested from the search backend.
    pub top_k: usize,
    /// Confidence-gate thresholds.
    pub thresholds: GateThresholds,
    /// Budget for the retriever call.
    pub retriever_timeout: Duration,
    /// Budget for the disambiguator call.
    pub selector_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            thresholds: GateThresholds::default(),
            retriever_timeout: DEFAULT_RETRIEVER_TIMEOUT,
            selector_timeout: DEFAULT_SELECTOR_TIMEOUT,
        }
    }
}

/// The tiered resolution pipeline.
///
/// Holds the immutable pin table plus the two injected collaborators. No
/// shared mutable state: concurrent resolutions need no locking, and
/// dropping an in-flight `resolve` future cancels whichever backend call is
/// running.
pub struct Resolver<B: SearchBackend, S: Selector> {
    pins: PinTable,
    backend: B,
    selector: S,
    config: ResolverConfig,
}

impl<B: SearchBackend, S: Selector> std::fmt::Debug for Resolver<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("pins", &self.pins.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<B: SearchBackend, S: Selector> Resolver<B, S> {
    /// Builds a resolver with default tunables.
    pub fn new(pins: PinTable, backend: B, selector: S) -> Self {
        Self::with_config(pins, backend, selector, ResolverConfig::default())
    }

    /// Builds a resolver with explicit tunables.
    pub fn with_config(pins: PinTable, backend: B, selector: S, config: ResolverConfig) -> Self {
        Self {
            pins,
            backend,
            selector,
            config,
        }
    }

    /// The pin table snapshot this resolver serves.
    pub fn pins(&self) -> &PinTable {
        &self.pins
    }

    /// The injected search backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The injected disambiguator.
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// The active tunables.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves one query to an outcome.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn resolve(&self, query: &str) -> ResolutionOutcome {
        self.resolve_traced(query).await.0
    }

    /// Resolves one query, also reporting the ground-truth trace the
    /// evaluation harness classifies misses from.
    pub async fn resolve_traced(&self, query: &str) -> (ResolutionOutcome, ResolutionTrace) {
        let mut trace = ResolutionTrace {
            normalized_query: normalize(query),
            ..Default::default()
        };

        if let Some((index, faq_id)) = self.pins.matches_traced(&trace.normalized_query) {
            debug!(rule = index, %faq_id, "pin hit");
            trace.pin_index = Some(index);
            return (ResolutionOutcome::Pinned { faq_id: *faq_id }, trace);
        }

        debug!("no pin matched, retrieving candidates");

        let candidates = match timeout(
            self.config.retriever_timeout,
            self.backend.search(&trace.normalized_query, self.config.top_k),
        )
        .await
        {
            Err(_) => {
                warn!(
                    budget_ms = self.config.retriever_timeout.as_millis() as u64,
                    "retriever timed out"
                );
                trace.retriever_failed = true;
                return (
                    ResolutionOutcome::None {
                        reason: NoAnswerReason::RetrieverFailed {
                            message: "timed out".to_string(),
                        },
                    },
                    trace,
                );
            }
            Ok(Err(e)) => {
                warn!(error = %e, "retriever failed");
                trace.retriever_failed = true;
                return (
                    ResolutionOutcome::None {
                        reason: NoAnswerReason::RetrieverFailed {
                            message: e.to_string(),
                        },
                    },
                    trace,
                );
            }
            Ok(Ok(candidates)) => candidates,
        };

        trace.candidates = candidates.clone();

        if is_confident(&candidates, self.config.thresholds) {
            // Gate passed: non-empty is guaranteed by the gate itself.
            let top1 = &candidates[0];
            info!(faq_id = %top1.faq_id, score = top1.score, "confident retrieval hit");
            return (
                ResolutionOutcome::Confident {
                    faq_id: top1.faq_id,
                    score: top1.score,
                    margin: margin(&candidates),
                },
                trace,
            );
        }

        if candidates.is_empty() {
            debug!("retriever returned no candidates");
            return (
                ResolutionOutcome::None {
                    reason: NoAnswerReason::NoConfidentMatch,
                },
                trace,
            );
        }

        debug!(
            candidates = candidates.len(),
            "gate rejected, asking disambiguator"
        );
        trace.selector_called = true;

        match timeout(
            self.config.selector_timeout,
            self.selector.pick(&trace.normalized_query, &candidates),
        )
        .await
        {
            Err(_) => {
                warn!(
                    budget_ms = self.config.selector_timeout.as_millis() as u64,
                    "selector timed out"
                );
                (
                    ResolutionOutcome::None {
                        reason: NoAnswerReason::SelectorFailed {
                            message: "timed out".to_string(),
                        },
                    },
                    trace,
                )
            }
            Ok(Err(e)) => {
                warn!(error = %e, "selector failed");
                (
                    ResolutionOutcome::None {
                        reason: NoAnswerReason::SelectorFailed {
                            message: e.to_string(),
                        },
                    },
                    trace,
                )
            }
            Ok(Ok(Some(faq_id))) => {
                info!(%faq_id, "disambiguated");
                (ResolutionOutcome::Disambiguated { faq_id }, trace)
            }
            Ok(Ok(None)) => {
                debug!("selector declined to pick");
                (
                    ResolutionOutcome::None {
                        reason: NoAnswerReason::NoConfidentMatch,
                    },
                    trace,
                )
            }
        }
    }
}
