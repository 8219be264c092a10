//! Golden-set replay: one sequential pass, one [`EvalReport`].

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use super::classify::classify;
use super::golden::GoldenSet;
use super::types::{EvalReport, LatencyPercentiles, MissRecord};
use crate::resolver::Resolver;
use crate::retriever::SearchBackend;
use crate::selector::Selector;

/// Replays a golden set through one resolver.
///
/// Cases run sequentially so wall-clock percentiles are reproducible. A
/// failing case degrades inside the resolver and is recorded as a classified
/// miss; the batch never aborts.
pub struct EvalRunner<'a, B: SearchBackend, S: Selector> {
    resolver: &'a Resolver<B, S>,
    golden: &'a GoldenSet,
}

impl<'a, B: SearchBackend, S: Selector> EvalRunner<'a, B, S> {
    pub fn new(resolver: &'a Resolver<B, S>, golden: &'a GoldenSet) -> Self {
        Self { resolver, golden }
    }

    /// Runs every case and builds the report.
    pub async fn run(&self) -> EvalReport {
        let mut durations = Vec::with_capacity(self.golden.len());
        let mut misses = Vec::new();
        let mut correct = 0usize;

        for case in self.golden.cases() {
            let started = Instant::now();
            let (outcome, trace) = self.resolver.resolve_traced(&case.q).await;
            durations.push(started.elapsed());

            if outcome.faq_id() == Some(&case.expected_faq_id) {
                correct += 1;
                debug!(query = %case.q, tier = outcome.tier(), "golden case ok");
                continue;
            }

            let root_cause = classify(&case.expected_faq_id, &outcome, &trace);
            debug!(
                query = %case.q,
                expected = %case.expected_faq_id,
                outcome = %outcome,
                ?root_cause,
                "golden case missed"
            );

            misses.push(MissRecord {
                query: case.q.clone(),
                expected: case.expected_faq_id,
                predicted: outcome.faq_id().copied(),
                tier: outcome.tier(),
                root_cause,
            });
        }

        let total = self.golden.len();
        let exact_at1 = if total == 0 {
            1.0
        } else {
            correct as f64 / total as f64
        };

        info!(total, correct, exact_at1, "golden run complete");

        EvalReport {
            generated_at: Utc::now(),
            total,
            correct,
            exact_at1,
            latency: LatencyPercentiles::from_durations(&durations),
            misses,
        }
    }

    /// Correct-count only, skipping latency and miss bookkeeping. The
    /// ablation loop calls this many times per table.
    pub async fn count_correct(&self) -> usize {
        let mut correct = 0usize;
        for case in self.golden.cases() {
            let outcome = self.resolver.resolve(&case.q).await;
            if outcome.faq_id() == Some(&case.expected_faq_id) {
                correct += 1;
            }
        }
        correct
    }
}
