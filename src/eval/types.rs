use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::FaqId;

/// Root cause assigned to a golden-set miss.
///
/// Diagnostic labels for offline triage, not runtime errors. Assigned from
/// the resolution trace (ground truth), never inferred from output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCause {
    /// No pin fired and retrieval will not surface the expected id; a new
    /// pin is the fix.
    MissingPin,
    /// The pipeline's pick is plausibly correct; the fixture label is
    /// suspect.
    WrongExpected,
    /// A pin fired but routed to the wrong id; its pattern over-matches.
    PinTooBroad,
    /// The retriever failed, timed out, or returned nothing.
    RetrieverFail,
    /// The expected id was offered and the selector picked wrong or
    /// declined.
    SelectorReject,
}

/// One mismatched golden case.
#[derive(Debug, Clone, Serialize)]
pub struct MissRecord {
    /// The query as typed in the fixture.
    pub query: String,
    /// The labeled id.
    pub expected: FaqId,
    /// What the pipeline produced, if anything.
    pub predicted: Option<FaqId>,
    /// Tier that produced the outcome.
    pub tier: &'static str,
    /// Assigned root cause.
    pub root_cause: RootCause,
}

/// Wall-clock latency percentiles over one run, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencyPercentiles {
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
}

impl LatencyPercentiles {
    /// Nearest-rank percentiles over the observed durations. All zeros for
    /// an empty run.
    pub fn from_durations(durations: &[Duration]) -> Self {
        let mut sorted: Vec<Duration> = durations.to_vec();
        sorted.sort();

        let at = |q: f64| -> u64 {
            if sorted.is_empty() {
                return 0;
            }
            let rank = (q * sorted.len() as f64).ceil() as usize;
            sorted[rank.clamp(1, sorted.len()) - 1].as_millis() as u64
        };

        Self {
            p50_ms: at(0.50),
            p90_ms: at(0.90),
            p99_ms: at(0.99),
        }
    }
}

/// Result of replaying the golden set through the resolver.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Cases replayed.
    pub total: usize,
    /// Cases resolved to the labeled id.
    pub correct: usize,
    /// `correct / total` (1.0 for an empty fixture, which counts as clean).
    pub exact_at1: f64,
    /// Wall-clock percentiles over all cases.
    pub latency: LatencyPercentiles,
    /// Every mismatch, classified.
    pub misses: Vec<MissRecord>,
}

impl EvalReport {
    /// Returns `true` if every case resolved to its label.
    pub fn is_clean(&self) -> bool {
        self.misses.is_empty()
    }

    /// Returns `true` if the median latency stays within `budget`.
    pub fn meets_sla(&self, budget: Duration) -> bool {
        u128::from(self.latency.p50_ms) <= budget.as_millis()
    }
}

/// Per-rule ablation measurement.
#[derive(Debug, Clone, Serialize)]
pub struct AblationResult {
    /// Rule position in the table.
    pub index: usize,
    /// The rule's pattern, for the report.
    pub pattern: String,
    /// The rule's target.
    pub faq_id: FaqId,
    /// Correct-count drop when this rule is removed. Negative means the rule
    /// actively costs correctness.
    pub impact: i64,
}

impl AblationResult {
    /// Returns `true` if removing the rule changes nothing.
    pub fn is_redundant(&self) -> bool {
        self.impact == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_percentiles_empty() {
        let p = LatencyPercentiles::from_durations(&[]);
        assert_eq!(p.p50_ms, 0);
        assert_eq!(p.p99_ms, 0);
    }

    #[test]
    fn test_percentiles_single_sample() {
        let p = LatencyPercentiles::from_durations(&[ms(40)]);
        assert_eq!(p, LatencyPercentiles { p50_ms: 40, p90_ms: 40, p99_ms: 40 });
    }

    #[test]
    fn test_percentiles_nearest_rank() {
        let durations: Vec<Duration> = (1..=100).map(ms).collect();
        let p = LatencyPercentiles::from_durations(&durations);
        assert_eq!(p.p50_ms, 50);
        assert_eq!(p.p90_ms, 90);
        assert_eq!(p.p99_ms, 99);
    }

    #[test]
    fn test_percentiles_unsorted_input() {
        let p = LatencyPercentiles::from_durations(&[ms(300), ms(10), ms(20)]);
        assert_eq!(p.p50_ms, 20);
        assert_eq!(p.p99_ms, 300);
    }

    #[test]
    fn test_root_cause_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RootCause::MissingPin).unwrap(),
            "\"missing_pin\""
        );
        assert_eq!(
            serde_json::to_string(&RootCause::SelectorReject).unwrap(),
            "\"selector_reject\""
        );
    }
}
