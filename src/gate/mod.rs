//! Confidence gate: decides whether the top retrieval candidate can answer
//! without the disambiguator.
//!
//! Pure and total over the ranked candidate slice. Thresholds default to the
//! crate constants and are carried in [`GateThresholds`] so the evaluation
//! harness can sweep them.

use crate::constants::{MARGIN_MIN, SCORE_MIN};
use crate::model::Candidate;

/// Tunable acceptance thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateThresholds {
    /// Minimum top-1 score.
    pub score_min: f32,
    /// Minimum top1-top2 gap.
    pub margin_min: f32,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            score_min: SCORE_MIN,
            margin_min: MARGIN_MIN,
        }
    }
}

/// Score gap between the top two candidates.
///
/// `NEG_INFINITY` when fewer than two candidates exist: a lone candidate has
/// no measurable separation and must never pass the gate on its own.
pub fn margin(candidates: &[Candidate]) -> f32 {
    match candidates {
        [top1, top2, ..] => top1.score - top2.score,
        _ => f32::NEG_INFINITY,
    }
}

/// Returns `true` iff the ranked candidates clear both thresholds.
///
/// Expects `candidates` ordered descending by score, as the retriever client
/// guarantees.
pub fn is_confident(candidates: &[Candidate], thresholds: GateThresholds) -> bool {
    let Some(top1) = candidates.first() else {
        return false;
    };

    top1.score >= thresholds.score_min && margin(candidates) >= thresholds.margin_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FaqId;

    fn candidate(score: f32) -> Candidate {
        Candidate {
            faq_id: FaqId::random(),
            slug: "fixture".to_string(),
            question: "q".to_string(),
            answer_md: "a".to_string(),
            score,
        }
    }

    #[test]
    fn test_empty_is_never_confident() {
        assert!(!is_confident(&[], GateThresholds::default()));
    }

    #[test]
    fn test_single_candidate_at_score_min_is_not_confident() {
        // Margin is undefined with one candidate; the gate must not accept.
        let candidates = [candidate(0.45)];
        assert_eq!(margin(&candidates), f32::NEG_INFINITY);
        assert!(!is_confident(&candidates, GateThresholds::default()));
    }

    #[test]
    fn test_single_strong_candidate_still_not_confident() {
        assert!(!is_confident(&[candidate(0.99)], GateThresholds::default()));
    }

    #[test]
    fn test_wide_margin_is_confident() {
        let candidates = [candidate(0.50), candidate(0.30)];
        assert!((margin(&candidates) - 0.20).abs() < f32::EPSILON);
        assert!(is_confident(&candidates, GateThresholds::default()));
    }

    #[test]
    fn test_narrow_margin_is_not_confident() {
        let candidates = [candidate(0.50), candidate(0.45)];
        assert!(!is_confident(&candidates, GateThresholds::default()));
    }

    #[test]
    fn test_margin_exactly_at_threshold_is_confident() {
        let candidates = [candidate(0.57), candidate(0.45)];
        assert!(is_confident(&candidates, GateThresholds::default()));
    }

    #[test]
    fn test_low_top_score_fails_despite_margin() {
        let candidates = [candidate(0.40), candidate(0.10)];
        assert!(!is_confident(&candidates, GateThresholds::default()));
    }

    #[test]
    fn test_margin_ignores_tail_candidates() {
        let candidates = [candidate(0.80), candidate(0.20), candidate(0.19)];
        assert!((margin(&candidates) - 0.60).abs() < f32::EPSILON);
    }

    #[test]
    fn test_custom_thresholds_override_defaults() {
        let candidates = [candidate(0.50), candidate(0.45)];
        let loose = GateThresholds {
            score_min: 0.30,
            margin_min: 0.01,
        };
        assert!(is_confident(&candidates, loose));
    }
}
