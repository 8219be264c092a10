//! Exact miss classification from the resolution trace.
//!
//! The trace reports which tier produced the outcome and which candidates
//! were observed, so every branch here is a fact about the run, not a guess
//! from output shape.

use super::types::RootCause;
use crate::model::FaqId;
use crate::resolver::{ResolutionOutcome, ResolutionTrace};

/// Assigns the root cause for one mismatched case.
///
/// Only call for mismatches; a correct case has no root cause.
pub fn classify(
    expected: &FaqId,
    outcome: &ResolutionOutcome,
    trace: &ResolutionTrace,
) -> RootCause {
    // A pin fired and we are classifying a miss: the pattern over-matched.
    if trace.pin_index.is_some() {
        return RootCause::PinTooBroad;
    }

    // Retrieval never produced a usable candidate list.
    if trace.retriever_failed || trace.candidates.is_empty() {
        return RootCause::RetrieverFail;
    }

    // Ranking surfaced other ids but never the labeled one: no downstream
    // tier could have answered correctly, only a pin can.
    if !trace.saw_candidate(expected) {
        return RootCause::MissingPin;
    }

    // The labeled id was on the table. If the gate answered confidently with
    // a different id, the backend ranked that id clearly above the label, so
    // the label itself is suspect. Otherwise the selector tier had the
    // chance and picked wrong or declined.
    match outcome {
        ResolutionOutcome::Confident { .. } => RootCause::WrongExpected,
        _ => RootCause::SelectorReject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Candidate;
    use crate::resolver::NoAnswerReason;

    fn id(n: u128) -> FaqId {
        FaqId::new(uuid::Uuid::from_u128(n))
    }

    fn candidate(n: u128, score: f32) -> Candidate {
        Candidate {
            faq_id: id(n),
            slug: format!("faq-{n}"),
            question: "q".to_string(),
            answer_md: "a".to_string(),
            score,
        }
    }

    fn trace(
        pin_index: Option<usize>,
        candidates: Vec<Candidate>,
        retriever_failed: bool,
    ) -> ResolutionTrace {
        ResolutionTrace {
            normalized_query: "q".to_string(),
            pin_index,
            candidates,
            retriever_failed,
            selector_called: false,
        }
    }

    #[test]
    fn test_pin_miss_is_pin_too_broad() {
        let outcome = ResolutionOutcome::Pinned { faq_id: id(2) };
        let cause = classify(&id(1), &outcome, &trace(Some(0), vec![], false));
        assert_eq!(cause, RootCause::PinTooBroad);
    }

    #[test]
    fn test_retriever_error_is_retriever_fail() {
        let outcome = ResolutionOutcome::None {
            reason: NoAnswerReason::RetrieverFailed {
                message: "boom".to_string(),
            },
        };
        let cause = classify(&id(1), &outcome, &trace(None, vec![], true));
        assert_eq!(cause, RootCause::RetrieverFail);
    }

    #[test]
    fn test_empty_candidates_is_retriever_fail() {
        let outcome = ResolutionOutcome::None {
            reason: NoAnswerReason::NoConfidentMatch,
        };
        let cause = classify(&id(1), &outcome, &trace(None, vec![], false));
        assert_eq!(cause, RootCause::RetrieverFail);
    }

    #[test]
    fn test_expected_never_surfaced_is_missing_pin() {
        let outcome = ResolutionOutcome::None {
            reason: NoAnswerReason::NoConfidentMatch,
        };
        let observed = vec![candidate(2, 0.4), candidate(3, 0.3)];
        let cause = classify(&id(1), &outcome, &trace(None, observed, false));
        assert_eq!(cause, RootCause::MissingPin);
    }

    #[test]
    fn test_confident_over_label_is_wrong_expected() {
        let outcome = ResolutionOutcome::Confident {
            faq_id: id(2),
            score: 0.8,
            margin: 0.5,
        };
        let observed = vec![candidate(2, 0.8), candidate(1, 0.3)];
        let cause = classify(&id(1), &outcome, &trace(None, observed, false));
        assert_eq!(cause, RootCause::WrongExpected);
    }

    #[test]
    fn test_selector_wrong_pick_is_selector_reject() {
        let outcome = ResolutionOutcome::Disambiguated { faq_id: id(3) };
        let observed = vec![candidate(3, 0.4), candidate(1, 0.38)];
        let cause = classify(&id(1), &outcome, &trace(None, observed, false));
        assert_eq!(cause, RootCause::SelectorReject);
    }

    #[test]
    fn test_selector_decline_is_selector_reject() {
        let outcome = ResolutionOutcome::None {
            reason: NoAnswerReason::NoConfidentMatch,
        };
        let observed = vec![candidate(1, 0.4), candidate(2, 0.38)];
        let cause = classify(&id(1), &outcome, &trace(None, observed, false));
        assert_eq!(cause, RootCause::SelectorReject);
    }
}
