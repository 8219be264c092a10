use serde::Serialize;

use crate::model::{Candidate, FaqId};

/// Why the pipeline produced no answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoAnswerReason {
    /// The pipeline completed normally and found nothing trustworthy. A valid
    /// terminal outcome, not an error.
    NoConfidentMatch,
    /// The search backend failed or timed out; the pipeline does not guess.
    RetrieverFailed {
        /// Failure detail for logging.
        message: String,
    },
    /// The disambiguator failed or timed out; never degraded to a fabricated
    /// pick.
    SelectorFailed {
        /// Failure detail for logging.
        message: String,
    },
}

/// Terminal result of one resolution call.
///
/// Closed variant set: every consumer must handle all four cases. The
/// variant itself names the tier that produced the answer, so downstream
/// diagnosis never infers the tier from output shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ResolutionOutcome {
    /// A pin rule matched; retrieval and the LLM were never called.
    Pinned {
        /// Target of the winning rule.
        faq_id: FaqId,
    },
    /// The top retrieval candidate cleared the confidence gate.
    Confident {
        /// The top candidate's id.
        faq_id: FaqId,
        /// The top candidate's score.
        score: f32,
        /// Gap to the runner-up (`-inf` when there was none).
        margin: f32,
    },
    /// The disambiguator picked one of the offered candidates.
    Disambiguated {
        /// The picked id.
        faq_id: FaqId,
    },
    /// No answer.
    None {
        /// Why.
        reason: NoAnswerReason,
    },
}

impl ResolutionOutcome {
    /// The resolved id, if any.
    pub fn faq_id(&self) -> Option<&FaqId> {
        match self {
            ResolutionOutcome::Pinned { faq_id }
            | ResolutionOutcome::Confident { faq_id, .. }
            | ResolutionOutcome::Disambiguated { faq_id } => Some(faq_id),
            ResolutionOutcome::None { .. } => None,
        }
    }

    /// Returns `true` if an id was resolved.
    pub fn is_answered(&self) -> bool {
        self.faq_id().is_some()
    }

    /// Short tier label for logs and reports.
    pub fn tier(&self) -> &'static str {
        match self {
            ResolutionOutcome::Pinned { .. } => "pinned",
            ResolutionOutcome::Confident { .. } => "confident",
            ResolutionOutcome::Disambiguated { .. } => "disambiguated",
            ResolutionOutcome::None { .. } => "none",
        }
    }
}

impl std::fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionOutcome::Pinned { faq_id } => write!(f, "PINNED ({faq_id})"),
            ResolutionOutcome::Confident {
                faq_id,
                score,
                margin,
            } => {
                write!(
                    f,
                    "CONFIDENT ({faq_id}, score: {score:.4}, margin: {margin:.4})"
                )
            }
            ResolutionOutcome::Disambiguated { faq_id } => {
                write!(f, "DISAMBIGUATED ({faq_id})")
            }
            ResolutionOutcome::None { reason } => match reason {
                NoAnswerReason::NoConfidentMatch => write!(f, "NONE (no confident match)"),
                NoAnswerReason::RetrieverFailed { message } => {
                    write!(f, "NONE (retriever failed: {message})")
                }
                NoAnswerReason::SelectorFailed { message } => {
                    write!(f, "NONE (selector failed: {message})")
                }
            },
        }
    }
}

/// Ground-truth record of how one resolution unfolded.
///
/// Produced alongside the outcome by
/// [`resolve_traced`](super::Resolver::resolve_traced); the evaluation
/// harness classifies misses from this instead of guessing from output
/// shape.
#[derive(Debug, Clone, Default)]
pub struct ResolutionTrace {
    /// Query after normalization, as seen by every tier.
    pub normalized_query: String,
    /// Index of the pin rule that fired, if any.
    pub pin_index: Option<usize>,
    /// Candidates observed from the search backend (empty if never called or
    /// failed).
    pub candidates: Vec<Candidate>,
    /// The retriever call failed or timed out.
    pub retriever_failed: bool,
    /// The disambiguator tier was reached.
    pub selector_called: bool,
}

impl ResolutionTrace {
    /// Returns `true` if `id` appeared among the observed candidates.
    pub fn saw_candidate(&self, id: &FaqId) -> bool {
        self.candidates.iter().any(|c| c.is(id))
    }
}
