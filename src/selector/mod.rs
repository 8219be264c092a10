//! LLM disambiguator client: picks one FAQ id (or none) from a short
//! candidate list under a strict machine-parseable output contract.
//!
//! The model is only ever allowed to choose among the offered ids. Any
//! deviation from the contract (including an id that was never offered) is
//! a "no pick", never a fabricated or corrected id.

pub mod error;
pub mod llm;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::SelectorError;
pub use llm::LlmSelector;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSelector;

use serde::Deserialize;

use crate::constants::{ANSWER_SNIPPET_CHARS, MAX_SELECTOR_CANDIDATES};
use crate::model::{Candidate, FaqId};

/// Minimal async interface the orchestrator depends on.
pub trait Selector: Send + Sync {
    /// Picks one of the offered candidates, or none.
    fn pick(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> impl std::future::Future<Output = Result<Option<FaqId>, SelectorError>> + Send;
}

// Shared references delegate, mirroring the search-backend impl.
impl<T: Selector> Selector for &T {
    async fn pick(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<Option<FaqId>, SelectorError> {
        (**self).pick(query, candidates).await
    }
}

/// System instruction fixing the output contract.
pub(crate) const SYSTEM_PROMPT: &str = "You match a user's support question to exactly one FAQ \
from a numbered list, or decide that none fits. Respond with ONLY a JSON object, no prose: \
{\"type\":\"FAQ_ID\",\"id\":\"<uuid from the list>\"} or {\"type\":\"NONE\"}. Never invent an id.";

/// Renders the user message: the query plus a compact view of each candidate
/// (id, question, truncated answer). At most [`MAX_SELECTOR_CANDIDATES`]
/// candidates are offered.
pub fn render_prompt(query: &str, candidates: &[Candidate]) -> String {
    let mut prompt = format!("Question: {query}\n\nCandidates:\n");
    for (i, c) in candidates.iter().take(MAX_SELECTOR_CANDIDATES).enumerate() {
        let snippet = truncate_chars(&c.answer_md, ANSWER_SNIPPET_CHARS);
        prompt.push_str(&format!(
            "{}. id={} question={} answer={}\n",
            i + 1,
            c.faq_id,
            c.question,
            snippet
        ));
    }
    prompt
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push('…');
    out
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawVerdict {
    #[serde(rename = "FAQ_ID")]
    FaqId { id: String },
    #[serde(rename = "NONE")]
    None,
}

/// Parses the model's verdict against the offered candidate set.
///
/// Total: every deviation from the contract collapses to `None`. Tolerates a
/// markdown code fence around the JSON, nothing else.
pub fn parse_verdict(raw: &str, offered: &[Candidate]) -> Option<FaqId> {
    let text = strip_code_fence(raw.trim());

    let verdict: RawVerdict = serde_json::from_str(text).ok()?;
    match verdict {
        RawVerdict::None => None,
        RawVerdict::FaqId { id } => {
            let id: FaqId = id.parse().ok()?;
            offered.iter().any(|c| c.is(&id)).then_some(id)
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}
