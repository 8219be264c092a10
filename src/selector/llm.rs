//! genai-backed implementation of [`Selector`].

use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

use super::error::SelectorError;
use super::{SYSTEM_PROMPT, Selector, parse_verdict, render_prompt};
use crate::model::{Candidate, FaqId};

/// Disambiguator over a constrained-output chat model.
///
/// Temperature is pinned to 0 for determinism (best-effort across model
/// versions, guaranteed nothing).
pub struct LlmSelector {
    client: Client,
    model: String,
}

impl std::fmt::Debug for LlmSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSelector")
            .field("model", &self.model)
            .finish()
    }
}

impl LlmSelector {
    /// Creates a selector for `model`, resolving provider credentials the way
    /// the genai client does (environment).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Selector for LlmSelector {
    async fn pick(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Result<Option<FaqId>, SelectorError> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(render_prompt(query, candidates)),
        ]);

        let options = ChatOptions::default().with_temperature(0.0);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await
            .map_err(|e| SelectorError::ProviderFailed {
                message: e.to_string(),
            })?;

        let raw = response.first_text().unwrap_or_default();
        let verdict = parse_verdict(raw, candidates);

        debug!(
            model = %self.model,
            candidates = candidates.len(),
            picked = ?verdict,
            "disambiguator verdict"
        );

        Ok(verdict)
    }
}
