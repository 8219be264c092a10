//! Shared data model: FAQ identifiers and ranked candidates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a canonical FAQ answer.
///
/// Immutable once published; owned by the content pipeline. The resolver only
/// ever passes these through, it never mints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaqId(Uuid);

impl FaqId {
    /// Wraps an existing UUID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Mints a random id (fixtures and tests).
    #[cfg(any(test, feature = "mock"))]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for FaqId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Display for FaqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One ranked FAQ candidate returned by the search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Canonical FAQ id.
    #[serde(rename = "id")]
    pub faq_id: FaqId,
    /// URL-safe slug, used in logs and prompts.
    pub slug: String,
    /// The canonical question text.
    pub question: String,
    /// Full answer in markdown. Truncated before entering LLM prompts.
    pub answer_md: String,
    /// Backend relevance score, higher is better.
    pub score: f32,
}

impl Candidate {
    /// Returns `true` if this candidate carries `id`.
    pub fn is(&self, id: &FaqId) -> bool {
        self.faq_id == *id
    }
}
