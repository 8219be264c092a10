//! Retriever client: thin adapter over the hosted hybrid search function.
//!
//! Ranking lives entirely on the other side of this boundary; this module
//! only enforces the candidate-list contract (descending order, unique ids,
//! length ≤ k) and propagates backend failures untouched. Retry policy, if
//! any, belongs to the orchestrator.

pub mod error;
pub mod http;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::RetrieverError;
pub use http::HybridSearchClient;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchBackend;

use std::collections::HashMap;

use crate::model::{Candidate, FaqId};

/// Minimal async interface the orchestrator depends on.
///
/// One operation, injected so pipeline tests run against a deterministic
/// in-memory implementation instead of the live backend.
pub trait SearchBackend: Send + Sync {
    /// Returns up to `k` candidates for `query`, best first.
    fn search(
        &self,
        query: &str,
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Candidate>, RetrieverError>> + Send;
}

// Shared references delegate, so one client can serve many resolver
// snapshots (the ablation harness relies on this).
impl<T: SearchBackend> SearchBackend for &T {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Candidate>, RetrieverError> {
        (**self).search(query, k).await
    }
}

/// Enforces the candidate-list contract on whatever the backend returned:
/// duplicate FAQ ids collapse to their highest score, order is descending by
/// score, and the list is cut at `k`.
pub fn sanitize_candidates(rows: Vec<Candidate>, k: usize) -> Vec<Candidate> {
    let mut best: HashMap<FaqId, Candidate> = HashMap::with_capacity(rows.len());
    for row in rows {
        match best.get(&row.faq_id) {
            Some(existing) if existing.score >= row.score => {}
            _ => {
                best.insert(row.faq_id, row);
            }
        }
    }

    let mut candidates: Vec<Candidate> = best.into_values().collect();
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(k);
    candidates
}
