//! In-memory [`SearchBackend`] for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::SearchBackend;
use super::error::RetrieverError;
use crate::model::Candidate;

/// Deterministic search stub.
///
/// Responses are scripted per query, with an optional default; failures and
/// artificial latency can be injected to exercise the orchestrator's
/// degradation paths. A call counter lets tests assert that the pin tier
/// short-circuits retrieval entirely.
#[derive(Default)]
pub struct MockSearchBackend {
    by_query: Mutex<HashMap<String, Vec<Candidate>>>,
    default: Mutex<Vec<Candidate>>,
    fail_message: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response for every query that has no specific script.
    pub fn with_candidates(self, candidates: Vec<Candidate>) -> Self {
        *self.default.lock().unwrap() = candidates;
        self
    }

    /// Scripts the response for one exact query string.
    pub fn respond_with(&self, query: &str, candidates: Vec<Candidate>) {
        self.by_query
            .lock()
            .unwrap()
            .insert(query.to_string(), candidates);
    }

    /// Makes every subsequent call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    /// Delays every subsequent call, for timeout tests under a paused clock.
    pub fn delay_for(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of `search` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SearchBackend for MockSearchBackend {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Candidate>, RetrieverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_message.lock().unwrap().clone() {
            return Err(RetrieverError::RequestFailed {
                url: "mock://search".to_string(),
                message,
            });
        }

        let scripted = self.by_query.lock().unwrap().get(query).cloned();
        let mut candidates = match scripted {
            Some(candidates) => candidates,
            None => self.default.lock().unwrap().clone(),
        };
        candidates.truncate(k);
        Ok(candidates)
    }
}
