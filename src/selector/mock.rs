//! Scripted [`Selector`] for pipeline tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Selector;
use super::error::SelectorError;
use crate::model::{Candidate, FaqId};

/// Deterministic disambiguator stub.
///
/// By default it behaves like a model that answers `NONE`. Tests script a
/// pick, a raw text verdict (run through the real parser), a failure, or
/// artificial latency. Call counting lets tests assert which tier produced
/// an outcome.
#[derive(Default)]
pub struct MockSelector {
    pick: Mutex<Option<FaqId>>,
    raw_verdict: Mutex<Option<String>>,
    fail_message: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl MockSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a direct pick.
    pub fn picks(self, id: FaqId) -> Self {
        *self.pick.lock().unwrap() = Some(id);
        self
    }

    /// Scripts a raw model response, exercised through the real verdict
    /// parser (membership check included).
    pub fn responds_raw(&self, raw: &str) {
        *self.raw_verdict.lock().unwrap() = Some(raw.to_string());
    }

    /// Makes every subsequent call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    /// Delays every subsequent call, for timeout tests under a paused clock.
    pub fn delay_for(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of `pick` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Selector for MockSelector {
    async fn pick(
        &self,
        _query: &str,
        candidates: &[Candidate],
    ) -> Result<Option<FaqId>, SelectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_message.lock().unwrap().clone() {
            return Err(SelectorError::ProviderFailed { message });
        }

        if let Some(raw) = self.raw_verdict.lock().unwrap().clone() {
            return Ok(super::parse_verdict(&raw, candidates));
        }

        let pick = *self.pick.lock().unwrap();
        Ok(pick.filter(|id| candidates.iter().any(|c| c.is(id))))
    }
}
