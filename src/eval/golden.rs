//! Golden-set fixtures: hand-labeled (query, expected id) pairs.
//!
//! Newline-delimited JSON, one case per line. Loaded once per run and
//! treated as immutable; label fixes happen in the file, not at runtime.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::GoldenSetError;
use crate::model::FaqId;

/// One labeled regression case.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenCase {
    /// The user query as typed.
    pub q: String,
    /// The id the pipeline must resolve to.
    pub expected_faq_id: FaqId,
    /// Optional intent label, for triage grouping only.
    #[serde(default)]
    pub intent: Option<String>,
}

/// The full labeled fixture.
#[derive(Debug, Clone, Default)]
pub struct GoldenSet {
    cases: Vec<GoldenCase>,
}

impl GoldenSet {
    /// Wraps already-built cases (tests and ad hoc sweeps).
    pub fn new(cases: Vec<GoldenCase>) -> Self {
        Self { cases }
    }

    /// Loads NDJSON from `path`. Blank lines are skipped; any malformed line
    /// rejects the whole file with its line number.
    pub fn load(path: &Path) -> Result<Self, GoldenSetError> {
        let text = fs::read_to_string(path).map_err(|e| GoldenSetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_ndjson(&text).map_err(|(line, source)| GoldenSetError::Parse {
            path: path.to_path_buf(),
            line,
            source,
        })
    }

    /// Parses NDJSON text; on failure returns the 1-based line number.
    pub fn from_ndjson(text: &str) -> Result<Self, (usize, serde_json::Error)> {
        let mut cases = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let case: GoldenCase = serde_json::from_str(line).map_err(|e| (i + 1, e))?;
            cases.push(case);
        }
        Ok(Self { cases })
    }

    /// The cases in file order.
    pub fn cases(&self) -> &[GoldenCase] {
        &self.cases
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` if the fixture is empty.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
