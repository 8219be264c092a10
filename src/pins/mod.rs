//! Ordered pin table: deterministic regex routes evaluated before retrieval.
//!
//! Insertion order is priority order and first match wins. That ordering is a
//! behavioral contract, not an iteration detail: reordering the file is an
//! edit that requires golden-set re-validation.

pub mod error;


pub use error::PinError;

use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::constants::MAX_PATTERN_CHARS;
use crate::model::FaqId;

/// Compiled regex size limit. Generous for patterns bounded at
/// [`MAX_PATTERN_CHARS`] chars; a pattern that blows past this is a bug.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// One deterministic route: pattern → FAQ id.
#[derive(Debug, Clone)]
pub struct PinRule {
    pattern: String,
    regex: Regex,
    faq_id: FaqId,
}

impl PinRule {
    /// Compiles and validates a single rule.
    ///
    /// Enforces the portability rules from the table contract: the pattern
    /// must compile case-insensitively, must stay within
    /// [`MAX_PATTERN_CHARS`], and may not carry inline-flag groups (only
    /// `(?:` grouping is portable across engines).
    pub fn compile(pattern: &str, faq_id: FaqId) -> Result<Self, PinError> {
        let length = pattern.chars().count();
        if length > MAX_PATTERN_CHARS {
            return Err(PinError::PatternTooLong {
                pattern: pattern.to_string(),
                length,
                max: MAX_PATTERN_CHARS,
            });
        }

        if has_inline_flags(pattern) {
            return Err(PinError::InlineFlags {
                pattern: pattern.to_string(),
            });
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| PinError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            faq_id,
        })
    }

    /// The source pattern as authored.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The target FAQ id.
    pub fn faq_id(&self) -> &FaqId {
        &self.faq_id
    }

    /// Returns `true` if the pattern matches `query`.
    pub fn is_match(&self, query: &str) -> bool {
        self.regex.is_match(query)
    }
}

/// Detects inline-flag group syntax such as `(?i)` or `(?P<name>`.
///
/// Only the non-capturing group opener `(?:` is allowed; every other `(?`
/// sequence is engine-specific enough to be rejected.
fn has_inline_flags(pattern: &str) -> bool {
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i + 1 < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == '(' && chars[i + 1] == '?' {
            match chars.get(i + 2) {
                Some(':') => {}
                _ => return true,
            }
        }
        i += 1;
    }
    false
}

#[derive(Debug, Deserialize)]
struct PinFile {
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    re: String,
    faq_id: FaqId,
}

/// The ordered rule table. Loaded once at startup, immutable afterwards;
/// ablation works on cloned snapshots, never in-place edits.
#[derive(Debug, Clone, Default)]
pub struct PinTable {
    rules: Vec<PinRule>,
}

impl PinTable {
    /// Builds a table from already-compiled rules, preserving order.
    pub fn new(rules: Vec<PinRule>) -> Self {
        Self { rules }
    }

    /// Compiles `(pattern, target)` pairs in order. Fails closed on the first
    /// invalid rule.
    pub fn compile(rules: &[(&str, FaqId)]) -> Result<Self, PinError> {
        let rules = rules
            .iter()
            .map(|(pattern, faq_id)| PinRule::compile(pattern, *faq_id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Parses the committed JSON table document.
    pub fn from_json(json: &str) -> Result<Self, PinError> {
        let file: PinFile = serde_json::from_str(json).map_err(|e| PinError::Parse {
            path: "<inline>".into(),
            source: e,
        })?;

        let rules = file
            .rules
            .iter()
            .map(|raw| PinRule::compile(&raw.re, raw.faq_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Loads and validates the table file. Any invalid rule rejects the whole
    /// file.
    pub fn load(path: &Path) -> Result<Self, PinError> {
        let json = fs::read_to_string(path).map_err(|e| PinError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: PinFile = serde_json::from_str(&json).map_err(|e| PinError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let rules = file
            .rules
            .iter()
            .map(|raw| PinRule::compile(&raw.re, raw.faq_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// First-match-wins lookup over the normalized query.
    ///
    /// Deterministic: the same query against the same table always resolves
    /// to the same rule, independent of unrelated edits elsewhere.
    pub fn matches(&self, normalized_query: &str) -> Option<&FaqId> {
        self.matches_traced(normalized_query).map(|(_, id)| id)
    }

    /// Like [`matches`](Self::matches), also reporting the index of the rule
    /// that fired. The evaluation harness uses the index for exact
    /// root-cause attribution.
    pub fn matches_traced(&self, normalized_query: &str) -> Option<(usize, &FaqId)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.is_match(normalized_query))
            .map(|(idx, rule)| (idx, rule.faq_id()))
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[PinRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A frozen snapshot of this table with the rule at `index` removed,
    /// preserving the relative order of the rest. Used by ablation; the
    /// original table is untouched.
    pub fn without_rule(&self, index: usize) -> Self {
        let mut rules = self.rules.clone();
        if index < rules.len() {
            rules.remove(index);
        }
        Self { rules }
    }
}
