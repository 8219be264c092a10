//! Static pin-table checks that gate merges.
//!
//! Runs against the committed table file with no network and no resolver:
//! rule validity (the same checks the loader applies) plus the rule-count
//! ceiling, which is deliberately a merge-time failure rather than a
//! load-time one.

use std::path::Path;

use thiserror::Error;

use crate::pins::{PinError, PinTable};

#[derive(Debug, Error)]
/// Guard violations.
pub enum GuardError {
    /// The table failed load-time validation.
    #[error(transparent)]
    Table(#[from] PinError),

    /// The table outgrew the auditable ceiling.
    #[error("pin table has {count} rules, ceiling is {max}")]
    TooManyRules {
        /// Observed rule count.
        count: usize,
        /// Configured ceiling.
        max: usize,
    },
}

/// Summary of a passing check.
#[derive(Debug, Clone, Copy)]
pub struct GuardReport {
    /// Rules in the table.
    pub rule_count: usize,
    /// Ceiling the count was checked against.
    pub max_rules: usize,
}

impl std::fmt::Display for GuardReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pin table ok: {} rules (ceiling {})",
            self.rule_count, self.max_rules
        )
    }
}

/// Checks an already-loaded table against the ceiling.
pub fn check_table(table: &PinTable, max_rules: usize) -> Result<GuardReport, GuardError> {
    let count = table.len();
    if count > max_rules {
        return Err(GuardError::TooManyRules {
            count,
            max: max_rules,
        });
    }
    Ok(GuardReport {
        rule_count: count,
        max_rules,
    })
}

/// Loads and fully checks the committed table file.
pub fn check_file(path: &Path, max_rules: usize) -> Result<GuardReport, GuardError> {
    let table = PinTable::load(path)?;
    check_table(&table, max_rules)
}
