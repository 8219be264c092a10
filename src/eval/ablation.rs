//! Leave-one-out ablation over the pin table.
//!
//! Every measurement runs against a frozen snapshot of the table; rules are
//! never removed in place under an in-flight evaluation. Impacts are not
//! independent (with overlapping patterns, removing one rule changes which
//! rule wins), so redundancy pruning re-measures after every removal instead
//! of trusting one pass.

use tracing::{debug, info};

use super::golden::GoldenSet;
use super::runner::EvalRunner;
use super::types::AblationResult;
use crate::pins::PinTable;
use crate::resolver::{Resolver, ResolverConfig};
use crate::retriever::SearchBackend;
use crate::selector::Selector;

/// Measures every rule's contribution to golden-set correctness.
///
/// `impact[i]` = correct count with the full table minus correct count with
/// rule `i` removed (all other rules fixed). Zero marks a redundancy
/// candidate; negative marks a rule that costs correctness.
pub async fn ablate<B, S>(
    table: &PinTable,
    backend: &B,
    selector: &S,
    config: ResolverConfig,
    golden: &GoldenSet,
) -> Vec<AblationResult>
where
    B: SearchBackend,
    S: Selector,
{
    let baseline = count_with_table(table.clone(), backend, selector, config, golden).await;
    debug!(baseline, rules = table.len(), "ablation baseline");

    let mut results = Vec::with_capacity(table.len());
    for (index, rule) in table.rules().iter().enumerate() {
        let reduced = table.without_rule(index);
        let correct = count_with_table(reduced, backend, selector, config, golden).await;
        let impact = baseline as i64 - correct as i64;

        debug!(index, pattern = rule.pattern(), impact, "rule ablated");

        results.push(AblationResult {
            index,
            pattern: rule.pattern().to_string(),
            faq_id: *rule.faq_id(),
            impact,
        });
    }

    results
}

/// Iteratively removes rules the golden set does not depend on.
///
/// One removal per iteration, re-measuring in between: a rule that looked
/// redundant only because a later rule shadowed the same queries will show
/// its real impact once the shadow is gone. Rules with negative impact are
/// removed first. Returns the pruned snapshot; the input table is untouched.
pub async fn prune_redundant<B, S>(
    table: &PinTable,
    backend: &B,
    selector: &S,
    config: ResolverConfig,
    golden: &GoldenSet,
) -> PinTable
where
    B: SearchBackend,
    S: Selector,
{
    let mut current = table.clone();

    loop {
        let results = ablate(&current, backend, selector, config, golden).await;

        let Some(victim) = results
            .iter()
            .filter(|r| r.impact <= 0)
            .min_by_key(|r| r.impact)
        else {
            break;
        };

        info!(
            pattern = %victim.pattern,
            impact = victim.impact,
            "pruning rule"
        );
        current = current.without_rule(victim.index);
    }

    current
}

async fn count_with_table<B, S>(
    table: PinTable,
    backend: &B,
    selector: &S,
    config: ResolverConfig,
    golden: &GoldenSet,
) -> usize
where
    B: SearchBackend,
    S: Selector,
{
    let resolver = Resolver::with_config(table, backend, selector, config);
    EvalRunner::new(&resolver, golden).count_correct().await
}
