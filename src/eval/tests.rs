use super::*;
use crate::model::{Candidate, FaqId};
use crate::pins::PinTable;
use crate::resolver::{Resolver, ResolverConfig};
use crate::retriever::MockSearchBackend;
use crate::selector::MockSelector;

fn id(n: u128) -> FaqId {
    FaqId::new(uuid::Uuid::from_u128(n))
}

fn candidate(n: u128, score: f32) -> Candidate {
    Candidate {
        faq_id: id(n),
        slug: format!("faq-{n}"),
        question: format!("question {n}"),
        answer_md: format!("answer {n}"),
        score,
    }
}

fn case(q: &str, expected: FaqId) -> GoldenCase {
    GoldenCase {
        q: q.to_string(),
        expected_faq_id: expected,
        intent: None,
    }
}

#[test]
fn test_golden_set_parses_ndjson() {
    let text = format!(
        "{{\"q\":\"cuanto cuesta\",\"expected_faq_id\":\"{}\"}}\n\
         \n\
         {{\"q\":\"como retiro\",\"expected_faq_id\":\"{}\",\"intent\":\"payouts\"}}\n",
        id(1),
        id(2)
    );

    let golden = GoldenSet::from_ndjson(&text).unwrap();
    assert_eq!(golden.len(), 2);
    assert_eq!(golden.cases()[1].intent.as_deref(), Some("payouts"));
}

#[test]
fn test_golden_set_reports_bad_line_number() {
    let text = format!(
        "{{\"q\":\"ok\",\"expected_faq_id\":\"{}\"}}\nnot json\n",
        id(1)
    );

    let (line, _) = GoldenSet::from_ndjson(&text).unwrap_err();
    assert_eq!(line, 2);
}

#[test]
fn test_golden_set_load_missing_file() {
    let err = GoldenSet::load(std::path::Path::new("/nonexistent/golden.jsonl")).unwrap_err();
    assert!(matches!(err, GoldenSetError::Io { .. }));
}

#[tokio::test]
async fn test_clean_run_reports_exact_at1_of_one() {
    let backend = MockSearchBackend::new();
    backend.respond_with("como retiro fondos", vec![candidate(2, 0.8), candidate(3, 0.2)]);

    let resolver = Resolver::new(
        PinTable::compile(&[(r"cuanto cuesta", id(1))]).unwrap(),
        backend,
        MockSelector::new(),
    );
    let golden = GoldenSet::new(vec![
        case("cuanto cuesta la cuenta", id(1)),
        case("como retiro fondos", id(2)),
    ]);

    let report = EvalRunner::new(&resolver, &golden).run().await;

    assert_eq!(report.total, 2);
    assert_eq!(report.correct, 2);
    assert!((report.exact_at1 - 1.0).abs() < f64::EPSILON);
    assert!(report.is_clean());
    assert!(report.meets_sla(crate::constants::EVAL_P50_SLA));
}

#[tokio::test]
async fn test_misses_are_classified_per_root_cause() {
    let backend = MockSearchBackend::new();
    // Expected id 20 never surfaces: missing_pin.
    backend.respond_with("consulta sin cobertura", vec![candidate(8, 0.3), candidate(9, 0.28)]);
    // Expected id 30 surfaces second with a confident winner above: wrong_expected.
    backend.respond_with("etiqueta dudosa", vec![candidate(7, 0.9), candidate(30, 0.2)]);
    // Expected id 40 surfaces but margin is narrow and selector declines: selector_reject.
    backend.respond_with("pregunta ambigua", vec![candidate(40, 0.4), candidate(6, 0.38)]);

    let resolver = Resolver::new(
        // Over-broad pin: fires on the pricing query but routes to id 99.
        PinTable::compile(&[(r"cuenta", id(99))]).unwrap(),
        backend,
        MockSelector::new(),
    );
    let golden = GoldenSet::new(vec![
        case("cuanto cuesta la cuenta", id(1)),
        case("consulta sin cobertura", id(20)),
        case("etiqueta dudosa", id(30)),
        case("pregunta ambigua", id(40)),
    ]);

    let report = EvalRunner::new(&resolver, &golden).run().await;

    assert_eq!(report.correct, 0);
    assert_eq!(report.misses.len(), 4);

    let causes: Vec<RootCause> = report.misses.iter().map(|m| m.root_cause).collect();
    assert_eq!(
        causes,
        vec![
            RootCause::PinTooBroad,
            RootCause::MissingPin,
            RootCause::WrongExpected,
            RootCause::SelectorReject,
        ]
    );
}

#[tokio::test]
async fn test_backend_failure_is_recorded_not_fatal() {
    let backend = MockSearchBackend::new();
    backend.fail_with("search down");

    let resolver = Resolver::new(PinTable::default(), backend, MockSelector::new());
    let golden = GoldenSet::new(vec![case("a", id(1)), case("b", id(2))]);

    let report = EvalRunner::new(&resolver, &golden).run().await;

    // The whole batch completed despite every call failing.
    assert_eq!(report.total, 2);
    assert_eq!(report.misses.len(), 2);
    assert!(report
        .misses
        .iter()
        .all(|m| m.root_cause == RootCause::RetrieverFail));
}

#[tokio::test]
async fn test_ablation_separates_critical_from_redundant() {
    let backend = MockSearchBackend::new();
    // Retrieval resolves the payout query on its own, so its pin is
    // redundant; the pricing query is only answerable via its pin.
    backend.respond_with("como retiro", vec![candidate(2, 0.8), candidate(3, 0.2)]);

    let table = PinTable::compile(&[
        (r"cuanto cuesta", id(1)),
        (r"como retiro", id(2)),
    ])
    .unwrap();
    let golden = GoldenSet::new(vec![
        case("cuanto cuesta", id(1)),
        case("como retiro", id(2)),
    ]);

    let backend_ref = &backend;
    let selector = MockSelector::new();
    let results = ablate(
        &table,
        backend_ref,
        &selector,
        ResolverConfig::default(),
        &golden,
    )
    .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].impact, 1);
    assert!(!results[0].is_redundant());
    assert_eq!(results[1].impact, 0);
    assert!(results[1].is_redundant());
}

#[tokio::test]
async fn test_removing_redundant_rule_keeps_exact_at1() {
    let backend = MockSearchBackend::new();
    backend.respond_with("como retiro", vec![candidate(2, 0.8), candidate(3, 0.2)]);

    let table = PinTable::compile(&[
        (r"cuanto cuesta", id(1)),
        (r"como retiro", id(2)),
    ])
    .unwrap();
    let golden = GoldenSet::new(vec![
        case("cuanto cuesta", id(1)),
        case("como retiro", id(2)),
    ]);

    let selector = MockSelector::new();

    let full = Resolver::new(table.clone(), &backend, &selector);
    let full_correct = EvalRunner::new(&full, &golden).count_correct().await;

    let reduced = Resolver::new(table.without_rule(1), &backend, &selector);
    let reduced_correct = EvalRunner::new(&reduced, &golden).count_correct().await;

    assert_eq!(full_correct, reduced_correct);
}

#[tokio::test]
async fn test_removing_critical_rule_drops_by_its_impact() {
    let table = PinTable::compile(&[(r"cuanto cuesta", id(1))]).unwrap();
    let golden = GoldenSet::new(vec![
        case("cuanto cuesta la cuenta", id(1)),
        case("cuanto cuesta el reset", id(1)),
    ]);

    let backend = MockSearchBackend::new();
    let selector = MockSelector::new();

    let results = ablate(&table, &backend, &selector, ResolverConfig::default(), &golden).await;
    assert_eq!(results[0].impact, 2);

    let reduced = Resolver::new(table.without_rule(0), &backend, &selector);
    let reduced_correct = EvalRunner::new(&reduced, &golden).count_correct().await;
    assert_eq!(reduced_correct, 0);
}

#[tokio::test]
async fn test_prune_re_measures_shadowed_rules() {
    // Two rules cover the same query; one-pass ablation scores both at zero
    // impact, but pruning must keep one of them.
    let table = PinTable::compile(&[
        (r"\bpago\b", id(1)),
        (r"(?:pago|payout)", id(1)),
    ])
    .unwrap();
    let golden = GoldenSet::new(vec![case("cuando llega el pago", id(1))]);

    let backend = MockSearchBackend::new();
    let selector = MockSelector::new();

    let one_pass = ablate(&table, &backend, &selector, ResolverConfig::default(), &golden).await;
    assert!(one_pass.iter().all(|r| r.is_redundant()));

    let pruned = prune_redundant(
        &table,
        &backend,
        &selector,
        ResolverConfig::default(),
        &golden,
    )
    .await;

    assert_eq!(pruned.len(), 1);

    let resolver = Resolver::new(pruned, &backend, &selector);
    let correct = EvalRunner::new(&resolver, &golden).count_correct().await;
    assert_eq!(correct, 1);
}
