//! Golden-set regression runner.
//!
//! Usage: `pinpoint-eval [--ablate]`
//!
//! Replays the golden set through the live pipeline (real search backend,
//! real disambiguator) and prints the report as JSON. With `--ablate` it
//! additionally measures each pin rule's impact. Exits non-zero when
//! exact@1 drops below 1.0 or the p50 latency budget is blown, so CI can
//! gate on it.

use std::process::ExitCode;

use pinpoint::config::Config;
use pinpoint::constants::EVAL_P50_SLA;
use pinpoint::eval::{EvalRunner, GoldenSet, ablate};
use pinpoint::pins::PinTable;
use pinpoint::resolver::Resolver;
use pinpoint::retriever::HybridSearchClient;
use pinpoint::selector::LlmSelector;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let run_ablation = std::env::args().any(|arg| arg == "--ablate");

    let config = Config::from_env()?;
    config.validate()?;

    let pins = PinTable::load(&config.pins_path)?;
    let golden = GoldenSet::load(&config.golden_path)?;

    tracing::info!(
        rules = pins.len(),
        cases = golden.len(),
        search_url = %config.search_url,
        model = %config.model,
        "starting golden run"
    );

    let mut backend = HybridSearchClient::new(&config.search_url, &config.firm_scope);
    if let Some(key) = &config.search_api_key {
        backend = backend.with_api_key(key);
    }
    let selector = LlmSelector::new(&config.model);

    let resolver = Resolver::with_config(
        pins.clone(),
        &backend,
        &selector,
        config.resolver_config(),
    );

    let report = EvalRunner::new(&resolver, &golden).run().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if run_ablation {
        let results = ablate(
            &pins,
            &backend,
            &selector,
            config.resolver_config(),
            &golden,
        )
        .await;
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    let clean = report.is_clean();
    let within_sla = report.meets_sla(EVAL_P50_SLA);

    if !clean {
        tracing::error!(misses = report.misses.len(), "golden regression");
    }
    if !within_sla {
        tracing::error!(p50_ms = report.latency.p50_ms, "p50 over SLA");
    }

    Ok(if clean && within_sla {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
