//! Pin-table CI guard.
//!
//! Usage: `pinpoint-guard [path/to/pins.json]`
//!
//! Loads the committed pin table, applies the same validation the resolver
//! applies at startup, and enforces the rule-count ceiling. Exit code 0 on
//! pass, 1 with a diagnostic on violation. No network, no resolver.

use std::path::PathBuf;
use std::process::ExitCode;

use pinpoint::config::Config;
use pinpoint::guard::check_file;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pinpoint-guard: bad configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.pins_path);

    match check_file(&path, config.max_rules) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pinpoint-guard: {} failed: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}
