//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `PINPOINT_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_MAX_RULES, DEFAULT_RETRIEVER_TIMEOUT, DEFAULT_SELECTOR_TIMEOUT, DEFAULT_TOP_K,
    MARGIN_MIN, SCORE_MIN,
};
use crate::gate::GateThresholds;
use crate::resolver::ResolverConfig;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PINPOINT_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Committed pin-table file. Default: `./data/pins.json`.
    pub pins_path: PathBuf,

    /// Golden-set fixture. Default: `./data/golden.jsonl`.
    pub golden_path: PathBuf,

    /// Hybrid search RPC endpoint.
    pub search_url: String,

    /// Bearer token for the search endpoint, if it requires one.
    pub search_api_key: Option<String>,

    /// Firm scope id sent with every search request.
    pub firm_scope: String,

    /// Disambiguator model name (resolved by the genai provider layer).
    pub model: String,

    /// Candidates requested per query. Default: `8`.
    pub top_k: usize,

    /// Guard ceiling on pin-rule count. Default: `50`.
    pub max_rules: usize,

    /// Retriever call budget.
    pub retriever_timeout: Duration,

    /// Disambiguator call budget.
    pub selector_timeout: Duration,

    /// Confidence-gate score threshold.
    pub score_min: f32,

    /// Confidence-gate margin threshold.
    pub margin_min: f32,
}

/// Default search endpoint used when `PINPOINT_SEARCH_URL` is not set.
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:54321/functions/v1/hybrid-search";

/// Default disambiguator model used when `PINPOINT_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

impl Default for Config {
    fn default() -> Self {
        Self {
            pins_path: PathBuf::from("./data/pins.json"),
            golden_path: PathBuf::from("./data/golden.jsonl"),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_api_key: None,
            firm_scope: "default".to_string(),
            model: DEFAULT_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
            max_rules: DEFAULT_MAX_RULES,
            retriever_timeout: DEFAULT_RETRIEVER_TIMEOUT,
            selector_timeout: DEFAULT_SELECTOR_TIMEOUT,
            score_min: SCORE_MIN,
            margin_min: MARGIN_MIN,
        }
    }
}

impl Config {
    const ENV_PINS_PATH: &'static str = "PINPOINT_PINS_PATH";
    const ENV_GOLDEN_PATH: &'static str = "PINPOINT_GOLDEN_PATH";
    const ENV_SEARCH_URL: &'static str = "PINPOINT_SEARCH_URL";
    const ENV_SEARCH_API_KEY: &'static str = "PINPOINT_SEARCH_API_KEY";
    const ENV_FIRM_SCOPE: &'static str = "PINPOINT_FIRM_SCOPE";
    const ENV_MODEL: &'static str = "PINPOINT_MODEL";
    const ENV_TOP_K: &'static str = "PINPOINT_TOP_K";
    const ENV_MAX_RULES: &'static str = "PINPOINT_MAX_RULES";
    const ENV_RETRIEVER_TIMEOUT_MS: &'static str = "PINPOINT_RETRIEVER_TIMEOUT_MS";
    const ENV_SELECTOR_TIMEOUT_MS: &'static str = "PINPOINT_SELECTOR_TIMEOUT_MS";
    const ENV_SCORE_MIN: &'static str = "PINPOINT_SCORE_MIN";
    const ENV_MARGIN_MIN: &'static str = "PINPOINT_MARGIN_MIN";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            pins_path: Self::parse_path_from_env(Self::ENV_PINS_PATH, defaults.pins_path),
            golden_path: Self::parse_path_from_env(Self::ENV_GOLDEN_PATH, defaults.golden_path),
            search_url: Self::parse_string_from_env(Self::ENV_SEARCH_URL, defaults.search_url),
            search_api_key: Self::parse_optional_string_from_env(Self::ENV_SEARCH_API_KEY),
            firm_scope: Self::parse_string_from_env(Self::ENV_FIRM_SCOPE, defaults.firm_scope),
            model: Self::parse_string_from_env(Self::ENV_MODEL, defaults.model),
            top_k: Self::parse_nonzero_usize_from_env(Self::ENV_TOP_K, defaults.top_k)?,
            max_rules: Self::parse_nonzero_usize_from_env(Self::ENV_MAX_RULES, defaults.max_rules)?,
            retriever_timeout: Self::parse_timeout_from_env(
                Self::ENV_RETRIEVER_TIMEOUT_MS,
                defaults.retriever_timeout,
            )?,
            selector_timeout: Self::parse_timeout_from_env(
                Self::ENV_SELECTOR_TIMEOUT_MS,
                defaults.selector_timeout,
            )?,
            score_min: Self::parse_f32_from_env(Self::ENV_SCORE_MIN, defaults.score_min)?,
            margin_min: Self::parse_f32_from_env(Self::ENV_MARGIN_MIN, defaults.margin_min)?,
        })
    }

    /// Validates paths (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pins_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.pins_path.clone(),
            });
        }
        if !self.pins_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.pins_path.clone(),
            });
        }

        if self.golden_path.exists() && !self.golden_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.golden_path.clone(),
            });
        }

        Ok(())
    }

    /// The gate thresholds in effect.
    pub fn gate_thresholds(&self) -> GateThresholds {
        GateThresholds {
            score_min: self.score_min,
            margin_min: self.margin_min,
        }
    }

    /// The orchestrator tunables in effect.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            top_k: self.top_k,
            thresholds: self.gate_thresholds(),
            retriever_timeout: self.retriever_timeout,
            selector_timeout: self.selector_timeout,
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_nonzero_usize_from_env(
        var_name: &'static str,
        default: usize,
    ) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let parsed: usize = value.parse().map_err(|e| ConfigError::InvalidInteger {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                })?;
                if parsed == 0 {
                    return Err(ConfigError::OutOfRange {
                        name: var_name,
                        value,
                        reason: "must be at least 1",
                    });
                }
                Ok(parsed)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let ms: u64 = value.parse().map_err(|e| ConfigError::InvalidInteger {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                })?;
                if ms == 0 {
                    return Err(ConfigError::OutOfRange {
                        name: var_name,
                        value,
                        reason: "timeout must be positive",
                    });
                }
                Ok(Duration::from_millis(ms))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::InvalidFloat {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
