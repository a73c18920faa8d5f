use crate::types::CurrencyPair;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Pairs evaluated when neither FX_PAIRS nor FX_BASE_RATES_FILE is set.
const DEFAULT_PAIRS: &str = "USD/KRW,EUR/KRW,JPY/KRW,CNY/KRW";

/// Extra calendar days requested so weekends and holidays still leave
/// `history_days` trading days.
const HISTORY_SLACK_DAYS: u64 = 10;

/// Layout of the base rates file: `{"base_rates": {"USD/KRW": 1300.0, ...}}`.
#[derive(Debug, Deserialize)]
struct BaseRatesFile {
    base_rates: BTreeMap<String, serde_json::Value>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pairs evaluated by a batch run.
    pub pairs: Vec<CurrencyPair>,
    /// Currency both cross-rate legs are quoted against.
    pub reference_currency: String,
    /// How far back to request history (days).
    pub lookback_days: u32,
    /// Number of most recent samples kept in history files.
    pub history_days: usize,
    /// Total fetch attempts for transient failures.
    pub retry_attempts: u32,
    /// Fixed delay between fetch attempts (ms).
    pub retry_delay_ms: u64,
    /// Spacing between sequential pair evaluations (ms).
    pub pair_delay_ms: u64,
    /// Pairs evaluated at once; 1 means sequential with spacing.
    pub max_concurrency: usize,
    /// Upper bound on one pair evaluation (seconds).
    pub pair_timeout_secs: u64,
    /// Directory for latest-snapshot files.
    pub data_dir: PathBuf,
    /// Directory for daily history files.
    pub history_dir: PathBuf,
    /// Yahoo Finance API base URL.
    pub yahoo_base_url: String,
    /// Per-request HTTP timeout (seconds).
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pairs = var("FX_PAIRS")
            .map(|s| parse_pairs(&s))
            .filter(|pairs| !pairs.is_empty())
            .or_else(|| {
                var("FX_BASE_RATES_FILE").and_then(|path| load_base_rates(Path::new(&path)))
            })
            .unwrap_or_else(|| parse_pairs(DEFAULT_PAIRS));

        Self {
            pairs,
            reference_currency: var("FX_REFERENCE_CURRENCY")
                .filter(|c| c.len() == 3)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_else(|| "USD".to_string()),
            lookback_days: var("FX_LOOKBACK_DAYS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(150),
            history_days: var("FX_HISTORY_DAYS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(150),
            retry_attempts: var("FX_RETRY_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &u32| n > 0)
                .unwrap_or(3),
            retry_delay_ms: var("FX_RETRY_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            pair_delay_ms: var("FX_PAIR_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_concurrency: var("FX_MAX_CONCURRENCY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            pair_timeout_secs: var("FX_PAIR_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            data_dir: var("FX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            history_dir: var("FX_HISTORY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("history")),
            yahoo_base_url: var("YAHOO_BASE_URL")
                .unwrap_or_else(|| "https://query1.finance.yahoo.com".to_string()),
            http_timeout_secs: var("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Period requested from the provider: the indicator lookback, or the
    /// history length plus slack when that is longer.
    pub fn lookback(&self) -> Duration {
        let history_days = u64::try_from(self.history_days)
            .unwrap_or(u64::MAX)
            .saturating_add(HISTORY_SLACK_DAYS);
        let days = u64::from(self.lookback_days).max(history_days);
        Duration::from_secs(days.saturating_mul(86_400))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn pair_delay(&self) -> Duration {
        Duration::from_millis(self.pair_delay_ms)
    }

    pub fn pair_timeout(&self) -> Duration {
        Duration::from_secs(self.pair_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

/// Parse a comma-separated pair list, skipping entries that do not parse.
pub fn parse_pairs(s: &str) -> Vec<CurrencyPair> {
    s.split(',')
        .filter(|p| !p.trim().is_empty())
        .filter_map(|p| {
            let pair = CurrencyPair::parse(p);
            if pair.is_none() {
                warn!("Ignoring invalid currency pair '{}'", p.trim());
            }
            pair
        })
        .collect()
}

/// Read the pair list from a base rates file. Returns None if the file is
/// missing, unreadable, or lists no valid pair.
pub fn load_base_rates(path: &Path) -> Option<Vec<CurrencyPair>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read base rates file {}: {}", path.display(), e);
            return None;
        }
    };

    let file: BaseRatesFile = match serde_json::from_str(&content) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to parse base rates file {}: {}", path.display(), e);
            return None;
        }
    };

    let pairs: Vec<CurrencyPair> = file
        .base_rates
        .keys()
        .filter_map(|k| CurrencyPair::parse(k))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs)
    }
}
