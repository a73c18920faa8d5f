//! JSON file output: one latest snapshot and one daily history per pair.
//!
//! File and field names follow the layout downstream dashboards read:
//! `data/USD_KRW.json` and `history/USD_KRW_history.json`.

use crate::error::StoreError;
use crate::types::{
    CurrencyPair, CurrencyPairQuote, IndicatorSnapshot, PairReport, QuoteSource, Signal,
    TrendForecast,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub short: TrendForecast,
    pub long: TrendForecast,
}

/// Latest-snapshot file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub symbol: CurrencyPair,
    pub timestamp: String,
    #[serde(rename = "lastValue")]
    pub last_value: f64,
    #[serde(rename = "changePercent")]
    pub change_percent: f64,
    pub signal_short: Signal,
    pub signal_long: Signal,
    pub indicators: IndicatorSnapshot,
    pub forecast: ForecastRecord,
    pub source: QuoteSource,
}

impl From<&CurrencyPairQuote> for SnapshotRecord {
    fn from(quote: &CurrencyPairQuote) -> Self {
        Self {
            symbol: quote.pair.clone(),
            timestamp: format_timestamp(&quote.timestamp),
            last_value: round2(quote.last_close),
            change_percent: round2(quote.change_percent),
            signal_short: quote.signal_short,
            signal_long: quote.signal_long,
            indicators: quote.indicators,
            forecast: ForecastRecord {
                short: quote.forecast_short,
                long: quote.forecast_long,
            },
            source: quote.source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecord {
    pub currency_pair: CurrencyPair,
    pub rate: f64,
    pub timestamp: String,
}

/// Daily history file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub currency_pair: CurrencyPair,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub rates: Vec<RateRecord>,
}

impl HistoryRecord {
    /// The most recent `days` closes of a report, oldest first.
    pub fn from_report(report: &PairReport, days: usize) -> Self {
        let pair = &report.quote.pair;
        let rates = report
            .series
            .tail(days)
            .iter()
            .map(|s| RateRecord {
                currency_pair: pair.clone(),
                rate: round2(s.close),
                timestamp: format_timestamp(&s.timestamp),
            })
            .collect();

        Self {
            currency_pair: pair.clone(),
            last_updated: format_timestamp(&report.quote.timestamp),
            rates,
        }
    }
}

/// Writes pair reports as pretty-printed JSON files.
pub struct JsonStore {
    data_dir: PathBuf,
    history_dir: PathBuf,
    history_days: usize,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>, history_dir: impl Into<PathBuf>, history_days: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            history_dir: history_dir.into(),
            history_days,
        }
    }

    pub fn snapshot_path(&self, pair: &CurrencyPair) -> PathBuf {
        self.data_dir.join(format!("{}.json", pair.file_stem()))
    }

    pub fn history_path(&self, pair: &CurrencyPair) -> PathBuf {
        self.history_dir
            .join(format!("{}_history.json", pair.file_stem()))
    }

    /// Write the snapshot, and the history when there is a series to keep.
    /// Returns the paths written.
    pub fn save(&self, report: &PairReport) -> Result<Vec<PathBuf>, StoreError> {
        let pair = &report.quote.pair;
        let mut written = Vec::with_capacity(2);

        let snapshot_path = self.snapshot_path(pair);
        write_json(&snapshot_path, &SnapshotRecord::from(&report.quote))?;
        written.push(snapshot_path);

        if !report.series.is_empty() {
            let history_path = self.history_path(pair);
            write_json(&history_path, &HistoryRecord::from_report(report, self.history_days))?;
            written.push(history_path);
        }

        Ok(written)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
