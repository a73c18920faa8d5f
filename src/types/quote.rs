use super::{CurrencyPair, Horizon, IndicatorSnapshot, PriceSeries, Signal, TrendForecast};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the series behind a quote was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteSource {
    Direct,
    CrossRate,
    /// Nothing could be fetched.
    None,
}

/// Final output record for one pair and one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPairQuote {
    pub pair: CurrencyPair,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "lastValue")]
    pub last_close: f64,
    #[serde(rename = "prevValue")]
    pub prev_close: f64,
    pub change_percent: f64,
    pub indicators: IndicatorSnapshot,
    pub signal_short: Signal,
    pub signal_long: Signal,
    pub forecast_short: TrendForecast,
    pub forecast_long: TrendForecast,
    pub source: QuoteSource,
}

impl CurrencyPairQuote {
    /// Sentinel record for a pair whose every fetch path failed.
    pub fn no_data(pair: CurrencyPair, timestamp: DateTime<Utc>) -> Self {
        Self {
            pair,
            timestamp,
            last_close: 0.0,
            prev_close: 0.0,
            change_percent: 0.0,
            indicators: IndicatorSnapshot::empty(),
            signal_short: Signal::NoData,
            signal_long: Signal::NoData,
            forecast_short: TrendForecast::unknown(Horizon::Short),
            forecast_long: TrendForecast::unknown(Horizon::Long),
            source: QuoteSource::None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.signal_short == Signal::NoData && self.signal_long == Signal::NoData
    }
}

/// A quote together with the series it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub quote: CurrencyPairQuote,
    /// Empty when the quote is the no-data sentinel.
    pub series: PriceSeries,
}

impl PairReport {
    pub fn no_data(pair: CurrencyPair, timestamp: DateTime<Utc>) -> Self {
        Self {
            quote: CurrencyPairQuote::no_data(pair, timestamp),
            series: PriceSeries::default(),
        }
    }
}
