use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency pair such as USD/KRW (one BASE costs N QUOTE).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    /// Build a pair from two ISO codes. Returns None unless both are 3 ASCII letters.
    pub fn new(base: &str, quote: &str) -> Option<Self> {
        let valid = |code: &str| code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic());
        if !valid(base) || !valid(quote) {
            return None;
        }
        Some(Self {
            base: base.to_ascii_uppercase(),
            quote: quote.to_ascii_uppercase(),
        })
    }

    /// Parse "USD/KRW", "USD_KRW", "USD-KRW" or "USDKRW".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split(['/', '_', '-']).collect::<Vec<_>>().as_slice() {
            [base, quote] => Self::new(base, quote),
            [joined] if joined.len() == 6 && joined.is_ascii() => {
                Self::new(&joined[..3], &joined[3..])
            }
            _ => None,
        }
    }

    /// The same pair quoted the other way round.
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// File-system friendly key, e.g. "USD_KRW".
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid currency pair: {}", value))
    }
}

/// Unvalidated sample as handed over by a provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    pub close: Option<f64>,
}

/// A single closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }

    /// UTC calendar day of this sample, used to line up cross-rate legs.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Chronologically ascending closes for one symbol.
///
/// Construction normalizes the input: samples with a non-finite or
/// non-positive close are dropped, the rest are sorted by timestamp and
/// duplicate timestamps collapse to the last one seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, samples: Vec<PriceSample>) -> Self {
        let mut samples: Vec<PriceSample> = samples.into_iter().filter(|s| s.is_valid()).collect();
        samples.sort_by_key(|s| s.timestamp);

        let mut deduped: Vec<PriceSample> = Vec::with_capacity(samples.len());
        for sample in samples {
            match deduped.last_mut() {
                Some(last) if last.timestamp == sample.timestamp => *last = sample,
                _ => deduped.push(sample),
            }
        }

        Self {
            symbol: symbol.into(),
            samples: deduped,
        }
    }

    /// Normalize raw provider output. Samples without a close or with an
    /// out-of-range timestamp are dropped.
    pub fn from_raw(symbol: impl Into<String>, raw: &[RawSample]) -> Self {
        let samples = raw
            .iter()
            .filter_map(|r| {
                let close = r.close?;
                let timestamp = DateTime::from_timestamp(r.timestamp, 0)?;
                Some(PriceSample::new(timestamp, close))
            })
            .collect();
        Self::new(symbol, samples)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn closes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.close).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&PriceSample> {
        self.samples.last()
    }

    /// The sample before the last one.
    pub fn previous(&self) -> Option<&PriceSample> {
        self.samples.len().checked_sub(2).map(|i| &self.samples[i])
    }

    /// The most recent `n` samples (all of them if fewer exist).
    pub fn tail(&self, n: usize) -> &[PriceSample] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples[start..]
    }

    /// Rename the series, e.g. after composing a cross rate.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}
