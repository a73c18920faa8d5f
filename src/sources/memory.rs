//! In-memory provider serving fixed series.
//!
//! Symbols follow the Yahoo convention (`USDKRW=X`) so configurations can be
//! swapped between the two providers. Unknown symbols answer NotFound.

use super::PriceProvider;
use crate::error::FetchError;
use crate::types::{CurrencyPair, RawSample};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct InMemoryProvider {
    series: HashMap<String, Vec<RawSample>>,
    failures: HashMap<String, FetchError>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `closes` for `symbol`, one sample per (unix seconds, close).
    pub fn with_series(mut self, symbol: &str, closes: &[(i64, f64)]) -> Self {
        let raw = closes
            .iter()
            .map(|&(timestamp, close)| RawSample {
                timestamp,
                close: Some(close),
            })
            .collect();
        self.series.insert(symbol.to_string(), raw);
        self
    }

    /// Serve raw samples as is, including missing closes.
    pub fn with_raw(mut self, symbol: &str, raw: Vec<RawSample>) -> Self {
        self.series.insert(symbol.to_string(), raw);
        self
    }

    /// Answer every request for `symbol` with `error`.
    pub fn with_failure(mut self, symbol: &str, error: FetchError) -> Self {
        self.failures.insert(symbol.to_string(), error);
        self
    }

    /// Symbols requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, symbol: &str) -> usize {
        self.calls().iter().filter(|s| s.as_str() == symbol).count()
    }
}

#[async_trait]
impl PriceProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn symbol_for(&self, pair: &CurrencyPair) -> String {
        format!("{}{}=X", pair.base, pair.quote)
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        _period: Duration,
    ) -> Result<Vec<RawSample>, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(symbol.to_string());
        }

        if let Some(error) = self.failures.get(symbol) {
            return Err(error.clone());
        }

        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(symbol.to_string()))
    }
}
