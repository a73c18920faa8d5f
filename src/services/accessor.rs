//! Price series access on top of a provider.

use super::RetryPolicy;
use crate::error::FetchError;
use crate::sources::PriceProvider;
use crate::types::{CurrencyPair, PriceSeries};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Fetches normalized price series, retrying transient provider failures.
#[derive(Clone)]
pub struct PriceSeriesAccessor {
    provider: Arc<dyn PriceProvider>,
    retry: RetryPolicy,
}

impl PriceSeriesAccessor {
    pub fn new(provider: Arc<dyn PriceProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Fetch a chronologically ascending, de-duplicated series for `symbol`.
    ///
    /// A response that normalizes to no samples counts as an empty result
    /// and is retried like any other transient failure.
    pub async fn fetch(&self, symbol: &str, lookback: Duration) -> Result<PriceSeries, FetchError> {
        let series = self
            .retry
            .run(symbol, move || async move {
                let raw = self.provider.fetch_series(symbol, lookback).await?;
                let series = PriceSeries::from_raw(symbol, &raw);
                if series.is_empty() {
                    return Err(FetchError::Transient(format!(
                        "No valid samples for {} ({} raw)",
                        symbol,
                        raw.len()
                    )));
                }
                Ok(series)
            })
            .await?;

        debug!(
            "Fetched {} samples for {} from {}",
            series.len(),
            symbol,
            self.provider.name()
        );
        Ok(series)
    }

    /// Fetch the direct quote for a pair.
    pub async fn fetch_pair(
        &self,
        pair: &CurrencyPair,
        lookback: Duration,
    ) -> Result<PriceSeries, FetchError> {
        let symbol = self.provider.symbol_for(pair);
        self.fetch(&symbol, lookback).await
    }
}
