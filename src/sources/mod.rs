//! Price data providers.

pub mod memory;
pub mod yahoo;

pub use memory::InMemoryProvider;
pub use yahoo::YahooFinanceClient;

use crate::error::FetchError;
use crate::types::{CurrencyPair, RawSample};
use async_trait::async_trait;
use std::time::Duration;

/// Data-source boundary: something that can return closing prices for a symbol.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    /// The provider's instrument identifier for a currency pair.
    fn symbol_for(&self, pair: &CurrencyPair) -> String;

    /// Fetch daily closes covering `period` up to now.
    ///
    /// Samples may come back in any order and may contain gaps or missing
    /// closes; the accessor normalizes them.
    async fn fetch_series(
        &self,
        symbol: &str,
        period: Duration,
    ) -> Result<Vec<RawSample>, FetchError>;
}
