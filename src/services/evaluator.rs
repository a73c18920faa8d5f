//! Single-pair evaluation: fetch, fall back to a cross rate, compute,
//! classify and forecast.

use super::signals::{classify, compute, predict};
use super::{CrossRateResolver, PriceSeriesAccessor, RetryPolicy};
use crate::config::Config;
use crate::error::{EvalError, Result};
use crate::sources::PriceProvider;
use crate::types::{CurrencyPair, CurrencyPairQuote, PairReport, PriceSeries, QuoteSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Evaluates currency pairs into quotes. Holds no per-pair state.
#[derive(Clone)]
pub struct PairEvaluator {
    accessor: PriceSeriesAccessor,
    resolver: CrossRateResolver,
    lookback: Duration,
}

impl PairEvaluator {
    pub fn new(accessor: PriceSeriesAccessor, resolver: CrossRateResolver, lookback: Duration) -> Self {
        Self {
            accessor,
            resolver,
            lookback,
        }
    }

    /// Build an evaluator around a provider using the configured retry
    /// policy, reference currency and lookback.
    pub fn from_config(provider: Arc<dyn PriceProvider>, config: &Config) -> Self {
        let retry = RetryPolicy::fixed(config.retry_delay(), config.retry_attempts);
        let accessor = PriceSeriesAccessor::new(provider, retry);
        let resolver =
            CrossRateResolver::new(accessor.clone(), &config.reference_currency, config.lookback());
        Self::new(accessor, resolver, config.lookback())
    }

    /// Evaluate a pair. Never fails: a pair with no usable data comes back
    /// as the NO_DATA sentinel.
    pub async fn evaluate(&self, pair: &CurrencyPair) -> PairReport {
        let now = Utc::now();

        let outcome = match self.load_series(pair).await {
            Ok((series, source)) => {
                build_quote(pair, &series, source, now).map(|quote| PairReport { quote, series })
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(report) => {
                debug!(
                    "{}: last {:.4} ({:+.2}%), short {}, long {}",
                    pair,
                    report.quote.last_close,
                    report.quote.change_percent,
                    report.quote.signal_short,
                    report.quote.signal_long
                );
                report
            }
            Err(e) => {
                warn!("No data for {}: {}", pair, e);
                PairReport::no_data(pair.clone(), now)
            }
        }
    }

    /// Fetch the direct quote, or compose a cross rate when the provider
    /// does not know the pair.
    pub async fn load_series(&self, pair: &CurrencyPair) -> Result<(PriceSeries, QuoteSource)> {
        match self.accessor.fetch_pair(pair, self.lookback).await {
            Ok(series) => Ok((series, QuoteSource::Direct)),
            Err(e) if e.is_not_found() => {
                info!(
                    "{} not quoted directly, deriving through {}",
                    pair,
                    self.resolver.reference()
                );
                let series = self.resolver.resolve(&pair.base, &pair.quote).await?;
                Ok((series, QuoteSource::CrossRate))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Assemble the output record for a non-empty series.
pub fn build_quote(
    pair: &CurrencyPair,
    series: &PriceSeries,
    source: QuoteSource,
    timestamp: DateTime<Utc>,
) -> Result<CurrencyPairQuote> {
    let last = series
        .last()
        .ok_or_else(|| EvalError::InsufficientHistory(format!("{} has no samples", pair)))?;
    let prev = series.previous().unwrap_or(last);
    let change_percent = (last.close - prev.close) / prev.close * 100.0;

    let indicators = compute(series);
    let (signal_short, signal_long) = classify(&indicators);
    let (forecast_short, forecast_long) = predict(series);

    Ok(CurrencyPairQuote {
        pair: pair.clone(),
        timestamp,
        last_close: last.close,
        prev_close: prev.close,
        change_percent,
        indicators,
        signal_short,
        signal_long,
        forecast_short,
        forecast_long,
        source,
    })
}
