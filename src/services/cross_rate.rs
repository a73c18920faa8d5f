//! Cross-rate derivation through a reference currency.
//!
//! A pair the provider does not quote directly (say EUR/KRW) is composed
//! from two legs against the reference currency: EUR/USD and KRW/USD.
//! `EUR/KRW[t] = EUR/USD[t] / KRW/USD[t]` for every day both legs share.

use super::PriceSeriesAccessor;
use crate::error::EvalError;
use crate::types::{CurrencyPair, PriceSample, PriceSeries};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Minimum aligned samples for a usable cross rate (enough for a change %).
const MIN_CROSS_SAMPLES: usize = 2;

/// Reciprocal of every close, e.g. KRW/USD from USD/KRW.
pub fn invert(series: &PriceSeries) -> PriceSeries {
    let samples = series
        .samples()
        .iter()
        .map(|s| PriceSample::new(s.timestamp, 1.0 / s.close))
        .collect();
    PriceSeries::new(series.symbol(), samples)
}

/// Divide the base leg by the quote leg on every UTC date present in both.
/// Composed samples keep the base leg's timestamps.
pub fn compose(base_leg: &PriceSeries, quote_leg: &PriceSeries) -> PriceSeries {
    let quote_by_date: HashMap<NaiveDate, f64> = quote_leg
        .samples()
        .iter()
        .map(|s| (s.date(), s.close))
        .collect();

    let samples = base_leg
        .samples()
        .iter()
        .filter_map(|b| {
            quote_by_date
                .get(&b.date())
                .map(|q| PriceSample::new(b.timestamp, b.close / q))
        })
        .collect();

    PriceSeries::new(
        format!("{}/{}", base_leg.symbol(), quote_leg.symbol()),
        samples,
    )
}

/// Derives a pair from two legs quoted against a common reference currency.
#[derive(Clone)]
pub struct CrossRateResolver {
    accessor: PriceSeriesAccessor,
    reference: String,
    lookback: Duration,
}

impl CrossRateResolver {
    pub fn new(accessor: PriceSeriesAccessor, reference: &str, lookback: Duration) -> Self {
        Self {
            accessor,
            reference: reference.to_ascii_uppercase(),
            lookback,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Compose `base/quote` through the reference currency.
    pub async fn resolve(&self, base: &str, quote: &str) -> Result<PriceSeries, EvalError> {
        let label = format!("{}/{}", base, quote);
        let base_is_ref = base.eq_ignore_ascii_case(&self.reference);
        let quote_is_ref = quote.eq_ignore_ascii_case(&self.reference);

        if base_is_ref && quote_is_ref {
            return Err(EvalError::CrossRateUnavailable(format!(
                "{} has no legs through {}",
                label, self.reference
            )));
        }

        // A leg against the reference currency itself is the constant 1.
        let base_leg = if base_is_ref {
            None
        } else {
            Some(self.fetch_leg(base).await?)
        };
        let quote_leg = if quote_is_ref {
            None
        } else {
            Some(self.fetch_leg(quote).await?)
        };

        let composed = match (base_leg, quote_leg) {
            (Some(b), Some(q)) => compose(&b, &q),
            (Some(b), None) => b,
            (None, Some(q)) => invert(&q),
            (None, None) => PriceSeries::default(),
        };

        if composed.len() < MIN_CROSS_SAMPLES {
            return Err(EvalError::CrossRateUnavailable(format!(
                "{} legs share {} dates, need {}",
                label,
                composed.len(),
                MIN_CROSS_SAMPLES
            )));
        }

        info!(
            "Derived {} through {} ({} samples)",
            label,
            self.reference,
            composed.len()
        );
        Ok(composed.with_symbol(format!("{} via {}", label, self.reference)))
    }

    /// Fetch `ccy/REF`, falling back to the inverse quote `REF/ccy`.
    async fn fetch_leg(&self, ccy: &str) -> Result<PriceSeries, EvalError> {
        let direct = CurrencyPair::new(ccy, &self.reference).ok_or_else(|| {
            EvalError::CrossRateUnavailable(format!("invalid currency code {}", ccy))
        })?;

        let direct_err = match self.accessor.fetch_pair(&direct, self.lookback).await {
            Ok(series) => return Ok(series),
            Err(e) => e,
        };
        debug!("Leg {} unavailable ({}), trying inverse", direct, direct_err);

        match self
            .accessor
            .fetch_pair(&direct.inverse(), self.lookback)
            .await
        {
            Ok(series) => Ok(invert(&series)),
            Err(inverse_err) => Err(EvalError::CrossRateUnavailable(format!(
                "no {} leg: {}; inverse: {}",
                direct, direct_err, inverse_err
            ))),
        }
    }
}
