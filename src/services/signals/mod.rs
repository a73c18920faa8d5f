//! Indicator computation, signal classification and trend forecasts.
//!
//! Everything here is a pure function of the closes it is given: no clock,
//! no I/O, no state carried between calls.

pub mod classifier;
pub mod indicators;
pub mod trend;

pub use classifier::classify;
pub use trend::predict;

use crate::types::{IndicatorSnapshot, PriceSeries};
use indicators::{Macd, Rsi, Sma, Volatility, LONG_WINDOW, MEDIUM_WINDOW, SHORT_WINDOW};

/// Trait for implementing technical indicators over closing prices.
pub trait Indicator: Send + Sync {
    /// Number of closes needed for a full-window value.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator from chronologically ascending closes.
    /// Returns None if the indicator has no value for this input.
    fn calculate(&self, closes: &[f64]) -> Option<f64>;
}

/// Indicator snapshot for the tail of a series.
pub fn compute(series: &PriceSeries) -> IndicatorSnapshot {
    compute_closes(&series.closes())
}

/// Indicator snapshot for chronologically ascending closes.
///
/// A moving average whose window is longer than the input is absent.
pub fn compute_closes(closes: &[f64]) -> IndicatorSnapshot {
    let full_window = |sma: Sma| {
        if closes.len() >= sma.min_periods() {
            sma.calculate(closes)
        } else {
            None
        }
    };

    IndicatorSnapshot {
        ma_short: full_window(Sma::new(SHORT_WINDOW)),
        ma_medium: full_window(Sma::new(MEDIUM_WINDOW)),
        ma_long: full_window(Sma::new(LONG_WINDOW)),
        rsi: Rsi::default().calculate(closes).unwrap_or(50.0),
        macd: Macd::default().calculate(closes).unwrap_or(0.0),
        volatility: Volatility::default().calculate(closes),
    }
}
