//! Exponential Moving Average (EMA) indicator.

use crate::services::signals::Indicator;

/// EMA (Exponential Moving Average) indicator.
///
/// Smoothing factor `2 / (period + 1)`, seeded from the first close and
/// run recursively over the whole input with no bias adjustment.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        let (first, rest) = closes.split_first()?;
        let multiplier = self.multiplier();

        let ema = rest
            .iter()
            .fold(*first, |ema, close| (close - ema) * multiplier + ema);
        Some(ema)
    }
}
