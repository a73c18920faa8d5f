//! Simple Moving Average (SMA) indicator.

use crate::services::signals::Indicator;

/// SMA (Simple Moving Average) indicator.
///
/// Mean of the most recent `period` closes. With fewer closes than the
/// period, the mean of whatever is available is returned; only an empty
/// input has no average.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        let window = self.period.min(closes.len());
        if window == 0 {
            return None;
        }

        let sum: f64 = closes.iter().rev().take(window).sum();
        Some(sum / window as f64)
    }
}
