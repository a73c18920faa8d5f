//! Close-price volatility.

use crate::services::signals::Indicator;

/// Sample standard deviation (n - 1) of the most recent `period` closes.
///
/// The window shrinks to the available closes; fewer than two closes have
/// no sample deviation.
pub struct Volatility {
    period: usize,
}

impl Default for Volatility {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Volatility {
    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        let window = self.period.min(closes.len());
        if window < 2 {
            return None;
        }

        let recent = &closes[closes.len() - window..];
        let mean = recent.iter().sum::<f64>() / window as f64;
        let variance = recent.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
        Some(variance.sqrt())
    }
}
