//! MACD (Moving Average Convergence Divergence) indicator.

use super::Ema;
use crate::services::signals::Indicator;

/// MACD indicator.
///
/// MACD Line = EMA(12) - EMA(26) over the whole series. Below the slow
/// period a partial EMA is not meaningful, so the line is reported as 0.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
        }
    }
}

impl Indicator for Macd {
    fn min_periods(&self) -> usize {
        self.slow_period
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        if closes.len() < self.slow_period {
            return Some(0.0);
        }

        let fast = Ema::new(self.fast_period).calculate(closes)?;
        let slow = Ema::new(self.slow_period).calculate(closes)?;
        Some(fast - slow)
    }
}
