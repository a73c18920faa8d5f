//! Relative Strength Index (RSI) indicator.

use crate::services::signals::Indicator;

/// Value reported when there is no loss to compare against.
const NEUTRAL_RSI: f64 = 50.0;

/// RSI (Relative Strength Index) indicator.
///
/// Compares the average gain to the average loss over the most recent
/// `period` price changes (simple averages). Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// With fewer closes the window shrinks to `len - 1` changes. An empty
/// window or a zero average loss yields a neutral 50 rather than 100, so a
/// flat or only-rising series is not read as overbought.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Rsi {
    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        let window = self.period.min(closes.len().saturating_sub(1));
        if window == 0 {
            return Some(NEUTRAL_RSI);
        }

        let start = closes.len() - window - 1;
        let (gain, loss) = closes[start..]
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold((0.0, 0.0), |(gain, loss), change| {
                if change > 0.0 {
                    (gain + change, loss)
                } else {
                    (gain, loss - change)
                }
            });

        let avg_gain = gain / window as f64;
        let avg_loss = loss / window as f64;

        if avg_loss == 0.0 {
            return Some(NEUTRAL_RSI);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}
