//! Directional forecasts from recent percentage change.

use crate::types::{Horizon, PriceSeries, TrendDirection, TrendForecast};

/// Short and long horizon forecasts for a series.
pub fn predict(series: &PriceSeries) -> (TrendForecast, TrendForecast) {
    let closes = series.closes();
    (
        forecast(&closes, Horizon::Short),
        forecast(&closes, Horizon::Long),
    )
}

/// Compare the latest close with the close `horizon.lookback()` samples
/// earlier. Without that much history the direction is UNKNOWN.
pub fn forecast(closes: &[f64], horizon: Horizon) -> TrendForecast {
    let lookback = horizon.lookback();
    if closes.len() <= lookback {
        return TrendForecast::unknown(horizon);
    }

    let latest = closes[closes.len() - 1];
    let earlier = closes[closes.len() - 1 - lookback];
    let change_pct = (latest - earlier) / earlier * 100.0;

    let threshold = horizon.threshold_pct();
    let direction = if change_pct > threshold {
        TrendDirection::Up
    } else if change_pct < -threshold {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    TrendForecast {
        direction,
        confidence: (change_pct.abs() * horizon.confidence_scale()).min(100.0),
        horizon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `len` closes at `earlier`, except the last one.
    fn closes_ending(earlier: f64, latest: f64, len: usize) -> Vec<f64> {
        let mut closes = vec![earlier; len];
        closes[len - 1] = latest;
        closes
    }

    #[test]
    fn test_short_forecast_up() {
        let closes = closes_ending(100.0, 101.5, 11);
        let f = forecast(&closes, Horizon::Short);
        assert_eq!(f.direction, TrendDirection::Up);
        assert!((f.confidence - 15.0).abs() < 1e-9);
        assert_eq!(f.horizon, Horizon::Short);
    }

    #[test]
    fn test_short_forecast_down_capped_confidence() {
        let closes = closes_ending(100.0, 80.0, 20);
        let f = forecast(&closes, Horizon::Short);
        assert_eq!(f.direction, TrendDirection::Down);
        assert_eq!(f.confidence, 100.0);
    }

    #[test]
    fn test_short_forecast_flat_inside_threshold() {
        let closes = closes_ending(100.0, 100.5, 11);
        let f = forecast(&closes, Horizon::Short);
        assert_eq!(f.direction, TrendDirection::Flat);
        assert!((f.confidence - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_boundaries_are_flat() {
        for latest in [101.0, 99.0] {
            let f = forecast(&closes_ending(100.0, latest, 11), Horizon::Short);
            assert_eq!(f.direction, TrendDirection::Flat);
            assert!((f.confidence - 10.0).abs() < 1e-9);
        }

        for latest in [102.0, 98.0] {
            let f = forecast(&closes_ending(100.0, latest, 61), Horizon::Long);
            assert_eq!(f.direction, TrendDirection::Flat);
            assert!((f.confidence - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_long_forecast_thresholds() {
        let up = forecast(&closes_ending(100.0, 103.0, 61), Horizon::Long);
        assert_eq!(up.direction, TrendDirection::Up);
        assert!((up.confidence - 15.0).abs() < 1e-9);

        let flat = forecast(&closes_ending(100.0, 98.5, 61), Horizon::Long);
        assert_eq!(flat.direction, TrendDirection::Flat);

        let down = forecast(&closes_ending(100.0, 97.0, 80), Horizon::Long);
        assert_eq!(down.direction, TrendDirection::Down);
    }

    #[test]
    fn test_insufficient_history_is_unknown() {
        let closes = vec![100.0; 10];
        assert_eq!(forecast(&closes, Horizon::Short), TrendForecast::unknown(Horizon::Short));

        let closes = vec![100.0; 60];
        assert_eq!(forecast(&closes, Horizon::Long), TrendForecast::unknown(Horizon::Long));
        assert_eq!(forecast(&closes, Horizon::Short).direction, TrendDirection::Flat);
    }
}
