use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical directional signal for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongUp,
    Up,
    Down,
    StrongDown,
    Flat,
    /// Every path for the pair failed; never produced by the classifier.
    NoData,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::StrongUp => "STRONG_UP",
            Signal::Up => "UP",
            Signal::Down => "DOWN",
            Signal::StrongDown => "STRONG_DOWN",
            Signal::Flat => "FLAT",
            Signal::NoData => "NO_DATA",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a trend forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    /// Not enough history to look back over the horizon.
    Unknown,
}

/// Forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Short,
    Long,
}

impl Horizon {
    /// Number of samples to look back.
    pub fn lookback(&self) -> usize {
        match self {
            Horizon::Short => 10,
            Horizon::Long => 60,
        }
    }

    /// Absolute percent change beyond which the forecast is directional.
    pub fn threshold_pct(&self) -> f64 {
        match self {
            Horizon::Short => 1.0,
            Horizon::Long => 2.0,
        }
    }

    /// Multiplier turning |percent change| into a 0-100 confidence.
    pub fn confidence_scale(&self) -> f64 {
        match self {
            Horizon::Short => 10.0,
            Horizon::Long => 5.0,
        }
    }
}

/// Directional forecast with a confidence in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendForecast {
    pub direction: TrendDirection,
    pub confidence: f64,
    pub horizon: Horizon,
}

impl TrendForecast {
    pub fn unknown(horizon: Horizon) -> Self {
        Self {
            direction: TrendDirection::Unknown,
            confidence: 0.0,
            horizon,
        }
    }
}

/// Indicator values taken from the tail of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub ma_short: Option<f64>,
    pub ma_medium: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: f64,
    pub macd: f64,
    pub volatility: Option<f64>,
}

impl IndicatorSnapshot {
    /// Snapshot of an empty series: no averages, neutral RSI, zero MACD.
    pub fn empty() -> Self {
        Self {
            ma_short: None,
            ma_medium: None,
            ma_long: None,
            rsi: 50.0,
            macd: 0.0,
            volatility: None,
        }
    }
}

impl Default for IndicatorSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
