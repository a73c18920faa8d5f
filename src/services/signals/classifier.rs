//! Threshold rules turning an indicator snapshot into signals.

use crate::types::{IndicatorSnapshot, Signal};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Classify a snapshot into `(short_term, long_term)` signals.
///
/// The short-term rules read a short MA above the medium MA as a
/// mean-reversion DOWN signal (and the reverse as UP), not as momentum.
/// A horizon whose moving averages are absent is FLAT.
pub fn classify(snapshot: &IndicatorSnapshot) -> (Signal, Signal) {
    (short_term(snapshot), long_term(snapshot))
}

fn short_term(s: &IndicatorSnapshot) -> Signal {
    let (Some(short), Some(medium)) = (s.ma_short, s.ma_medium) else {
        return Signal::Flat;
    };

    if s.rsi > RSI_OVERBOUGHT && short > medium {
        Signal::StrongDown
    } else if s.rsi < RSI_OVERSOLD && short < medium {
        Signal::StrongUp
    } else if short > medium {
        Signal::Down
    } else if short < medium {
        Signal::Up
    } else {
        Signal::Flat
    }
}

fn long_term(s: &IndicatorSnapshot) -> Signal {
    let (Some(medium), Some(long)) = (s.ma_medium, s.ma_long) else {
        return Signal::Flat;
    };

    if s.macd > 0.0 && medium > long {
        Signal::StrongUp
    } else if s.macd < 0.0 && medium < long {
        Signal::StrongDown
    } else if s.macd > 0.0 {
        Signal::Up
    } else if s.macd < 0.0 {
        Signal::Down
    } else {
        Signal::Flat
    }
}
