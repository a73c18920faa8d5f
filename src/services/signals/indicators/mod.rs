//! Technical indicator implementations.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volatility;

pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;
pub use volatility::Volatility;

/// Moving average windows used by the snapshot.
pub const SHORT_WINDOW: usize = 5;
pub const MEDIUM_WINDOW: usize = 20;
pub const LONG_WINDOW: usize = 60;
