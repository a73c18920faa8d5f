//! fxpulse - technical indicators, signals and cross rates for FX pairs

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{EvalError, FetchError, StoreError};
pub use services::{BatchRunner, JsonStore, PairEvaluator};
pub use sources::PriceProvider;
