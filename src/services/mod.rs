pub mod accessor;
pub mod batch;
pub mod cross_rate;
pub mod evaluator;
pub mod retry;
pub mod signals;
pub mod store;

pub use accessor::PriceSeriesAccessor;
pub use batch::BatchRunner;
pub use cross_rate::CrossRateResolver;
pub use evaluator::{build_quote, PairEvaluator};
pub use retry::RetryPolicy;
pub use store::JsonStore;
