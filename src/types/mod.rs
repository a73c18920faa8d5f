pub mod price;
pub mod quote;
pub mod signals;

pub use price::*;
pub use quote::*;
pub use signals::*;
