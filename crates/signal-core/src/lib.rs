pub mod error;
pub mod interpolate;
pub mod market_hours;
pub mod types;

pub use error::*;
pub use types::*;
