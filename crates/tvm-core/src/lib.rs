pub mod cash_flows;
pub mod error;
pub mod format;
mod math;
pub mod time_value;
pub mod types;

#[cfg(feature = "calculators")]
pub mod calculators;

pub use error::TvmError;
pub use types::*;

/// Standard result type for all time-value operations
pub type TvmResult<T> = Result<T, TvmError>;
