//! Front-end error types.

use thiserror::Error;

/// Malformed numeric text typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a number at all.
    #[error("Invalid number '{0}'. Enter a number, for example 5.5")]
    InvalidNumber(String),

    /// A count that is negative, fractional or too large.
    #[error(
        "Invalid count '{0}'. Enter a whole number from 0 to {max}, for example 5",
        max = crate::input::parse::MAX_COUNT
    )]
    InvalidCount(String),

    /// A rate quote whose per-period value does not fit in a Decimal.
    #[error("Rate {0} is out of range. Use a smaller rate or more periods per year")]
    RateOutOfRange(String),

    /// Nothing between the commas.
    #[error("Cash flow list is empty. Use comma-separated numbers, e.g. -1000,300,400")]
    EmptyCashFlows,

    /// One entry of a comma-separated cash flow list.
    #[error("Invalid cash flow #{index} '{value}'. Use comma-separated numbers, e.g. -1000,300,400")]
    InvalidCashFlow { index: usize, value: String },
}
