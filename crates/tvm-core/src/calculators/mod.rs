//! Input/output calculators wrapping the formula engine in a
//! [`ComputationOutput`](crate::types::ComputationOutput) envelope.
//!
//! These are the entry points used by the CLI and the bindings: every input
//! struct deserialises from JSON, every result serialises back.

pub mod future_value;
pub mod interest_rate;
pub mod irr;
pub mod npv;
pub mod payment;
pub mod periods;
pub mod present_value;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::TvmError;
use crate::TvmResult;

pub(crate) fn warn_on_negative_periods(periods: Decimal, warnings: &mut Vec<String>) {
    if periods < Decimal::ZERO {
        warnings.push(format!(
            "Negative period count ({periods}) moves the calculation backwards in time"
        ));
    }
}

pub(crate) fn require_rate_above_minus_one(rate: Decimal) -> TvmResult<()> {
    if rate <= dec!(-1) {
        return Err(TvmError::InvalidInput {
            field: "rate".into(),
            reason: "Rate per period must be greater than -100%".into(),
        });
    }
    Ok(())
}
