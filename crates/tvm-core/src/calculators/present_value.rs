use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TvmError;
use crate::time_value;
use crate::types::*;
use crate::TvmResult;

use super::{require_rate_above_minus_one, warn_on_negative_periods};

/// Input for a present value calculation.
///
/// Supply a future lump sum, a payment stream, or both (combined form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueInput {
    /// Lump sum received after `periods`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_value: Option<Money>,
    /// Level payment received every period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Money>,
    /// Rate per period (decimal)
    pub rate: Rate,
    pub periods: Periods,
    /// Payment timing for the annuity leg
    #[serde(default)]
    pub timing: PaymentTiming,
}

/// Output of a present value calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueOutput {
    pub present_value: Money,
    /// Present value of the lump sum alone
    pub lump_sum_component: Option<Money>,
    /// Present value of the payment stream alone
    pub annuity_component: Option<Money>,
}

/// Present value of a lump sum, an annuity, or both.
pub fn calculate_present_value(
    input: &PresentValueInput,
) -> TvmResult<ComputationOutput<PresentValueOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_rate_above_minus_one(input.rate)?;
    warn_on_negative_periods(input.periods, &mut warnings);

    let lump_sum_component = input
        .future_value
        .map(|fv| time_value::present_value(fv, input.rate, input.periods))
        .transpose()?;

    let annuity_component = input
        .payment
        .map(|pmt| time_value::present_value_annuity(pmt, input.rate, input.periods, input.timing))
        .transpose()?;

    let (present_value, methodology) = match (lump_sum_component, annuity_component) {
        (Some(lump), Some(annuity)) => (
            lump.checked_add(annuity)
                .ok_or_else(|| TvmError::ArithmeticOverflow {
                    context: "combined present value".into(),
                })?,
            "Present value: annuity plus discounted lump sum",
        ),
        (Some(lump), None) => {
            if input.timing.is_due() {
                warnings.push("Payment timing has no effect on a single sum".into());
            }
            (lump, "Present value of a single sum: FV / (1 + r)^n")
        }
        (None, Some(annuity)) => (
            annuity,
            if input.timing.is_due() {
                "Present value of an annuity-due: PMT * (1 - (1 + r)^-n) / r * (1 + r)"
            } else {
                "Present value of an ordinary annuity: PMT * (1 - (1 + r)^-n) / r"
            },
        ),
        (None, None) => {
            return Err(TvmError::InvalidInput {
                field: "future_value / payment".into(),
                reason: "Provide a future value, a payment, or both".into(),
            });
        }
    };

    let output = PresentValueOutput {
        present_value,
        lump_sum_component,
        annuity_component,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "rate": input.rate.to_string(),
            "periods": input.periods.to_string(),
            "timing": input.timing,
        }),
        warnings,
        elapsed,
        output,
    ))
}
