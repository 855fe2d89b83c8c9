use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TvmError;
use crate::math::checked_mul;
use crate::time_value;
use crate::types::*;
use crate::TvmResult;

/// Input for solving the rate that grows a present amount into a future one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRateInput {
    pub present_value: Money,
    pub future_value: Money,
    pub periods: Periods,
    /// Compounding periods per year, to annualise the periodic rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods_per_year: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRateOutput {
    pub periodic_rate: Rate,
    /// periodic_rate * periods_per_year
    pub nominal_annual_rate: Option<Rate>,
    /// (1 + periodic_rate)^periods_per_year - 1
    pub effective_annual_rate: Option<Rate>,
}

/// Rate per period: (FV / PV)^(1/n) - 1, optionally annualised.
pub fn calculate_interest_rate(
    input: &InterestRateInput,
) -> TvmResult<ComputationOutput<InterestRateOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let periodic_rate =
        time_value::periodic_rate(input.present_value, input.future_value, input.periods)?;

    if periodic_rate < Decimal::ZERO {
        warnings.push("Future value is below present value: the rate is negative".into());
    }

    let (nominal_annual_rate, effective_annual_rate) = match input.periods_per_year {
        Some(ppy) if ppy <= Decimal::ZERO => {
            return Err(TvmError::InvalidInput {
                field: "periods_per_year".into(),
                reason: "Periods per year must be positive".into(),
            });
        }
        Some(ppy) => {
            let nominal = checked_mul(periodic_rate, ppy, "nominal annual rate")?;
            let effective = time_value::growth_factor(periodic_rate, ppy)?
                .checked_sub(Decimal::ONE)
                .ok_or_else(|| TvmError::ArithmeticOverflow {
                    context: "effective annual rate".into(),
                })?;
            (Some(nominal), Some(effective))
        }
        None => (None, None),
    };

    let output = InterestRateOutput {
        periodic_rate,
        nominal_annual_rate,
        effective_annual_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Periodic rate: (FV / PV)^(1/n) - 1",
        &serde_json::json!({
            "present_value": input.present_value.to_string(),
            "future_value": input.future_value.to_string(),
            "periods": input.periods.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
