use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TvmError;
use crate::time_value;
use crate::types::*;
use crate::TvmResult;

use super::{require_rate_above_minus_one, warn_on_negative_periods};

/// Input for a future value calculation.
///
/// Supply a present lump sum, a payment stream, or both (combined form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureValueInput {
    /// Lump sum invested today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_value: Option<Money>,
    /// Level payment deposited every period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Money>,
    /// Rate per period (decimal)
    pub rate: Rate,
    pub periods: Periods,
    #[serde(default)]
    pub timing: PaymentTiming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureValueOutput {
    pub future_value: Money,
    pub lump_sum_component: Option<Money>,
    pub annuity_component: Option<Money>,
}

/// Future value of a lump sum, an annuity, or both.
pub fn calculate_future_value(
    input: &FutureValueInput,
) -> TvmResult<ComputationOutput<FutureValueOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_rate_above_minus_one(input.rate)?;
    warn_on_negative_periods(input.periods, &mut warnings);

    let lump_sum_component = input
        .present_value
        .map(|pv| time_value::future_value(pv, input.rate, input.periods))
        .transpose()?;

    let annuity_component = input
        .payment
        .map(|pmt| time_value::future_value_annuity(pmt, input.rate, input.periods, input.timing))
        .transpose()?;

    let (future_value, methodology) = match (lump_sum_component, annuity_component) {
        (Some(lump), Some(annuity)) => (
            lump.checked_add(annuity)
                .ok_or_else(|| TvmError::ArithmeticOverflow {
                    context: "combined future value".into(),
                })?,
            "Future value: compounded lump sum plus annuity",
        ),
        (Some(lump), None) => {
            if input.timing.is_due() {
                warnings.push("Payment timing has no effect on a single sum".into());
            }
            (lump, "Future value of a single sum: PV * (1 + r)^n")
        }
        (None, Some(annuity)) => (
            annuity,
            if input.timing.is_due() {
                "Future value of an annuity-due: PMT * ((1 + r)^n - 1) / r * (1 + r)"
            } else {
                "Future value of an ordinary annuity: PMT * ((1 + r)^n - 1) / r"
            },
        ),
        (None, None) => {
            return Err(TvmError::InvalidInput {
                field: "present_value / payment".into(),
                reason: "Provide a present value, a payment, or both".into(),
            });
        }
    };

    let output = FutureValueOutput {
        future_value,
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annuity_due() {
        let input = FutureValueInput {
            present_value: None,
            payment: Some(dec!(100)),
            rate: dec!(0.05),
            periods: dec!(10),
            timing: PaymentTiming::Due,
        };
        let result = calculate_future_value(&input).unwrap();
        assert!((result.result.future_value - dec!(1320.678716)).abs() < dec!(0.000001));
        assert!(result.methodology.contains("annuity-due"));
    }

    #[test]
    fn test_combined_savings_plan() {
        // 1000 today plus 100/period for 10 periods at 5%
        let input = FutureValueInput {
            present_value: Some(dec!(1000)),
            payment: Some(dec!(100)),
            rate: dec!(0.05),
            periods: dec!(10),
            timing: PaymentTiming::Ordinary,
        };
        let out = calculate_future_value(&input).unwrap().result;
        // 1628.89 + 1257.79
        assert!((out.future_value - dec!(2886.68)).abs() < dec!(0.01));
        assert!(out.lump_sum_component.is_some());
        assert!(out.annuity_component.is_some());
    }

    #[test]
    fn test_negative_periods_warns() {
        let input = FutureValueInput {
            present_value: Some(dec!(1000)),
            payment: None,
            rate: dec!(0.05),
            periods: dec!(-2),
            timing: PaymentTiming::Ordinary,
        };
        let result = calculate_future_value(&input).unwrap();
        assert!(!result.warnings.is_empty());
        assert!((result.result.future_value - dec!(907.029478)).abs() < dec!(0.000001));
    }
}
