use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value;
use crate::types::*;
use crate::TvmResult;

/// Input for the number of periods needed to reach a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsInput {
    pub present_value: Money,
    pub future_value: Money,
    /// Rate per period (decimal)
    pub rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsOutput {
    /// Exact (fractional) period count
    pub periods: Periods,
    /// Whole periods needed to reach or pass the target
    pub whole_periods: Periods,
}

/// Periods to target: ln(FV / PV) / ln(1 + r)
pub fn calculate_periods(input: &PeriodsInput) -> TvmResult<ComputationOutput<PeriodsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let periods =
        time_value::number_of_periods(input.present_value, input.future_value, input.rate)?;

    if periods < Decimal::ZERO {
        warnings.push(
            "Negative period count: the target is only reached going back in time at this rate"
                .into(),
        );
    }

    let output = PeriodsOutput {
        periods,
        whole_periods: periods.ceil(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Number of periods: ln(FV / PV) / ln(1 + r)",
        &serde_json::json!({
            "present_value": input.present_value.to_string(),
            "future_value": input.future_value.to_string(),
            "rate": input.rate.to_string(),
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
    fn test_doubling_time() {
        let input = PeriodsInput {
            present_value: dec!(1000),
            future_value: dec!(2000),
            rate: dec!(0.10),
        };
        let result = calculate_periods(&input).unwrap();
        assert!((result.result.periods - dec!(7.27)).abs() < dec!(0.01));
        assert_eq!(result.result.whole_periods, dec!(8));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_decaying_rate_warns() {
        let input = PeriodsInput {
            present_value: dec!(1000),
            future_value: dec!(2000),
            rate: dec!(-0.10),
        };
        let result = calculate_periods(&input).unwrap();
        assert!(result.result.periods < Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let input = PeriodsInput {
            present_value: Decimal::ZERO,
            future_value: dec!(2000),
            rate: dec!(0.10),
        };
        assert!(calculate_periods(&input).is_err());
    }
}
