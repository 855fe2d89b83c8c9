use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TvmError;
use crate::math::{checked_mul, checked_sub};
use crate::time_value;
use crate::types::*;
use crate::TvmResult;

use super::require_rate_above_minus_one;

/// What the payment stream has to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTarget {
    /// Amortise a present amount (loan)
    Loan,
    /// Accumulate a future amount (savings goal)
    SavingsGoal,
}

/// Input for a level payment calculation. Exactly one of `present_value`
/// and `future_value` must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Loan principal to amortise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_value: Option<Money>,
    /// Savings target to reach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_value: Option<Money>,
    pub rate: Rate,
    pub periods: Periods,
    #[serde(default)]
    pub timing: PaymentTiming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub payment: Money,
    pub target: PaymentTarget,
    /// payment * periods
    pub total_paid: Money,
    /// Interest paid on the loan, or interest earned towards the goal
    pub total_interest: Money,
}

/// Level payment for a loan or a savings goal.
pub fn calculate_payment(input: &PaymentInput) -> TvmResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_rate_above_minus_one(input.rate)?;
    if input.periods <= Decimal::ZERO {
        return Err(TvmError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let (target, amount, payment) = match (input.present_value, input.future_value) {
        (Some(pv), None) => (
            PaymentTarget::Loan,
            pv,
            time_value::payment_from_present_value(pv, input.rate, input.periods, input.timing)?,
        ),
        (None, Some(fv)) => (
            PaymentTarget::SavingsGoal,
            fv,
            time_value::payment_from_future_value(fv, input.rate, input.periods, input.timing)?,
        ),
        (Some(_), Some(_)) => {
            return Err(TvmError::InvalidInput {
                field: "present_value / future_value".into(),
                reason: "Provide either a loan amount or a savings target, not both".into(),
            });
        }
        (None, None) => {
            return Err(TvmError::InvalidInput {
                field: "present_value / future_value".into(),
                reason: "Provide a loan amount or a savings target".into(),
            });
        }
    };

    if amount < Decimal::ZERO {
        warnings.push("Negative target amount yields a negative payment".into());
    }

    let total_paid = checked_mul(payment, input.periods, "total paid")?;
    let total_interest = match target {
        PaymentTarget::Loan => checked_sub(total_paid, amount, "total interest")?,
        PaymentTarget::SavingsGoal => checked_sub(amount, total_paid, "total interest")?,
    };

    let methodology = match (target, input.timing) {
        (PaymentTarget::Loan, PaymentTiming::Ordinary) => "Loan payment: r * PV / (1 - (1 + r)^-n)",
        (PaymentTarget::Loan, PaymentTiming::Due) => {
            "Loan payment (due): r * PV / (1 - (1 + r)^-n) / (1 + r)"
        }
        (PaymentTarget::SavingsGoal, PaymentTiming::Ordinary) => {
            "Savings payment: r * FV / ((1 + r)^n - 1)"
        }
        (PaymentTarget::SavingsGoal, PaymentTiming::Due) => {
            "Savings payment (due): r * FV / ((1 + r)^n - 1) / (1 + r)"
        }
    };

    let output = PaymentOutput {
        payment,
        target,
        total_paid,
        total_interest,
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
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_payment_and_interest() {
        let input = PaymentInput {
            present_value: Some(dec!(10000)),
            future_value: None,
            rate: dec!(0.01),
            periods: dec!(12),
            timing: PaymentTiming::Ordinary,
        };
        let out = calculate_payment(&input).unwrap().result;
        assert_eq!(out.target, PaymentTarget::Loan);
        assert!((out.payment - dec!(888.4879)).abs() < dec!(0.0001));
        // 12 * 888.4879 - 10000
        assert!((out.total_interest - dec!(661.85)).abs() < dec!(0.01));
    }

    #[test]
    fn test_savings_goal_due() {
        let input = PaymentInput {
            present_value: None,
            future_value: Some(dec!(10000)),
            rate: dec!(0.005),
            periods: dec!(60),
            timing: PaymentTiming::Due,
        };
        let out = calculate_payment(&input).unwrap().result;
        assert_eq!(out.target, PaymentTarget::SavingsGoal);
        assert!((out.payment - dec!(142.6149)).abs() < dec!(0.0001));
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_requires_exactly_one_target() {
        let both = PaymentInput {
            present_value: Some(dec!(1)),
            future_value: Some(dec!(1)),
            rate: dec!(0.01),
            periods: dec!(12),
            timing: PaymentTiming::Ordinary,
        };
        assert!(calculate_payment(&both).is_err());

        let neither = PaymentInput {
            present_value: None,
            future_value: None,
            ..both
        };
        assert!(calculate_payment(&neither).is_err());
    }

    #[test]
    fn test_zero_periods_rejected() {
        let input = PaymentInput {
            present_value: Some(dec!(1000)),
            future_value: None,
            rate: dec!(0.01),
            periods: Decimal::ZERO,
            timing: PaymentTiming::Ordinary,
        };
        assert!(calculate_payment(&input).is_err());
    }
}
