//! Closed-form time-value-of-money equations.
//!
//! Single sums, annuities (ordinary and due), the two payment solvers, the
//! generalised periodic rate and the periods-to-target solver. Every function
//! is pure; rates are per-period fractions and period counts may be
//! fractional.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::TvmError;
use crate::math::{
    checked_add, checked_div, checked_mul, checked_sub, ln_decimal, one_plus_rate, pow_decimal,
};
use crate::types::{Money, PaymentTiming, Periods, Rate};
use crate::TvmResult;

/// Below this magnitude a rate is treated as zero and the annuity and
/// payment formulas fall back to their r -> 0 limits.
pub const RATE_EPSILON: Decimal = dec!(0.000000000001);

pub(crate) fn is_degenerate_rate(rate: Rate) -> bool {
    rate.abs() < RATE_EPSILON
}

/// Compounding factor (1 + r)^n.
pub fn growth_factor(rate: Rate, periods: Periods) -> TvmResult<Decimal> {
    let one_plus_r = one_plus_rate(rate)?;
    if one_plus_r <= Decimal::ZERO && !periods.fract().is_zero() {
        return Err(TvmError::invalid(
            "rate",
            "1 + rate must be positive when the number of periods is fractional",
        ));
    }
    pow_decimal(one_plus_r, periods).ok_or_else(|| TvmError::ArithmeticOverflow {
        context: format!("compounding factor (1 + {rate})^{periods}"),
    })
}

impl PaymentTiming {
    /// Moves an annuity value computed under the ordinary convention onto
    /// this timing: due payments each earn one more period, so multiply.
    pub(crate) fn compound(self, amount: Money, rate: Rate) -> TvmResult<Money> {
        match self {
            PaymentTiming::Ordinary => Ok(amount),
            PaymentTiming::Due => checked_mul(amount, one_plus_rate(rate)?, "annuity-due shift"),
        }
    }

    /// Inverse of [`PaymentTiming::compound`] for solved payment amounts:
    /// a due payment is worth more, so a smaller one suffices.
    pub(crate) fn discount(self, amount: Money, rate: Rate) -> TvmResult<Money> {
        match self {
            PaymentTiming::Ordinary => Ok(amount),
            PaymentTiming::Due => checked_div(amount, one_plus_rate(rate)?, "annuity-due shift"),
        }
    }
}

// ---------------------------------------------------------------------------
// Single sums
// ---------------------------------------------------------------------------

/// Future value of a present amount: pv * (1 + r)^n
pub fn future_value(present_value: Money, rate: Rate, periods: Periods) -> TvmResult<Money> {
    let factor = growth_factor(rate, periods)?;
    checked_mul(present_value, factor, "future value")
}

/// Present value of a future amount: fv / (1 + r)^n
pub fn present_value(future_value: Money, rate: Rate, periods: Periods) -> TvmResult<Money> {
    let factor = growth_factor(rate, periods)?;
    checked_div(future_value, factor, "present value discount factor")
}

// ---------------------------------------------------------------------------
// Annuities
// ---------------------------------------------------------------------------

/// Future value of a level payment stream: pmt * ((1 + r)^n - 1) / r
pub fn future_value_annuity(
    payment: Money,
    rate: Rate,
    periods: Periods,
    timing: PaymentTiming,
) -> TvmResult<Money> {
    let value = if is_degenerate_rate(rate) {
        checked_mul(payment, periods, "future value of annuity")?
    } else {
        let factor = growth_factor(rate, periods)?;
        let growth = checked_sub(factor, Decimal::ONE, "annuity factor")?;
        let annuity_factor = checked_div(growth, rate, "annuity factor")?;
        checked_mul(payment, annuity_factor, "future value of annuity")?
    };
    timing.compound(value, rate)
}

/// Present value of a level payment stream: pmt * (1 - (1 + r)^-n) / r
pub fn present_value_annuity(
    payment: Money,
    rate: Rate,
    periods: Periods,
    timing: PaymentTiming,
) -> TvmResult<Money> {
    let value = if is_degenerate_rate(rate) {
        checked_mul(payment, periods, "present value of annuity")?
    } else {
        let discount = growth_factor(rate, -periods)?;
        let shortfall = checked_sub(Decimal::ONE, discount, "annuity factor")?;
        let annuity_factor = checked_div(shortfall, rate, "annuity factor")?;
        checked_mul(payment, annuity_factor, "present value of annuity")?
    };
    timing.compound(value, rate)
}

/// Present value of a payment stream plus a lump sum received at the end.
///
/// The lump sum is always discounted as a single sum; `timing` applies to
/// the payment leg only.
pub fn present_value_combined(
    payment: Money,
    future_amount: Money,
    rate: Rate,
    periods: Periods,
    timing: PaymentTiming,
) -> TvmResult<Money> {
    let annuity = present_value_annuity(payment, rate, periods, timing)?;
    let lump_sum = present_value(future_amount, rate, periods)?;
    checked_add(annuity, lump_sum, "combined present value")
}

/// Future value of a present lump sum plus a payment stream.
pub fn future_value_combined(
    present_amount: Money,
    payment: Money,
    rate: Rate,
    periods: Periods,
    timing: PaymentTiming,
) -> TvmResult<Money> {
    let lump_sum = future_value(present_amount, rate, periods)?;
    let annuity = future_value_annuity(payment, rate, periods, timing)?;
    checked_add(lump_sum, annuity, "combined future value")
}

// ---------------------------------------------------------------------------
// Payment solvers
// ---------------------------------------------------------------------------

/// Level payment that amortises `present_value` over `periods`.
pub fn payment_from_present_value(
    present_value: Money,
    rate: Rate,
    periods: Periods,
    timing: PaymentTiming,
) -> TvmResult<Money> {
    if is_degenerate_rate(rate) {
        return checked_div(present_value, periods, "loan payment (zero rate)");
    }
    let discount = growth_factor(rate, -periods)?;
    let denominator = checked_sub(Decimal::ONE, discount, "loan payment")?;
    let numerator = checked_mul(rate, present_value, "loan payment")?;
    let payment = checked_div(numerator, denominator, "loan payment")?;
    timing.discount(payment, rate)
}

/// Level payment that accumulates to `future_value` after `periods`.
pub fn payment_from_future_value(
    future_value: Money,
    rate: Rate,
    periods: Periods,
    timing: PaymentTiming,
) -> TvmResult<Money> {
    if is_degenerate_rate(rate) {
        return checked_div(future_value, periods, "savings payment (zero rate)");
    }
    let factor = growth_factor(rate, periods)?;
    let denominator = checked_sub(factor, Decimal::ONE, "savings payment")?;
    let numerator = checked_mul(rate, future_value, "savings payment")?;
    let payment = checked_div(numerator, denominator, "savings payment")?;
    timing.discount(payment, rate)
}

// ---------------------------------------------------------------------------
// Rate and period solvers
// ---------------------------------------------------------------------------

/// Per-period rate that grows `present_value` into `future_value`:
/// (fv / pv)^(1/n) - 1
pub fn periodic_rate(
    present_value: Money,
    future_value: Money,
    periods: Periods,
) -> TvmResult<Rate> {
    if present_value <= Decimal::ZERO {
        return Err(TvmError::invalid("present_value", "must be positive"));
    }
    if future_value <= Decimal::ZERO {
        return Err(TvmError::invalid("future_value", "must be positive"));
    }
    if periods <= Decimal::ZERO {
        return Err(TvmError::invalid("periods", "must be positive"));
    }

    let growth = checked_div(future_value, present_value, "growth ratio")?;
    let exponent = Decimal::ONE / periods;
    let root = pow_decimal(growth, exponent).ok_or_else(|| TvmError::ArithmeticOverflow {
        context: "periodic rate root".into(),
    })?;
    Ok(root - Decimal::ONE)
}

/// Periods needed for `present_value` to reach `future_value` at `rate`:
/// ln(fv / pv) / ln(1 + r)
///
/// A negative result is valid: the target lies in the past for this rate.
pub fn number_of_periods(
    present_value: Money,
    future_value: Money,
    rate: Rate,
) -> TvmResult<Periods> {
    if present_value <= Decimal::ZERO {
        return Err(TvmError::invalid("present_value", "must be positive"));
    }
    if future_value <= Decimal::ZERO {
        return Err(TvmError::invalid("future_value", "must be positive"));
    }
    if rate <= dec!(-1) {
        return Err(TvmError::invalid("rate", "must be greater than -100%"));
    }

    let growth = checked_div(future_value, present_value, "growth ratio")?;
    let numerator = ln_decimal(growth)
        .ok_or_else(|| TvmError::invalid("future_value", "growth ratio must be positive"))?;
    let denominator = ln_decimal(one_plus_rate(rate)?)
        .ok_or_else(|| TvmError::invalid("rate", "must be greater than -100%"))?;
    checked_div(numerator, denominator, "number of periods (a zero rate never compounds)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() < tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_future_value_single_sum() {
        // 1000 * 1.05^10 = 1628.894627
        let fv = future_value(dec!(1000), dec!(0.05), dec!(10)).unwrap();
        assert_close(fv, dec!(1628.894627), dec!(0.000001));
    }

    #[test]
    fn test_present_value_single_sum() {
        let pv = present_value(dec!(1628.894626777442), dec!(0.05), dec!(10)).unwrap();
        assert_close(pv, dec!(1000), dec!(0.000001));
    }

    #[test]
    fn test_fractional_periods() {
        // 1000 * 1.1^2.5 = 1269.0587
        let fv = future_value(dec!(1000), dec!(0.10), dec!(2.5)).unwrap();
        assert_close(fv, dec!(1269.0587), dec!(0.001));
    }

    #[test]
    fn test_fractional_periods_need_positive_base() {
        let err = future_value(dec!(1000), dec!(-1.5), dec!(2.5)).unwrap_err();
        assert!(matches!(err, TvmError::InvalidInput { .. }));
    }

    #[test]
    fn test_present_value_at_minus_100_percent() {
        let err = present_value(dec!(1000), dec!(-1), dec!(3)).unwrap_err();
        assert!(matches!(err, TvmError::DivisionUndefined { .. }));
    }

    #[test]
    fn test_annuity_values() {
        // 100/period for 10 periods at 5%
        let pv = present_value_annuity(dec!(100), dec!(0.05), dec!(10), PaymentTiming::Ordinary).unwrap();
        assert_close(pv, dec!(772.173492918), dec!(0.000001));

        let fv = future_value_annuity(dec!(100), dec!(0.05), dec!(10), PaymentTiming::Due).unwrap();
        assert_close(fv, dec!(1320.678716233), dec!(0.000001));
    }

    #[test]
    fn test_due_shift_is_one_period() {
        let ordinary = present_value_annuity(dec!(250), dec!(0.02), dec!(24), PaymentTiming::Ordinary).unwrap();
        let due = present_value_annuity(dec!(250), dec!(0.02), dec!(24), PaymentTiming::Due).unwrap();
        assert_close(due, ordinary * dec!(1.02), dec!(0.0000001));
    }

    #[test]
    fn test_zero_rate_limits() {
        assert_eq!(
            future_value_annuity(dec!(100), Decimal::ZERO, dec!(12), PaymentTiming::Ordinary).unwrap(),
            dec!(1200)
        );
        assert_eq!(
            payment_from_present_value(dec!(1200), Decimal::ZERO, dec!(12), PaymentTiming::Due).unwrap(),
            dec!(100)
        );
        assert_eq!(
            payment_from_future_value(dec!(600), Decimal::ZERO, dec!(6), PaymentTiming::Ordinary).unwrap(),
            dec!(100)
        );
    }

    #[test]
    fn test_loan_payment() {
        // 10,000 over 12 months at 1% per month
        let pmt = payment_from_present_value(dec!(10000), dec!(0.01), dec!(12), PaymentTiming::Ordinary).unwrap();
        assert_close(pmt, dec!(888.487886783), dec!(0.000001));
    }

    #[test]
    fn test_savings_payment_due() {
        let pmt = payment_from_future_value(dec!(10000), dec!(0.005), dec!(60), PaymentTiming::Due).unwrap();
        assert_close(pmt, dec!(142.614940591), dec!(0.000001));
    }

    #[test]
    fn test_payment_zero_periods_is_division_undefined() {
        let err = payment_from_present_value(dec!(1000), dec!(0.05), Decimal::ZERO, PaymentTiming::Ordinary).unwrap_err();
        assert!(matches!(err, TvmError::DivisionUndefined { .. }));

        let err = payment_from_future_value(dec!(1000), Decimal::ZERO, Decimal::ZERO, PaymentTiming::Ordinary).unwrap_err();
        assert!(matches!(err, TvmError::DivisionUndefined { .. }));
    }

    #[test]
    fn test_periodic_rate() {
        let r = periodic_rate(dec!(1000), dec!(1500), dec!(5)).unwrap();
        assert_close(r, dec!(0.0844717712), dec!(0.0000001));
    }

    #[test]
    fn test_periodic_rate_domain() {
        assert!(periodic_rate(dec!(-1), dec!(100), dec!(5)).is_err());
        assert!(periodic_rate(dec!(100), dec!(-1), dec!(5)).is_err());
        assert!(periodic_rate(dec!(100), dec!(200), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_number_of_periods_doubling() {
        let n = number_of_periods(dec!(1000), dec!(2000), dec!(0.10)).unwrap();
        assert_close(n, dec!(7.2725408973), dec!(0.0000001));
    }

    #[test]
    fn test_number_of_periods_negative_is_valid() {
        // Shrinking target at a positive rate lies in the past
        let n = number_of_periods(dec!(2000), dec!(1000), dec!(0.10)).unwrap();
        assert!(n < Decimal::ZERO);
    }

    #[test]
    fn test_number_of_periods_zero_rate() {
        let err = number_of_periods(dec!(1000), dec!(2000), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, TvmError::DivisionUndefined { .. }));
    }

    #[test]
    fn test_number_of_periods_domain() {
        for (pv, fv, r) in [
            (dec!(0), dec!(100), dec!(0.1)),
            (dec!(100), dec!(0), dec!(0.1)),
            (dec!(100), dec!(200), dec!(-1)),
        ] {
            let err = number_of_periods(pv, fv, r).unwrap_err();
            assert!(matches!(err, TvmError::InvalidInput { .. }));
        }
    }
}
