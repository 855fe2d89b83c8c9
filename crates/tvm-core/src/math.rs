use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::TvmError;
use crate::TvmResult;

// ---------------------------------------------------------------------------
// Decimal math helpers (pure Decimal, no f64)
// ---------------------------------------------------------------------------

const LN_2: Decimal = dec!(0.6931471805599453094172321215);
const EXP_TERMS: u64 = 40;
const LN_TERMS: u32 = 40;

/// Taylor series exp(x) with range reduction for |x| > 2.
///
/// Negative arguments are evaluated as 1 / exp(|x|), which keeps more
/// significant digits than squaring a small value. Returns `None` when the
/// result does not fit in a Decimal.
pub(crate) fn exp_decimal(x: Decimal) -> Option<Decimal> {
    if x.is_sign_negative() {
        return Some(match exp_non_negative(-x) {
            Some(value) => Decimal::ONE.checked_div(value).unwrap_or(Decimal::ZERO),
            None => Decimal::ZERO,
        });
    }
    exp_non_negative(x)
}

fn exp_non_negative(x: Decimal) -> Option<Decimal> {
    let two = Decimal::from(2);

    // Range reduction: exp(x) = exp(x / 2^k)^(2^k)
    let mut k: u32 = 0;
    let mut reduced = x;
    while reduced > two {
        reduced /= two;
        k += 1;
    }

    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1..=EXP_TERMS {
        term = term * reduced / Decimal::from(n);
        sum += term;
    }

    for _ in 0..k {
        sum = sum.checked_mul(sum)?;
    }

    Some(sum)
}

/// Natural logarithm for x > 0.
///
/// Brings x into [0.5, 2] with ln(x) = ln(x / 2^n) + n*ln(2), then sums
/// ln(v) = 2 * sum_{k>=0} z^(2k+1) / (2k+1) with z = (v-1)/(v+1).
pub(crate) fn ln_decimal(x: Decimal) -> Option<Decimal> {
    if x <= Decimal::ZERO {
        return None;
    }
    if x == Decimal::ONE {
        return Some(Decimal::ZERO);
    }

    let two = Decimal::from(2);
    let half = dec!(0.5);
    let mut val = x;
    let mut adjust = Decimal::ZERO;
    while val > two {
        val /= two;
        adjust += LN_2;
    }
    while val < half {
        val *= two;
        adjust -= LN_2;
    }

    let z = (val - Decimal::ONE) / (val + Decimal::ONE);
    let z2 = z * z;
    let mut term = z;
    let mut sum = z;
    for k in 1..LN_TERMS {
        term *= z2;
        sum += term / Decimal::from(2 * k + 1);
    }

    Some(two * sum + adjust)
}

/// base^exponent for any real exponent.
///
/// Whole-number exponents are exact (repeated squaring, so a non-positive
/// base is fine); fractional exponents go through exp(exponent * ln(base))
/// and need a positive base. `None` means undefined or out of range.
pub(crate) fn pow_decimal(base: Decimal, exponent: Decimal) -> Option<Decimal> {
    if exponent.is_zero() {
        return Some(Decimal::ONE);
    }

    if exponent.fract().is_zero() {
        if let Some(n) = exponent.abs().to_u64() {
            return if exponent.is_sign_negative() {
                powi_checked(Decimal::ONE.checked_div(base)?, n)
            } else {
                powi_checked(base, n)
            };
        }
    }

    if base <= Decimal::ZERO {
        return None;
    }
    exp_decimal(ln_decimal(base)?.checked_mul(exponent)?)
}

fn powi_checked(base: Decimal, mut n: u64) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut factor = base;
    while n > 0 {
        if n & 1 == 1 {
            result = result.checked_mul(factor)?;
        }
        n >>= 1;
        if n > 0 {
            factor = factor.checked_mul(factor)?;
        }
    }
    Some(result)
}

pub(crate) fn checked_add(a: Decimal, b: Decimal, context: &str) -> TvmResult<Decimal> {
    a.checked_add(b).ok_or_else(|| TvmError::ArithmeticOverflow {
        context: context.into(),
    })
}

pub(crate) fn checked_sub(a: Decimal, b: Decimal, context: &str) -> TvmResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| TvmError::ArithmeticOverflow {
        context: context.into(),
    })
}

/// 1 + r, the per-period growth multiplier.
pub(crate) fn one_plus_rate(rate: Decimal) -> TvmResult<Decimal> {
    checked_add(Decimal::ONE, rate, "1 + rate")
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal, context: &str) -> TvmResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| TvmError::ArithmeticOverflow {
        context: context.into(),
    })
}

pub(crate) fn checked_div(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> TvmResult<Decimal> {
    if denominator.is_zero() {
        return Err(TvmError::DivisionUndefined {
            context: context.into(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| TvmError::ArithmeticOverflow {
            context: context.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_exp_of_one_is_e() {
        let e = exp_decimal(Decimal::ONE).unwrap();
        assert_close(e, dec!(2.718281828459045235360287), dec!(0.000000000000001));
    }

    #[test]
    fn test_exp_negative_is_reciprocal() {
        let value = exp_decimal(dec!(-3)).unwrap();
        assert_close(value, dec!(0.049787068367863942979), dec!(0.000000000000001));
    }

    #[test]
    fn test_exp_overflow_is_none() {
        assert!(exp_decimal(dec!(200)).is_none());
    }

    #[test]
    fn test_ln_round_trips_exp() {
        for x in [dec!(0.01), dec!(0.75), dec!(1.5), dec!(42), dec!(123456.789)] {
            let back = exp_decimal(ln_decimal(x).unwrap()).unwrap();
            assert_close(back, x, x * dec!(0.000000000001));
        }
    }

    #[test]
    fn test_ln_two() {
        assert_close(ln_decimal(dec!(2)).unwrap(), LN_2, dec!(0.0000000000000001));
    }

    #[test]
    fn test_ln_rejects_non_positive() {
        assert!(ln_decimal(Decimal::ZERO).is_none());
        assert!(ln_decimal(dec!(-1)).is_none());
    }

    #[test]
    fn test_pow_integer_exponent_is_exact() {
        assert_eq!(pow_decimal(dec!(1.1), dec!(2)).unwrap(), dec!(1.21));
        assert_eq!(pow_decimal(dec!(-2), dec!(3)).unwrap(), dec!(-8));
        assert_eq!(pow_decimal(dec!(5), Decimal::ZERO).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_pow_negative_integer_exponent() {
        assert_close(
            pow_decimal(dec!(2), dec!(-3)).unwrap(),
            dec!(0.125),
            dec!(0.0000000000000001),
        );
    }

    #[test]
    fn test_pow_fractional_exponent() {
        assert_close(
            pow_decimal(dec!(4), dec!(0.5)).unwrap(),
            dec!(2),
            dec!(0.000000000001),
        );
        assert!(pow_decimal(dec!(-4), dec!(0.5)).is_none());
    }

    #[test]
    fn test_pow_overflow_is_none() {
        assert!(pow_decimal(dec!(10), dec!(40)).is_none());
    }

    #[test]
    fn test_checked_div_by_zero() {
        let err = checked_div(Decimal::ONE, Decimal::ZERO, "unit test").unwrap_err();
        assert!(matches!(err, TvmError::DivisionUndefined { .. }));
    }

    #[test]
    fn test_one_plus_rate_at_decimal_max() {
        assert!(matches!(
            one_plus_rate(Decimal::MAX),
            Err(TvmError::ArithmeticOverflow { .. })
        ));
        assert_eq!(one_plus_rate(dec!(0.05)).unwrap(), dec!(1.05));
    }

    #[test]
    fn test_checked_sub_overflow() {
        assert!(checked_sub(Decimal::MIN, Decimal::ONE, "x").is_err());
        assert_eq!(checked_sub(dec!(3), dec!(1), "x").unwrap(), dec!(2));
    }
}
