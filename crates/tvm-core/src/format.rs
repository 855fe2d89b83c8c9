//! Human formatting for amounts, rates and period counts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;

use crate::types::{Money, Periods, Rate};

pub const CURRENCY_SYMBOL: &str = "Q";

/// `Q#,##0.00`, rounding half away from zero: 1000 -> "Q1,000.00",
/// -1234.5 -> "Q-1,234.50".
pub fn format_currency(value: Money) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{CURRENCY_SYMBOL}{sign}{}.{cents}", group_thousands(whole))
}

/// A decimal rate as a percentage: 0.0844717 with 4 places -> "8.4472%".
pub fn format_percent(rate: Rate, decimal_places: u32) -> String {
    match rate.checked_mul(dec!(100)) {
        Some(percent) => {
            let rounded = percent
                .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}%", decimal_places as usize, rounded)
        }
        None => format!("{}%", shift_to_percent(rate, decimal_places)),
    }
}

/// rate * 100 written out by moving the decimal point, for rates whose
/// percentage exceeds the Decimal range. Such rates carry at most two
/// fractional digits, so the shift is exact.
fn shift_to_percent(rate: Rate, decimal_places: u32) -> String {
    let sign = if rate.is_sign_negative() { "-" } else { "" };
    let whole = rate.abs().trunc();
    let hundredths = (rate.abs().fract() * dec!(100)).trunc().to_u32().unwrap_or(0);
    let padding = "0".repeat(decimal_places as usize);
    if padding.is_empty() {
        format!("{sign}{whole}{hundredths:02}")
    } else {
        format!("{sign}{whole}{hundredths:02}.{padding}")
    }
}

/// Period counts to 4 places: "7.2725".
pub fn format_periods(periods: Periods) -> String {
    let rounded = periods.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.4}", rounded)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_currency_examples() {
        assert_eq!(format_currency(dec!(1000)), "Q1,000.00");
        assert_eq!(format_currency(dec!(-1234.5)), "Q-1,234.50");
        assert_eq!(format_currency(dec!(1234567.891)), "Q1,234,567.89");
        assert_eq!(format_currency(dec!(0.005)), "Q0.01");
        assert_eq!(format_currency(dec!(-0.001)), "Q0.00");
        assert_eq!(format_currency(dec!(999.999)), "Q1,000.00");
        assert_eq!(format_currency(dec!(12)), "Q12.00");
        assert_eq!(format_currency(Decimal::ZERO), "Q0.00");
    }

    #[test]
    fn test_percent_and_periods() {
        assert_eq!(format_percent(dec!(0.0844717711976985), 4), "8.4472%");
        assert_eq!(format_percent(dec!(0.0845), 2), "8.45%");
        assert_eq!(format_percent(dec!(-0.05), 4), "-5.0000%");
        assert_eq!(format_periods(dec!(7.272540897341713)), "7.2725");
        assert_eq!(format_periods(dec!(8)), "8.0000");
    }

    #[test]
    fn test_percent_beyond_decimal_range() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert_eq!(format_percent(huge, 4), format!("1{}.0000%", "0".repeat(29)));
        assert_eq!(format_percent(-huge, 0), format!("-1{}%", "0".repeat(29)));
        assert_eq!(
            format_percent(Decimal::MAX, 2),
            "7922816251426433759354395033500.00%"
        );
    }
}
