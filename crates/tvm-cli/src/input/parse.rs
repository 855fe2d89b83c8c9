use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ParseError;

/// Parse a single number as typed by a user ("5.5", "-1000", "1e3").
pub fn parse_number(text: &str) -> Result<Decimal, ParseError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ParseError::InvalidNumber(trimmed.to_string()))
}

/// Largest number of entries a user may ask to type in one go.
pub const MAX_COUNT: usize = 10_000;

/// Parse a whole count between 0 and [`MAX_COUNT`] ("5", "5.0").
pub fn parse_count(text: &str) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidCount(text.trim().to_string());
    let value = parse_number(text).map_err(|_| invalid())?;
    if value.is_sign_negative() || !value.fract().is_zero() {
        return Err(invalid());
    }
    value
        .to_usize()
        .filter(|count| *count <= MAX_COUNT)
        .ok_or_else(invalid)
}

/// Parse a comma-separated cash flow list ("-1000, 300, 400") in order.
pub fn parse_cash_flows(text: &str) -> Result<Vec<Decimal>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyCashFlows);
    }

    text.split(',')
        .enumerate()
        .map(|(i, item)| {
            parse_number(item).map_err(|_| ParseError::InvalidCashFlow {
                index: i,
                value: item.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number(" 5.5 ").unwrap(), dec!(5.5));
        assert_eq!(parse_number("-1000").unwrap(), dec!(-1000));
        assert_eq!(parse_number("1e3").unwrap(), dec!(1000));
    }

    #[test]
    fn test_parse_number_rejects_text() {
        assert_eq!(
            parse_number("abc"),
            Err(ParseError::InvalidNumber("abc".into()))
        );
        assert!(parse_number("").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), Ok(5));
        assert_eq!(parse_count(" 3.0 "), Ok(3));
        assert_eq!(parse_count("0"), Ok(0));
        assert_eq!(parse_count("-2"), Err(ParseError::InvalidCount("-2".into())));
        assert_eq!(parse_count("2.5"), Err(ParseError::InvalidCount("2.5".into())));
        assert!(parse_count("two").is_err());
        assert_eq!(parse_count("10000"), Ok(MAX_COUNT));
        assert_eq!(
            parse_count("100000000000000000"),
            Err(ParseError::InvalidCount("100000000000000000".into()))
        );
    }

    #[test]
    fn test_parse_cash_flows_keeps_order() {
        let flows = parse_cash_flows("-1000,300, 400 ,500").unwrap();
        assert_eq!(flows, vec![dec!(-1000), dec!(300), dec!(400), dec!(500)]);
    }

    #[test]
    fn test_parse_cash_flows_reports_bad_entry() {
        assert_eq!(
            parse_cash_flows("-1000,x,400"),
            Err(ParseError::InvalidCashFlow {
                index: 1,
                value: "x".into()
            })
        );
        assert_eq!(parse_cash_flows("  "), Err(ParseError::EmptyCashFlows));
        assert!(parse_cash_flows("-1000,,400").is_err());
    }
}
