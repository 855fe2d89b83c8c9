use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tvm_core::format::{format_currency, format_percent, format_periods};

/// How a result field should be rendered for people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Money,
    Rate,
    Periods,
    Other,
}

pub fn field_kind(key: &str) -> FieldKind {
    match key {
        "present_value" | "future_value" | "payment" | "npv" | "npv_at_irr"
        | "lump_sum_component" | "annuity_component" | "total_paid" | "total_interest"
        | "total_inflows" | "total_outflows" | "discounted_cash_flows" => FieldKind::Money,
        "periodic_rate" | "nominal_annual_rate" | "effective_annual_rate" | "irr" => {
            FieldKind::Rate
        }
        "periods" | "whole_periods" => FieldKind::Periods,
        _ => FieldKind::Other,
    }
}

/// Render one result field, picking currency, percent or period
/// formatting from the field name.
pub fn render_field(key: &str, value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| render_field(key, item))
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => match (field_kind(key), Decimal::from_str(s)) {
            (FieldKind::Money, Ok(d)) => format_currency(d),
            (FieldKind::Rate, Ok(d)) => format_percent(d, 4),
            (FieldKind::Periods, Ok(d)) => format_periods(d),
            _ => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render_field_by_kind() {
        assert_eq!(render_field("present_value", &json!("1020.8747")), "Q1,020.87");
        assert_eq!(render_field("irr", &json!("0.24888335")), "24.8883%");
        assert_eq!(render_field("periods", &json!("7.2725408")), "7.2725");
        assert_eq!(
            render_field("periodic_rate", &json!("1000000000000000000000000000")),
            format!("1{}.0000%", "0".repeat(29))
        );
        assert_eq!(render_field("status", &json!("converged")), "converged");
        assert_eq!(render_field("iterations", &json!(4)), "4");
        assert_eq!(
            render_field("discounted_cash_flows", &json!(["-100", "50"])),
            "Q-100.00, Q50.00"
        );
        assert_eq!(render_field("lump_sum_component", &Value::Null), "-");
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        assert_eq!(field_kind("methodology"), FieldKind::Other);
        assert_eq!(render_field("guess", &json!("0.1")), "0.1");
    }
}
