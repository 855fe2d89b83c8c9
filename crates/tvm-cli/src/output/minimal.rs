use serde_json::Value;

use super::format::render_field;

/// Headline answer of each calculator, in the order they are looked for.
const PRIORITY_KEYS: [&str; 7] = [
    "present_value",
    "future_value",
    "payment",
    "periodic_rate",
    "npv",
    "periods",
    "irr",
];

/// Print just the key answer, formatted for people (`Q1,020.87`,
/// `8.4472%`, `7.2725`).
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

pub fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return render_field(key, val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, render_field(key, val));
        }
    }

    render_field("", result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_picks_headline_field() {
        let envelope = json!({
            "result": {"lump_sum_component": "1020.87", "present_value": "1020.8747"},
            "warnings": [],
        });
        assert_eq!(minimal_line(&envelope), "Q1,020.87");
    }

    #[test]
    fn test_irr_as_percent() {
        let envelope = json!({"result": {"irr": "0.248883356", "iterations": 5}});
        assert_eq!(minimal_line(&envelope), "24.8883%");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        assert_eq!(minimal_line(&json!({"result": {"status": "converged"}})), "status: converged");
    }
}
