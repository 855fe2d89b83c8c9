use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format::render_field;

/// Print the result envelope as a two-column table with amounts as
/// currency and rates as percentages.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                println!("{}", field_table(value));
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if result.is_object() {
        println!("{}", field_table(result));
    } else {
        println!("{}", field_table(&Value::Object(envelope.clone())));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(value: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    if let Value::Object(map) = value {
        for (key, val) in map {
            builder.push_record([key.as_str(), &render_field(key, val)]);
        }
    }
    Table::from(builder).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_formats_amounts() {
        let rendered = field_table(&json!({"npv": "388.771258", "total_inflows": "1800"}));
        assert!(rendered.contains("Q388.77"));
        assert!(rendered.contains("Q1,800.00"));
        assert!(rendered.contains("Field"));
    }
}
