use serde_json::Value;
use std::io;

/// Write the result as `field,value` CSV to stdout. Values stay raw
/// decimals so the file can be re-read by spreadsheets.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {}", e);
    }
}

pub fn write_csv<W: io::Write>(writer: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    match value {
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            wtr.write_record(["field", "value"])?;
            for (key, val) in fields {
                match val {
                    // One row per cash flow keeps the column numeric
                    Value::Array(items) => {
                        for (i, item) in items.iter().enumerate() {
                            wtr.write_record([format!("{key}[{i}]"), format_csv_value(item)])?;
                        }
                    }
                    _ => wtr.write_record([key.as_str(), &format_csv_value(val)])?,
                }
            }
        }
        _ => wtr.write_record([format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
