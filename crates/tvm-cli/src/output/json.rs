use serde_json::Value;

/// Pretty-print the full envelope (result, warnings, methodology,
/// assumptions, metadata) to stdout.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
    for warning in envelope_warnings(value) {
        tracing::warn!("{}", warning);
    }
}

fn envelope_warnings(value: &Value) -> impl Iterator<Item = &str> {
    value
        .get("warnings")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_warnings() {
        let value = json!({"result": {}, "warnings": ["a", "b"]});
        assert_eq!(envelope_warnings(&value).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(envelope_warnings(&json!({})).count(), 0);
    }
}
