pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The payload inside a result envelope, or the value itself when there is
/// no envelope.
pub(crate) fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into `parent.child` rows. Arrays of scalars are
/// joined; arrays of objects are indexed (`components.0.ratio`).
pub(crate) fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(&mut rows, String::new(), value);
    rows
}

fn flatten_into(rows: &mut Vec<(String, String)>, prefix: String, value: &Value) {
    let child = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(rows, child(key), val);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object()) => {
            for (i, val) in items.iter().enumerate() {
                flatten_into(rows, child(&i.to_string()), val);
            }
        }
        _ => rows.push((prefix, render(value))),
    }
}

/// Plain-text rendering of a leaf value.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(render).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
