use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, payload};

/// Field/value table of the result, followed by warnings and methodology.
pub fn print_table(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, val) in flatten(payload(value)) {
        builder.push_record([field, val]);
    }
    println!("{}", Table::from(builder));

    let Some(envelope) = value.as_object() else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
