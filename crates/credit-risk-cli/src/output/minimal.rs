use serde_json::Value;

use super::{flatten, payload, render};

/// Fields that carry the answer, most decisive first.
const PRIORITY_KEYS: [&str; 6] = [
    "decision",
    "zone",
    "altman.zone",
    "annualized_volatility",
    "default_probability",
    "score",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal(value));
}

fn minimal(value: &Value) -> String {
    let result = payload(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            let found = match key.split_once('.') {
                Some((outer, inner)) => map.get(outer).and_then(|o| o.get(inner)),
                None => map.get(key),
            };
            if let Some(val) = found.filter(|v| !v.is_null()) {
                return render(val);
            }
        }
        if let Some((field, val)) = flatten(result).into_iter().next() {
            return format!("{}: {}", field, val);
        }
    }
    render(result)
}
