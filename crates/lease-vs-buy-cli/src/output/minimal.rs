use serde_json::Value;

use super::{display_value, result_section};

/// Headline fields, in priority order. A sweep answers with its breakeven
/// year even when that is null.
const HEADLINE_KEYS: [&str; 3] = ["breakeven_year", "monthly_rate", "lease_minus_buy"];

/// Print just the headline answer from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result = result_section(value);

    if let Value::Object(map) = result {
        for key in HEADLINE_KEYS {
            if let Some(val) = map.get(key) {
                return display_value(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, display_value(val));
        }
    }

    display_value(result)
}
