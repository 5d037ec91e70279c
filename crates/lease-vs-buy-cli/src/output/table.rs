use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_value, record_headers};

/// Format output as a table using the tabled crate.
///
/// Sweep results print one row per year followed by the breakeven year;
/// single results print as field/value pairs. Warnings and methodology
/// from the envelope follow the table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => {
                print_result(result);
                print_envelope_notes(map);
            }
            None => println!("{}", field_table(map)),
        },
        Value::Array(arr) => println!("{}", record_table(arr)),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    let Value::Object(res_map) = result else {
        println!("{}", display_value(result));
        return;
    };

    match res_map.get("rows") {
        Some(Value::Array(rows)) => {
            println!("{}", record_table(rows));
            if let Some(breakeven) = res_map.get("breakeven_year") {
                println!("\nBreakeven year: {}", display_value(breakeven));
            }
        }
        _ => println!("{}", field_table(res_map)),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
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

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), display_value(val)]);
    }
    builder.build()
}

fn record_table(arr: &[Value]) -> Table {
    let mut builder = Builder::default();

    match arr.first() {
        Some(Value::Object(first)) => {
            let headers = record_headers(first);
            builder.push_record(headers.clone());
            for map in arr.iter().filter_map(Value::as_object) {
                builder.push_record(
                    headers
                        .iter()
                        .map(|h| map.get(h).map(display_value).unwrap_or_default()),
                );
            }
        }
        Some(_) => {
            for item in arr {
                builder.push_record([display_value(item)]);
            }
        }
        None => builder.push_record(["(empty)"]),
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_table_has_year_column_first() {
        let rows = vec![
            json!({"years": 1, "lease_minus_buy": "5"}),
            json!({"years": 2, "lease_minus_buy": "-1"}),
        ];
        let rendered = record_table(&rows).to_string();
        let header = rendered.lines().nth(1).unwrap();
        let years_at = header.find("years").unwrap();
        let diff_at = header.find("lease_minus_buy").unwrap();
        assert!(years_at < diff_at);
        assert!(rendered.contains("-1"));
    }

    #[test]
    fn test_empty_rows() {
        assert!(record_table(&[]).to_string().contains("(empty)"));
    }
}
