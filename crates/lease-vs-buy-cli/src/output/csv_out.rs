use serde_json::{Map, Value};
use std::io;

use super::{display_value, record_headers, result_section};

/// Write output as CSV to stdout.
///
/// A sweep becomes one record per year; a single result becomes
/// `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    for record in csv_records(value) {
        let _ = wtr.write_record(&record);
    }

    let _ = wtr.flush();
}

fn csv_records(value: &Value) -> Vec<Vec<String>> {
    match result_section(value) {
        Value::Object(result) => match result.get("rows") {
            Some(Value::Array(rows)) => array_records(rows),
            _ => field_records(result),
        },
        Value::Array(arr) => array_records(arr),
        other => vec![vec![display_value(other)]],
    }
}

fn field_records(map: &Map<String, Value>) -> Vec<Vec<String>> {
    let mut records = vec![vec!["field".to_string(), "value".to_string()]];
    records.extend(
        map.iter()
            .map(|(key, val)| vec![key.clone(), csv_value(val)]),
    );
    records
}

fn array_records(arr: &[Value]) -> Vec<Vec<String>> {
    let Some(Value::Object(first)) = arr.first() else {
        return arr.iter().map(|item| vec![csv_value(item)]).collect();
    };

    let headers = record_headers(first);
    let mut records = vec![headers.clone()];
    for item in arr {
        if let Value::Object(map) = item {
            records.push(
                headers
                    .iter()
                    .map(|h| map.get(h).map(csv_value).unwrap_or_default())
                    .collect(),
            );
        }
    }
    records
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(other),
    }
}
