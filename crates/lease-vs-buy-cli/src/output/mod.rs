pub mod chart;
pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Chart => chart::print_chart(value),
    }
}

/// Render a scalar JSON value for display. Decimals arrive as strings.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "none".to_string(),
        Value::Array(arr) => arr.iter().map(display_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column headers for an array of records: `years` leads, the remaining
/// keys follow in map order.
pub(crate) fn record_headers(first: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = first.keys().filter(|k| *k != "years").cloned().collect();
    if first.contains_key("years") {
        headers.insert(0, "years".to_string());
    }
    headers
}

/// The `result` section of an output envelope, or the value itself.
pub(crate) fn result_section(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}
