//! Flattening of calculator output into `field = value` rows, shared by the
//! CLI text renderer and the batch CSV table.

use crate::domain::model::CalcRecord;
use serde_json::{Number, Value};

/// Walks nested objects and arrays, joining keys with `.`
/// (`goals.0.calories`).
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn child_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(&child_key(prefix, key), child, rows);
            }
        }
        Value::Array(items) if items.is_empty() => rows.push((prefix.to_string(), String::new())),
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&child_key(prefix, &index.to_string()), child, rows);
            }
        }
        Value::Null => rows.push((prefix.to_string(), String::new())),
        Value::Bool(flag) => rows.push((prefix.to_string(), flag.to_string())),
        Value::Number(number) => rows.push((prefix.to_string(), format_number(number))),
        Value::String(text) => rows.push((prefix.to_string(), text.clone())),
    }
}

/// Integers print as-is; floats are rounded to 4 decimals with trailing
/// zeros dropped.
pub fn format_number(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) => {
            let rounded = format!("{:.4}", value);
            let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
            if trimmed == "-0" {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => number.to_string(),
    }
}

/// Human-readable block for one record.
pub fn render_text(record: &CalcRecord) -> String {
    let rows = flatten(&record.output);
    let width = rows.iter().map(|(field, _)| field.len()).max().unwrap_or(0);

    let mut out = match &record.label {
        Some(label) => format!("{} ({})\n", record.calculator, label),
        None => format!("{}\n", record.calculator),
    };
    for (field, value) in rows {
        let value = if value.is_empty() { "-" } else { value.as_str() };
        out.push_str(&format!("  {:<width$}  {}\n", field, value, width = width));
    }
    out
}
