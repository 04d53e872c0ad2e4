//! Conversion of raw API records into a typed [`Table`].

use std::collections::HashSet;

use places_model::{METADATA_COLUMNS, PlacesError, RawRecord, Record, Result, Table};
use serde_json::Value;

/// Normalizes raw records into a [`Table`].
///
/// - Metadata columns ([`METADATA_COLUMNS`]) are dropped wherever they appear.
/// - The numeric columns are coerced to `f64`. Empty strings and `null` become missing
///   values; any other non-numeric value fails the whole call with
///   [`PlacesError::DataFormat`].
/// - Known text columns are stored as strings (numbers and booleans are stringified).
/// - Unknown columns pass through untouched.
///
/// Row order and first-appearance column order are preserved.
pub fn normalize(records: impl IntoIterator<Item = RawRecord>) -> Result<Table> {
    let mut columns = Vec::new();
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (index, raw) in records.into_iter().enumerate() {
        let mut record = Record::default();
        for (column, value) in raw {
            if METADATA_COLUMNS.contains(&column.as_str()) {
                continue;
            }
            if seen.insert(column.clone()) {
                columns.push(column.clone());
            }
            if let Some(slot) = record.number_field_mut(&column) {
                *slot = coerce_number(&column, index, &value)?;
            } else if let Some(slot) = record.text_field_mut(&column) {
                *slot = coerce_text(value);
            } else {
                record.extra.insert(column, value);
            }
        }
        rows.push(record);
    }

    Ok(Table::new(columns, rows))
}

fn coerce_number(column: &str, row: usize, value: &Value) -> Result<Option<f64>> {
    let parsed = match value {
        Value::Null => None,
        Value::Number(number) => number.as_f64(),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(number) if number.is_nan() => None,
            Ok(number) if number.is_finite() => Some(number),
            _ => return Err(data_format(column, row, value)),
        },
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return Err(data_format(column, row, value));
        }
    };
    Ok(parsed.filter(|v| v.is_finite()))
}

fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn data_format(column: &str, row: usize, value: &Value) -> PlacesError {
    PlacesError::DataFormat {
        column: column.to_string(),
        row,
        value: value.to_string(),
    }
}
