//! Polars export of normalized and pivoted tables.

use places_model::{NUMERIC_COLUMNS, PlacesError, Result, Table};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde_json::Value;

use crate::pivot::PivotTable;

/// Converts a normalized table into a DataFrame with one column per table column.
///
/// Numeric columns become `Float64`; everything else becomes `String`, with passthrough
/// JSON structures rendered compactly.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.columns().len());
    for name in table.columns() {
        if NUMERIC_COLUMNS.contains(&name.as_str()) {
            let values: Vec<Option<f64>> = table.iter().map(|row| row.number(name)).collect();
            columns.push(Series::new(name.as_str().into(), values).into());
        } else {
            let values: Vec<Option<String>> = table
                .iter()
                .map(|row| match row.value(name) {
                    Value::Null => None,
                    Value::String(text) => Some(text),
                    other => Some(other.to_string()),
                })
                .collect();
            columns.push(Series::new(name.as_str().into(), values).into());
        }
    }
    DataFrame::new(columns).map_err(|e| PlacesError::Frame(e.to_string()))
}

/// Converts a pivot into a DataFrame: the location key column followed by one `Float64`
/// column per measure.
pub fn pivot_to_dataframe(pivot: &PivotTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(pivot.measures().len() + 1);
    let locations: Vec<String> = pivot.locations().map(String::from).collect();
    columns.push(Series::new(pivot.index_column().into(), locations).into());
    for measure in pivot.measures() {
        let values: Vec<Option<f64>> = pivot
            .column(measure)
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        columns.push(Series::new(measure.as_str().into(), values).into());
    }
    DataFrame::new(columns).map_err(|e| PlacesError::Frame(e.to_string()))
}
