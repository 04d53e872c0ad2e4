//! Normalized table of PLACES records.

use serde::{Deserialize, Serialize};

use crate::error::{PlacesError, Result};
use crate::record::{NUMERIC_COLUMNS, Record, TEXT_COLUMNS};

/// An ordered sequence of normalized rows plus the set of columns they came with.
///
/// `columns` lists every column present in the source, in first-appearance order, with
/// metadata columns already removed. Operations use it to tell "column absent" apart from
/// "value missing in this row".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Creates a table from explicit columns and rows.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    /// Creates a table whose columns are inferred from the values set on `rows`.
    ///
    /// Known columns come first in schema order, followed by passthrough columns.
    #[must_use]
    pub fn from_records(rows: Vec<Record>) -> Self {
        let mut columns: Vec<String> = TEXT_COLUMNS
            .iter()
            .filter(|column| rows.iter().any(|row| row.text(column).is_some()))
            .chain(
                NUMERIC_COLUMNS
                    .iter()
                    .filter(|column| rows.iter().any(|row| row.number(column).is_some())),
            )
            .map(|column| (*column).to_string())
            .collect();
        for row in &rows {
            for key in row.extra.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// Column names in source order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Iterates over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns whether `column` was present in the source.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fails with [`PlacesError::MissingColumn`] when a non-empty table lacks `column`.
    ///
    /// An empty table carries no column information and passes every check.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.is_empty() || self.has_column(column) {
            Ok(())
        } else {
            Err(PlacesError::missing_column(column))
        }
    }

    /// Returns a new table with the rows for which `keep` holds, in their original order.
    #[must_use]
    pub fn filter_rows(&self, mut keep: impl FnMut(&Record) -> bool) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(measureid: &str, value: Option<f64>) -> Record {
        Record {
            measureid: Some(measureid.to_string()),
            data_value: value,
            ..Record::default()
        }
    }

    #[test]
    fn test_from_records_infers_columns() {
        let mut with_extra = record("CHD", Some(1.0));
        with_extra
            .extra
            .insert("locationtype".to_string(), "County".into());
        let table = Table::from_records(vec![record("STROKE", None), with_extra]);

        assert_eq!(table.columns(), ["measureid", "data_value", "locationtype"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_require_column() {
        let table = Table::from_records(vec![record("CHD", Some(1.0))]);
        assert!(table.require_column("measureid").is_ok());
        assert!(matches!(
            table.require_column("stateabbr"),
            Err(PlacesError::MissingColumn { column }) if column == "stateabbr"
        ));
        assert!(Table::default().require_column("stateabbr").is_ok());
    }

    #[test]
    fn test_filter_rows_keeps_columns_and_order() {
        let table = Table::from_records(vec![
            record("A", Some(1.0)),
            record("B", Some(2.0)),
            record("C", Some(3.0)),
        ]);
        let filtered = table.filter_rows(|row| row.measureid.as_deref() != Some("B"));

        assert_eq!(filtered.columns(), table.columns());
        let ids: Vec<_> = filtered.iter().filter_map(|r| r.measureid.as_deref()).collect();
        assert_eq!(ids, ["A", "C"]);
        assert_eq!(table.len(), 3);
    }
}
