//! Long-to-wide reshaping of PLACES observations.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use places_model::{PlacesError, Result, Table};
use serde::{Deserialize, Serialize};

/// Geographic granularity of a pivot's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotLevel {
    /// One row per county, keyed by `locationid` (or `locationname` when the table has no
    /// `locationid` column).
    #[default]
    County,
    /// One row per state, keyed by `stateabbr`.
    State,
}

impl PivotLevel {
    /// Column holding the row key for `table` at this level.
    fn index_column(self, table: &Table) -> Result<&'static str> {
        match self {
            Self::County if table.has_column("locationid") || table.is_empty() => {
                Ok("locationid")
            }
            Self::County if table.has_column("locationname") => Ok("locationname"),
            Self::County => Err(PlacesError::missing_column("locationid")),
            Self::State => {
                table.require_column("stateabbr")?;
                Ok("stateabbr")
            }
        }
    }
}

impl fmt::Display for PivotLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::County => f.write_str("county"),
            Self::State => f.write_str("state"),
        }
    }
}

impl FromStr for PivotLevel {
    type Err = PlacesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "county" => Ok(Self::County),
            "state" => Ok(Self::State),
            other => Err(PlacesError::invalid_argument(
                "level",
                format!("unknown pivot level '{other}' (expected county or state)"),
            )),
        }
    }
}

/// How to combine several observations of the same (location, measure) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Average the values.
    #[default]
    Mean,
    /// Keep the value that appears last in the table.
    Last,
    /// Fail with [`PlacesError::InvalidArgument`].
    Error,
}

/// Wide table: one row per location, one column per measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    level: PivotLevel,
    index_column: String,
    measures: Vec<String>,
    cells: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PivotTable {
    /// Granularity of the rows.
    #[must_use]
    pub fn level(&self) -> PivotLevel {
        self.level
    }

    /// Source column the row keys come from.
    #[must_use]
    pub fn index_column(&self) -> &str {
        &self.index_column
    }

    /// Measure identifiers, sorted.
    #[must_use]
    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    /// Location keys, sorted.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the pivot has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns whether `measure` is one of the columns.
    #[must_use]
    pub fn has_measure(&self, measure: &str) -> bool {
        self.measures.iter().any(|m| m == measure)
    }

    /// Value of `measure` at `location`; `None` for an absent combination.
    #[must_use]
    pub fn get(&self, location: &str, measure: &str) -> Option<f64> {
        self.cells.get(location)?.get(measure).copied()
    }

    /// All values of one location, keyed by measure.
    #[must_use]
    pub fn row(&self, location: &str) -> Option<&BTreeMap<String, f64>> {
        self.cells.get(location)
    }

    /// One measure's column in location order.
    #[must_use]
    pub fn column(&self, measure: &str) -> Vec<(&str, Option<f64>)> {
        self.cells
            .iter()
            .map(|(location, values)| (location.as_str(), values.get(measure).copied()))
            .collect()
    }
}

/// Pivots `table` at `level`, averaging duplicate observations.
///
/// Averaging is the default because a state-level pivot always folds every county of a
/// state into one cell; use [`create_pivot_table_with`] to keep the last value or to fail
/// on duplicates instead.
pub fn create_pivot_table(table: &Table, level: PivotLevel) -> Result<PivotTable> {
    create_pivot_table_with(table, level, DuplicatePolicy::default())
}

/// Pivots `table` at `level`, spreading `measureid` into columns with `data_value` as cells.
///
/// Rows missing the location key, the measure identifier or the value are skipped.
///
/// # Errors
///
/// - [`PlacesError::MissingColumn`] when `measureid`, `data_value` or the location column is
///   absent from a non-empty table
/// - [`PlacesError::InvalidArgument`] for a duplicate pair under [`DuplicatePolicy::Error`]
pub fn create_pivot_table_with(
    table: &Table,
    level: PivotLevel,
    policy: DuplicatePolicy,
) -> Result<PivotTable> {
    table.require_column("measureid")?;
    table.require_column("data_value")?;
    let index_column = level.index_column(table)?;

    let mut sums: BTreeMap<String, BTreeMap<String, (f64, usize)>> = BTreeMap::new();
    let mut measures = BTreeSet::new();

    for row in table {
        let (Some(location), Some(measure), Some(value)) =
            (row.text(index_column), row.measureid.as_deref(), row.data_value)
        else {
            continue;
        };
        let cell = sums
            .entry(location.to_string())
            .or_default()
            .entry(measure.to_string())
            .or_insert((0.0, 0));
        match policy {
            DuplicatePolicy::Mean => {
                cell.0 += value;
                cell.1 += 1;
            }
            DuplicatePolicy::Last => *cell = (value, 1),
            DuplicatePolicy::Error if cell.1 > 0 => {
                return Err(PlacesError::invalid_argument(
                    "table",
                    format!("duplicate observation for location '{location}' and measure '{measure}'"),
                ));
            }
            DuplicatePolicy::Error => *cell = (value, 1),
        }
        measures.insert(measure.to_string());
    }

    let cells = sums
        .into_iter()
        .map(|(location, values)| {
            let values = values
                .into_iter()
                .map(|(measure, (sum, count))| (measure, sum / count as f64))
                .collect();
            (location, values)
        })
        .collect();

    Ok(PivotTable {
        level,
        index_column: index_column.to_string(),
        measures: measures.into_iter().collect(),
        cells,
    })
}
