//! Correlation and per-measure summary statistics.

use std::collections::BTreeMap;

use places_model::{PlacesError, Result, Table};
use serde::{Deserialize, Serialize};

use crate::filter::{MeasureFilter, filter_by_measures};
use crate::pivot::{PivotLevel, create_pivot_table};

/// Pearson correlation between two measures across locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// First measure identifier.
    pub x: String,
    /// Second measure identifier.
    pub y: String,
    /// Pearson's r; `None` with fewer than two pairs or when either series is constant.
    pub corr_coef: Option<f64>,
    /// Number of locations that have both measures.
    pub sample_size: usize,
    /// Mean of `x` over the paired locations; `None` without pairs.
    pub mean_x: Option<f64>,
    /// Mean of `y` over the paired locations; `None` without pairs.
    pub mean_y: Option<f64>,
}

/// Summary statistics of one measure's `data_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSummary {
    /// Measure identifier.
    pub measure_id: String,
    /// Number of non-null values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std_dev: Option<f64>,
}

/// Correlates measures `x` and `y` across counties.
///
/// Builds a county-level pivot restricted to the two measures (duplicates averaged), keeps
/// locations that have both values and computes Pearson's r over them.
///
/// # Errors
///
/// - [`PlacesError::InvalidArgument`] when `x` or `y` is blank
/// - [`PlacesError::MissingColumn`] when the table lacks the columns the pivot needs
pub fn get_correlation(table: &Table, x: &str, y: &str) -> Result<Correlation> {
    for (argument, value) in [("x", x), ("y", y)] {
        if value.trim().is_empty() {
            return Err(PlacesError::invalid_argument(
                argument,
                "a measure identifier must be provided",
            ));
        }
    }

    let subset = filter_by_measures(table, &MeasureFilter::new().measure_ids([x, y]))?;
    let pivot = create_pivot_table(&subset, PivotLevel::County)?;
    let (xs, ys): (Vec<f64>, Vec<f64>) = pivot
        .locations()
        .filter_map(|location| Some((pivot.get(location, x)?, pivot.get(location, y)?)))
        .unzip();

    Ok(Correlation {
        x: x.to_string(),
        y: y.to_string(),
        corr_coef: pearson(&xs, &ys),
        sample_size: xs.len(),
        mean_x: mean(&xs),
        mean_y: mean(&ys),
    })
}

/// Summarizes the non-null `data_value`s of `measure_id`.
///
/// Returns `Ok(None)` when no row of that measure carries a value.
///
/// # Errors
///
/// [`PlacesError::MissingColumn`] when the table lacks `measureid` or `data_value`.
pub fn summarize_measure(table: &Table, measure_id: &str) -> Result<Option<MeasureSummary>> {
    table.require_column("measureid")?;
    table.require_column("data_value")?;

    let values: Vec<f64> = table
        .iter()
        .filter(|row| row.measureid.as_deref() == Some(measure_id))
        .filter_map(|row| row.data_value)
        .collect();
    Ok(describe(measure_id, &values))
}

/// Summarizes every measure in `table`, ordered by measure identifier.
pub fn summarize_all(table: &Table) -> Result<Vec<MeasureSummary>> {
    table.require_column("measureid")?;
    table.require_column("data_value")?;

    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in table {
        if let (Some(measure), Some(value)) = (row.measureid.as_deref(), row.data_value) {
            groups.entry(measure).or_default().push(value);
        }
    }
    Ok(groups
        .into_iter()
        .filter_map(|(measure, values)| describe(measure, &values))
        .collect())
}

fn describe(measure_id: &str, values: &[f64]) -> Option<MeasureSummary> {
    let mean = mean(values)?;
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let std_dev = (values.len() > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (values.len() - 1) as f64).sqrt()
    });
    Some(MeasureSummary {
        measure_id: measure_id.to_string(),
        count: values.len(),
        mean,
        min,
        max,
        std_dev,
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use places_model::Record;

    fn obs(location: &str, measure: &str, value: f64) -> Record {
        Record {
            locationname: Some(location.to_string()),
            measureid: Some(measure.to_string()),
            data_value: Some(value),
            ..Record::default()
        }
    }

    #[test]
    fn test_correlation_two_locations() {
        let table = Table::from_records(vec![
            obs("aaa", "X", 1.0),
            obs("aaa", "Y", 2.0),
            obs("bbb", "X", 3.0),
            obs("bbb", "Y", 4.0),
        ]);
        let result = get_correlation(&table, "X", "Y").unwrap();

        assert_eq!(result.sample_size, 2);
        assert_eq!(result.mean_x, Some(2.0));
        assert_eq!(result.mean_y, Some(3.0));
        let r = result.corr_coef.unwrap();
        assert!((r - 1.0).abs() < 1e-12, "r = {r}");
    }

    #[test]
    fn test_correlation_drops_unpaired_locations() {
        let table = Table::from_records(vec![
            obs("a", "X", 1.0),
            obs("a", "Y", 10.0),
            obs("b", "X", 2.0),
            obs("b", "Y", 8.0),
            obs("c", "X", 3.0),
            obs("c", "Y", 3.0),
            obs("d", "X", 100.0),
            obs("e", "Y", 100.0),
            obs("a", "Z", 5.0),
        ]);
        let result = get_correlation(&table, "X", "Y").unwrap();

        assert_eq!(result.sample_size, 3);
        assert_eq!(result.mean_x, Some(2.0));
        assert_eq!(result.mean_y, Some(7.0));
        // sxy = -7, sxx = 2, syy = 26
        let expected = -7.0 / (2.0f64 * 26.0).sqrt();
        assert!((result.corr_coef.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_degenerate_cases() {
        let single = Table::from_records(vec![obs("a", "X", 1.0), obs("a", "Y", 2.0)]);
        let result = get_correlation(&single, "X", "Y").unwrap();
        assert_eq!(result.sample_size, 1);
        assert_eq!(result.corr_coef, None);
        assert_eq!(result.mean_x, Some(1.0));

        let constant = Table::from_records(vec![
            obs("a", "X", 5.0),
            obs("a", "Y", 2.0),
            obs("b", "X", 5.0),
            obs("b", "Y", 4.0),
        ]);
        let result = get_correlation(&constant, "X", "Y").unwrap();
        assert_eq!(result.sample_size, 2);
        assert_eq!(result.corr_coef, None);

        let none = Table::from_records(vec![obs("a", "X", 1.0)]);
        let result = get_correlation(&none, "X", "Y").unwrap();
        assert_eq!(result.sample_size, 0);
        assert_eq!(result.mean_x, None);
        assert_eq!(result.mean_y, None);
    }

    #[test]
    fn test_correlation_non_finite_input_is_undefined() {
        let table = Table::from_records(vec![
            obs("a", "X", f64::INFINITY),
            obs("a", "Y", 2.0),
            obs("b", "X", 3.0),
            obs("b", "Y", 4.0),
        ]);
        let result = get_correlation(&table, "X", "Y").unwrap();
        assert_eq!(result.sample_size, 2);
        assert_eq!(result.corr_coef, None);
    }

    #[test]
    fn test_correlation_requires_measure_ids() {
        let table = Table::from_records(vec![obs("a", "X", 1.0)]);
        let err = get_correlation(&table, "", "Y").unwrap_err();
        assert!(matches!(err, PlacesError::InvalidArgument { argument, .. } if argument == "x"));
        let err = get_correlation(&table, "X", "  ").unwrap_err();
        assert!(matches!(err, PlacesError::InvalidArgument { argument, .. } if argument == "y"));
    }

    #[test]
    fn test_summarize_measure() {
        let table = Table::from_records(vec![
            obs("a", "X", 1.0),
            obs("b", "X", 2.0),
            obs("c", "X", 3.0),
            obs("c", "Y", 30.0),
        ]);
        let summary = summarize_measure(&table, "X").unwrap().unwrap();

        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.std_dev, Some(1.0));
    }

    #[test]
    fn test_summarize_unknown_measure() {
        let table = Table::from_records(vec![obs("a", "X", 1.0)]);
        assert_eq!(summarize_measure(&table, "Q").unwrap(), None);
        assert_eq!(summarize_measure(&Table::default(), "X").unwrap(), None);
    }

    #[test]
    fn test_summarize_ignores_missing_values() {
        let mut missing = obs("b", "X", 0.0);
        missing.data_value = None;
        let table = Table::from_records(vec![obs("a", "X", 4.0), missing]);
        let summary = summarize_measure(&table, "X").unwrap().unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.std_dev, None);
    }

    #[test]
    fn test_summarize_requires_columns() {
        let table = Table::from_records(vec![Record {
            data_value: Some(1.0),
            ..Record::default()
        }]);
        let err = summarize_measure(&table, "X").unwrap_err();
        assert!(matches!(err, PlacesError::MissingColumn { column } if column == "measureid"));
    }

    #[test]
    fn test_summarize_all() {
        let table = Table::from_records(vec![
            obs("a", "Y", 1.0),
            obs("a", "X", 2.0),
            obs("b", "Y", 3.0),
        ]);
        let summaries = summarize_all(&table).unwrap();
        let ids: Vec<_> = summaries.iter().map(|s| s.measure_id.as_str()).collect();
        assert_eq!(ids, ["X", "Y"]);
        assert_eq!(summaries[1].mean, 2.0);
    }
}
