//! Conjunctive row filters.

use std::collections::BTreeSet;

use places_model::{Record, Result, Table};

/// Criteria for [`filter_by_measures`].
///
/// Each criterion is optional; an empty set counts as omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasureFilter {
    /// Short measure labels (`short_question_text`).
    pub measures: BTreeSet<String>,
    /// Category labels (`category`).
    pub categories: BTreeSet<String>,
    /// Measure identifiers (`measureid`).
    pub measure_ids: BTreeSet<String>,
}

impl MeasureFilter {
    /// A filter that keeps every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps rows whose `short_question_text` is one of `measures`.
    #[must_use]
    pub fn measures<I, S>(mut self, measures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measures.extend(measures.into_iter().map(Into::into));
        self
    }

    /// Keeps rows whose `category` is one of `categories`.
    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    /// Keeps rows whose `measureid` is one of `measure_ids`.
    #[must_use]
    pub fn measure_ids<I, S>(mut self, measure_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measure_ids
            .extend(measure_ids.into_iter().map(Into::into));
        self
    }
}

/// Criteria for [`filter_by_regions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilter {
    /// State abbreviations (`stateabbr`).
    pub states: BTreeSet<String>,
    /// County identifiers (`locationid`).
    pub counties: BTreeSet<String>,
}

impl RegionFilter {
    /// A filter that keeps every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps rows whose `stateabbr` is one of `states`.
    #[must_use]
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Keeps rows whose `locationid` is one of `counties`.
    #[must_use]
    pub fn counties<I, S>(mut self, counties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.counties.extend(counties.into_iter().map(Into::into));
        self
    }
}

/// Subsets `table` by measure label, category and measure identifier.
///
/// Criteria are applied in that order and compose with AND. With no criteria the result has
/// the same rows as the input.
///
/// # Errors
///
/// [`PlacesError::MissingColumn`](places_model::PlacesError::MissingColumn) when a criterion
/// targets a column the (non-empty) table does not have.
pub fn filter_by_measures(table: &Table, filter: &MeasureFilter) -> Result<Table> {
    apply(
        table,
        &[
            ("short_question_text", &filter.measures),
            ("category", &filter.categories),
            ("measureid", &filter.measure_ids),
        ],
    )
}

/// Subsets `table` by state abbreviation and county identifier.
///
/// # Errors
///
/// [`PlacesError::MissingColumn`](places_model::PlacesError::MissingColumn) when a criterion
/// targets a column the (non-empty) table does not have.
pub fn filter_by_regions(table: &Table, filter: &RegionFilter) -> Result<Table> {
    apply(
        table,
        &[
            ("stateabbr", &filter.states),
            ("locationid", &filter.counties),
        ],
    )
}

fn apply(table: &Table, criteria: &[(&str, &BTreeSet<String>)]) -> Result<Table> {
    let active: Vec<_> = criteria
        .iter()
        .filter(|(_, allowed)| !allowed.is_empty())
        .collect();
    for (column, _) in &active {
        table.require_column(column)?;
    }
    Ok(table.filter_rows(|row| {
        active
            .iter()
            .all(|(column, allowed)| row_matches(row, column, allowed))
    }))
}

fn row_matches(row: &Record, column: &str, allowed: &BTreeSet<String>) -> bool {
    row.text(column).is_some_and(|value| allowed.contains(value))
}
