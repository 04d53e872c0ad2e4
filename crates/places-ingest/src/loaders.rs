//! Dataset loaders: the measure catalog and the county observations.

use std::collections::HashSet;

use places_model::{Category, MeasureCatalogEntry, Record, Release, Result, Table};

use crate::endpoints::Endpoints;
use crate::fetch::Fetch;
use crate::normalize::normalize;

/// Columns the data dictionary must provide.
const CATALOG_COLUMNS: [&str; 5] = [
    "categoryid",
    "measureid",
    "measure_short_name",
    "measure_full_name",
    "category_name",
];

/// Loads the catalog of health-outcome and health-risk-behavior measures.
///
/// Rows outside the two covered categories are dropped and the rest are projected to
/// [`MeasureCatalogEntry`]. A measure listed more than once keeps its first entry.
///
/// # Errors
///
/// - [`PlacesError::Upstream`](places_model::PlacesError::Upstream) if the fetch fails
/// - [`PlacesError::DataFormat`](places_model::PlacesError::DataFormat) from normalization
/// - [`PlacesError::MissingColumn`](places_model::PlacesError::MissingColumn) if the
///   dictionary lacks one of the projected columns
pub fn load_measure_list<F: Fetch + ?Sized>(
    fetch: &F,
    endpoints: &Endpoints,
) -> Result<Vec<MeasureCatalogEntry>> {
    let records = fetch.fetch(&endpoints.data_dictionary_url(), &[])?;
    let table = normalize(records)?;
    for column in CATALOG_COLUMNS {
        table.require_column(column)?;
    }

    let mut seen = HashSet::new();
    let entries = table
        .into_rows()
        .into_iter()
        .filter(is_covered)
        .map(|row| MeasureCatalogEntry {
            id: row.measureid.unwrap_or_default(),
            short_name: row.measure_short_name.unwrap_or_default(),
            full_name: row.measure_full_name.unwrap_or_default(),
            category: row.category_name.unwrap_or_default(),
        })
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect();
    Ok(entries)
}

/// Loads county-level observations for a release given as a year string.
///
/// The release must match a supported year exactly (no surrounding whitespace) and is
/// validated before any request is made.
///
/// # Errors
///
/// - [`PlacesError::InvalidArgument`](places_model::PlacesError::InvalidArgument) for an
///   unsupported release
/// - everything [`load_county_release`] can return
pub fn load_county_data<F: Fetch + ?Sized>(
    fetch: &F,
    endpoints: &Endpoints,
    release: &str,
) -> Result<Table> {
    let release: Release = release.parse()?;
    load_county_release(fetch, endpoints, release)
}

/// Loads county-level observations for `release`.
///
/// Only rows in the two covered categories with a non-null `data_value` are kept, in the
/// order the API returned them.
pub fn load_county_release<F: Fetch + ?Sized>(
    fetch: &F,
    endpoints: &Endpoints,
    release: Release,
) -> Result<Table> {
    let records = fetch.fetch(&endpoints.release_url(release), &[])?;
    let table = normalize(records)?;
    table.require_column("categoryid")?;
    table.require_column("data_value")?;

    Ok(table.filter_rows(|row| is_covered(row) && row.data_value.is_some()))
}

fn is_covered(row: &Record) -> bool {
    row.categoryid.as_deref().is_some_and(Category::is_covered)
}
