//! Analysis utilities over normalized PLACES tables.
//!
//! Every operation takes a [`Table`](places_model::Table) by reference and returns a fresh
//! value; inputs are never modified.
//!
//! - [`filter_by_measures`] / [`filter_by_regions`]: conjunctive row filters
//! - [`create_pivot_table`]: long-to-wide reshaping (location × measure)
//! - [`get_correlation`]: Pearson correlation between two measures across locations
//! - [`summarize_measure`]: mean/min/max/count of one measure
//! - [`table_to_dataframe`] / [`pivot_to_dataframe`]: Polars export

mod filter;
mod frame;
mod pivot;
mod stats;

pub use filter::{MeasureFilter, RegionFilter, filter_by_measures, filter_by_regions};
pub use frame::{pivot_to_dataframe, table_to_dataframe};
pub use pivot::{
    DuplicatePolicy, PivotLevel, PivotTable, create_pivot_table, create_pivot_table_with,
};
pub use stats::{Correlation, MeasureSummary, get_correlation, summarize_all, summarize_measure};

pub use places_model::{PlacesError, Result};
